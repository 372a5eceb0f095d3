//! `fuzzctl notifications`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use fuzzctl_sdk::FuzzClient;

use crate::output::{self, NotificationRow};

#[derive(Subcommand)]
pub enum NotificationsCommand {
    /// Create a notification from a JSON integration template
    Create {
        container: String,
        config_file: PathBuf,
        #[arg(long)]
        replace_existing: bool,
    },

    /// Create a Teams notification integration
    CreateTeams { container: String, url: String },

    /// List notification integrations
    List {
        /// Only for this container, repeatable
        #[arg(long = "container")]
        containers: Vec<String>,
    },

    /// Get a notification integration
    Get {
        /// Notification ID or unique prefix
        notification_id: String,
    },

    /// Delete a notification integration
    Delete { notification_id: String },
}

pub async fn run(client: &FuzzClient, command: NotificationsCommand, as_json: bool) -> Result<()> {
    let notifications = client.notifications();

    match command {
        NotificationsCommand::Create {
            container,
            config_file,
            replace_existing,
        } => {
            let raw = std::fs::read_to_string(&config_file)
                .with_context(|| format!("Failed to read {}", config_file.display()))?;
            let config: serde_json::Value =
                serde_json::from_str(&raw).context("Invalid notification template")?;
            output::json(
                &notifications
                    .create(&container, config, replace_existing)
                    .await?,
            )
        }
        NotificationsCommand::CreateTeams { container, url } => {
            output::json(&notifications.create_teams(&container, &url).await?)
        }
        NotificationsCommand::List { containers } => {
            let filter = (!containers.is_empty()).then_some(containers);
            let items = notifications.list(filter).await?;
            output::list(&items, as_json, |n| NotificationRow::from(n))
        }
        NotificationsCommand::Get { notification_id } => {
            let items = notifications.get(notification_id.as_str()).await?;
            output::list(&items, as_json, |n| NotificationRow::from(n))
        }
        NotificationsCommand::Delete { notification_id } => {
            output::json(&notifications.delete(notification_id.as_str()).await?)
        }
    }
}
