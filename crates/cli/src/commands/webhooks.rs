//! `fuzzctl webhooks`

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use fuzzctl_sdk::types::{WebhookCreate, WebhookMessageFormat, WebhookUpdate};
use fuzzctl_sdk::FuzzClient;

use crate::output::{self, WebhookRow};

#[derive(Clone, Copy, ValueEnum)]
pub enum MessageFormat {
    Onefuzz,
    EventGrid,
}

impl From<MessageFormat> for WebhookMessageFormat {
    fn from(format: MessageFormat) -> Self {
        match format {
            MessageFormat::Onefuzz => WebhookMessageFormat::Onefuzz,
            MessageFormat::EventGrid => WebhookMessageFormat::EventGrid,
        }
    }
}

#[derive(Subcommand)]
pub enum WebhooksCommand {
    /// List webhooks
    List,

    /// Get a webhook
    Get {
        /// Webhook ID or unique prefix
        webhook_id: String,
    },

    /// Create a webhook
    Create {
        name: String,
        url: String,
        /// Event type to deliver, repeatable
        #[arg(long = "event-type", required = true)]
        event_types: Vec<String>,
        #[arg(long)]
        secret_token: Option<String>,
        #[arg(long, value_enum)]
        message_format: Option<MessageFormat>,
    },

    /// Update a webhook
    Update {
        webhook_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long = "event-type")]
        event_types: Vec<String>,
        #[arg(long)]
        secret_token: Option<String>,
        #[arg(long, value_enum)]
        message_format: Option<MessageFormat>,
    },

    /// Delete a webhook
    Delete { webhook_id: String },

    /// Send a ping event to a webhook
    Ping { webhook_id: String },

    /// Delivery log of a webhook
    Logs { webhook_id: String },
}

pub async fn run(client: &FuzzClient, command: WebhooksCommand, as_json: bool) -> Result<()> {
    let webhooks = client.webhooks();

    match command {
        WebhooksCommand::List => {
            let items = webhooks.list().await?;
            output::list(&items, as_json, |h| WebhookRow::from(h))
        }
        WebhooksCommand::Get { webhook_id } => {
            output::json(&webhooks.get(webhook_id.as_str()).await?)
        }
        WebhooksCommand::Create {
            name,
            url,
            event_types,
            secret_token,
            message_format,
        } => {
            let request = WebhookCreate {
                name,
                url,
                event_types,
                secret_token,
                message_format: message_format.map(Into::into),
            };
            output::json(&webhooks.create(&request).await?)
        }
        WebhooksCommand::Update {
            webhook_id,
            name,
            url,
            event_types,
            secret_token,
            message_format,
        } => {
            let changes = WebhookUpdate {
                name,
                url,
                event_types: (!event_types.is_empty()).then_some(event_types),
                secret_token,
                message_format: message_format.map(Into::into),
            };
            output::json(&webhooks.update(webhook_id.as_str(), &changes).await?)
        }
        WebhooksCommand::Delete { webhook_id } => {
            if webhooks.delete(webhook_id.as_str()).await? {
                println!("{}", format!("✓ Webhook {} deleted", webhook_id).green().bold());
            } else {
                println!("{}", format!("Webhook {} was not deleted", webhook_id).yellow());
            }
            Ok(())
        }
        WebhooksCommand::Ping { webhook_id } => {
            output::json(&webhooks.ping(webhook_id.as_str()).await?)
        }
        WebhooksCommand::Logs { webhook_id } => {
            output::json(&webhooks.logs(webhook_id.as_str()).await?)
        }
    }
}
