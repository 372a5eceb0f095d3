//! `fuzzctl containers`

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use fuzzctl_sdk::FuzzClient;

use crate::commands::parse_key_val;
use crate::output::{self, NameRow};

#[derive(Subcommand)]
pub enum ContainersCommand {
    /// Get a fully qualified SAS URL for a container
    Get { name: String },

    /// Create a storage container
    Create {
        name: String,
        /// Metadata as KEY=VALUE, repeatable
        #[arg(long = "metadata", value_parser = parse_key_val)]
        metadata: Vec<(String, String)>,
    },

    /// Delete a storage container
    Delete { name: String },

    /// List containers
    List,
}

pub async fn run(client: &FuzzClient, command: ContainersCommand, as_json: bool) -> Result<()> {
    let containers = client.containers();

    match command {
        ContainersCommand::Get { name } => output::json(&containers.get(&name).await?),
        ContainersCommand::Create { name, metadata } => {
            let metadata = (!metadata.is_empty()).then(|| metadata.into_iter().collect());
            output::json(&containers.create(&name, metadata).await?)
        }
        ContainersCommand::Delete { name } => {
            if containers.delete(&name).await? {
                println!("{}", format!("✓ Container {} deleted", name).green().bold());
            } else {
                println!("{}", format!("Container {} did not exist", name).yellow());
            }
            Ok(())
        }
        ContainersCommand::List => {
            let items = containers.list().await?;
            output::list(&items, as_json, |c| NameRow::new(c.name.as_str()))
        }
    }
}
