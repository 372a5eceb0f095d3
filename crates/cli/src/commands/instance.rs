//! Instance-level commands: `fuzzctl versions`, `fuzzctl events`,
//! `fuzzctl instance-config`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use fuzzctl_sdk::types::InstanceConfig;
use fuzzctl_sdk::{FuzzClient, CLIENT_VERSION};

use crate::output;

#[derive(Subcommand)]
pub enum VersionsCommand {
    /// Compare the service and client versions for compatibility
    Check {
        /// Require identical versions
        #[arg(long)]
        exact: bool,
    },
}

#[derive(Subcommand)]
pub enum EventsCommand {
    /// Get an event's payload
    Get {
        /// Full event ID
        event_id: String,
    },
}

#[derive(Subcommand)]
pub enum InstanceConfigCommand {
    /// Show the instance configuration
    Get,

    /// Replace the instance configuration with the contents of a JSON file
    Update { config_file: PathBuf },
}

pub async fn versions(client: &FuzzClient, command: VersionsCommand) -> Result<()> {
    match command {
        VersionsCommand::Check { exact } => {
            client.versions().check(exact).await?;
            println!(
                "{}",
                format!("✓ compatible (cli: {})", CLIENT_VERSION).green().bold()
            );
            Ok(())
        }
    }
}

pub async fn events(client: &FuzzClient, command: EventsCommand) -> Result<()> {
    match command {
        EventsCommand::Get { event_id } => {
            output::json(&client.events().get(event_id.as_str()).await?)
        }
    }
}

pub async fn instance_config(client: &FuzzClient, command: InstanceConfigCommand) -> Result<()> {
    let configs = client.instance_config();

    match command {
        InstanceConfigCommand::Get => output::json(&configs.get().await?),
        InstanceConfigCommand::Update { config_file } => {
            let raw = std::fs::read_to_string(&config_file)
                .with_context(|| format!("Failed to read {}", config_file.display()))?;
            let config: InstanceConfig =
                serde_json::from_str(&raw).context("Invalid instance configuration")?;
            output::json(&configs.update(&config).await?)
        }
    }
}
