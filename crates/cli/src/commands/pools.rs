//! `fuzzctl pools`

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use fuzzctl_sdk::{FuzzClient, Os};
use uuid::Uuid;

use crate::output::{self, PoolRow};

#[derive(Subcommand)]
pub enum PoolsCommand {
    /// Create a worker pool
    Create {
        name: String,
        /// linux or windows
        os: Os,
        #[arg(long)]
        object_id: Option<Uuid>,
        /// Nodes are provisioned by the operator, not the service
        #[arg(long)]
        unmanaged: bool,
    },

    /// Update a worker pool
    Update {
        /// Pool name or unique prefix
        name: String,
        #[arg(long)]
        object_id: Option<Uuid>,
    },

    /// Get details on a specific pool
    Get {
        /// Pool name or unique prefix
        name: String,
    },

    /// Agent configuration for a pool
    GetConfig { name: String },

    /// Shut down a worker pool
    Shutdown {
        name: String,
        /// Stop nodes immediately instead of after their current work
        #[arg(long)]
        now: bool,
    },

    /// List worker pools
    List,
}

pub async fn run(client: &FuzzClient, command: PoolsCommand, as_json: bool) -> Result<()> {
    let pools = client.pools();

    match command {
        PoolsCommand::Create {
            name,
            os,
            object_id,
            unmanaged,
        } => output::json(&pools.create(&name, os, object_id, unmanaged).await?),
        PoolsCommand::Update { name, object_id } => {
            output::json(&pools.update(&name, object_id).await?)
        }
        PoolsCommand::Get { name } => output::json(&pools.get(&name).await?),
        PoolsCommand::GetConfig { name } => output::json(&pools.get_config(&name).await?),
        PoolsCommand::Shutdown { name, now } => {
            if pools.shutdown(&name, now).await? {
                println!("{}", format!("✓ Pool {} shutting down", name).green().bold());
            } else {
                println!("{}", format!("Pool {} was not shut down", name).yellow());
            }
            Ok(())
        }
        PoolsCommand::List => {
            let items = pools.list(None).await?;
            output::list(&items, as_json, |p| PoolRow::from(p))
        }
    }
}
