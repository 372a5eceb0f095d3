//! `fuzzctl nodes`

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use fuzzctl_sdk::FuzzClient;

use crate::output::{self, NodeRow};

#[derive(Subcommand)]
pub enum NodesCommand {
    /// Get information about a node
    Get {
        /// Machine ID or unique prefix
        machine_id: String,
    },

    /// Stop a node
    Halt { machine_id: String },

    /// Reimage a node
    Reimage { machine_id: String },

    /// Update node settings
    Update {
        machine_id: String,
        /// Keep the node around after its work is done, for debugging
        #[arg(long)]
        debug_keep_node: Option<bool>,
    },

    /// Add an SSH public key to a node
    AddSshKey {
        machine_id: String,
        #[arg(long)]
        public_key: String,
    },

    /// List nodes
    List {
        #[arg(long)]
        scaleset_id: Option<String>,
        /// Pool name or unique prefix
        #[arg(long)]
        pool_name: Option<String>,
    },
}

pub async fn run(client: &FuzzClient, command: NodesCommand, as_json: bool) -> Result<()> {
    let nodes = client.nodes();

    match command {
        NodesCommand::Get { machine_id } => output::json(&nodes.get(machine_id.as_str()).await?),
        NodesCommand::Halt { machine_id } => {
            report("halt", &machine_id, nodes.halt(machine_id.as_str()).await?)
        }
        NodesCommand::Reimage { machine_id } => {
            report("reimage", &machine_id, nodes.reimage(machine_id.as_str()).await?)
        }
        NodesCommand::Update {
            machine_id,
            debug_keep_node,
        } => report(
            "update",
            &machine_id,
            nodes.update(machine_id.as_str(), debug_keep_node).await?,
        ),
        NodesCommand::AddSshKey {
            machine_id,
            public_key,
        } => report(
            "add ssh key to",
            &machine_id,
            nodes.add_ssh_key(machine_id.as_str(), &public_key).await?,
        ),
        NodesCommand::List {
            scaleset_id,
            pool_name,
        } => {
            let items = nodes.list(None, scaleset_id, pool_name.as_deref()).await?;
            output::list(&items, as_json, |n| NodeRow::from(n))
        }
    }
}

fn report(action: &str, machine_id: &str, ok: bool) -> Result<()> {
    if ok {
        println!("{}", format!("✓ {} {}", action, machine_id).green().bold());
    } else {
        println!("{}", format!("✗ failed to {} {}", action, machine_id).red());
    }
    Ok(())
}
