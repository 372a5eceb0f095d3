//! `fuzzctl scalesets`

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use fuzzctl_sdk::endpoints::DEFAULT_VM_SKU;
use fuzzctl_sdk::{FuzzClient, NewScaleset};

use crate::commands::parse_key_val;
use crate::output::{self, ScalesetRow};

#[derive(Subcommand)]
pub enum ScalesetsCommand {
    /// Create a scaleset in a managed pool
    Create {
        pool_name: String,
        max_size: u64,
        #[arg(long, default_value = "1")]
        initial_size: u64,
        #[arg(long)]
        image: Option<String>,
        #[arg(long, default_value = DEFAULT_VM_SKU)]
        vm_sku: String,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        spot_instances: bool,
        #[arg(long)]
        ephemeral_os_disks: bool,
        /// Tag as KEY=VALUE, repeatable
        #[arg(long = "tag", value_parser = parse_key_val)]
        tags: Vec<(String, String)>,
    },

    /// Get a scaleset
    Get {
        scaleset_id: String,
        #[arg(long)]
        include_auth: bool,
    },

    /// Resize a scaleset
    Update {
        scaleset_id: String,
        #[arg(long)]
        size: Option<u64>,
    },

    /// Shut down a scaleset
    Shutdown {
        scaleset_id: String,
        #[arg(long)]
        now: bool,
    },

    /// List scalesets
    List,

    /// Resolve a machine ID prefix among one scaleset's nodes
    Machine {
        scaleset_id: String,
        machine_id: String,
    },
}

pub async fn run(client: &FuzzClient, command: ScalesetsCommand, as_json: bool) -> Result<()> {
    let scalesets = client.scalesets();

    match command {
        ScalesetsCommand::Create {
            pool_name,
            max_size,
            initial_size,
            image,
            vm_sku,
            region,
            spot_instances,
            ephemeral_os_disks,
            tags,
        } => {
            let mut new = NewScaleset::new(pool_name, max_size);
            new.initial_size = initial_size;
            new.image = image;
            new.vm_sku = vm_sku;
            new.region = region;
            new.spot_instances = spot_instances;
            new.ephemeral_os_disks = ephemeral_os_disks;
            new.tags = tags.into_iter().collect();

            output::json(&scalesets.create(new).await?)
        }
        ScalesetsCommand::Get {
            scaleset_id,
            include_auth,
        } => output::json(&scalesets.get(&scaleset_id, include_auth).await?),
        ScalesetsCommand::Update { scaleset_id, size } => {
            output::json(&scalesets.update(&scaleset_id, size).await?)
        }
        ScalesetsCommand::Shutdown { scaleset_id, now } => {
            if scalesets.shutdown(&scaleset_id, now).await? {
                println!(
                    "{}",
                    format!("✓ Scaleset {} shutting down", scaleset_id).green().bold()
                );
            } else {
                println!("{}", format!("Scaleset {} was not shut down", scaleset_id).yellow());
            }
            Ok(())
        }
        ScalesetsCommand::List => {
            let items = scalesets.list(None).await?;
            output::list(&items, as_json, |s| ScalesetRow::from(s))
        }
        ScalesetsCommand::Machine {
            scaleset_id,
            machine_id,
        } => {
            let (_, machine_id) = scalesets
                .expand_machine(&scaleset_id, machine_id.as_str(), false)
                .await?;
            println!("{}", machine_id);
            Ok(())
        }
    }
}
