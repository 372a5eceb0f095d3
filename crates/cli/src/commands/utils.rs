//! `fuzzctl utils` - offline helpers

use anyhow::Result;
use clap::Subcommand;
use fuzzctl_sdk::{container_name, namespaced_guid, ContainerType, Os};

#[derive(Subcommand)]
pub enum UtilsCommand {
    /// Print the container name a job's tasks would use for a role
    ContainerName {
        /// Container role (e.g. setup, crashes, unique_reports)
        container_type: ContainerType,
        project: String,
        name: String,
        build: String,
        /// linux or windows
        platform: Os,
    },

    /// Print the namespaced GUID of a project/name/build/platform tuple
    NamespacedGuid {
        project: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        build: Option<String>,
        #[arg(long)]
        platform: Option<String>,
    },
}

pub fn run(command: UtilsCommand) -> Result<()> {
    match command {
        UtilsCommand::ContainerName {
            container_type,
            project,
            name,
            build,
            platform,
        } => {
            println!(
                "{}",
                container_name(container_type, &project, &name, &build, platform)
            );
        }
        UtilsCommand::NamespacedGuid {
            project,
            name,
            build,
            platform,
        } => {
            let guid = namespaced_guid(
                &project,
                name.as_deref(),
                build.as_deref(),
                platform.as_deref(),
            );
            println!("{}", guid);
        }
    }
    Ok(())
}
