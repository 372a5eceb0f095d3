//! `fuzzctl jobs`

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use fuzzctl_sdk::{ContainerType, FuzzClient, JobState};

use crate::output::{self, JobRow, NameRow, TaskRow};

#[derive(Subcommand)]
pub enum JobsCommand {
    /// List jobs (only init and enabled unless --all)
    List {
        #[arg(long)]
        all: bool,
    },

    /// Get information about a specific job
    Get {
        /// Job ID or unique prefix
        job_id: String,
        #[arg(long)]
        with_tasks: bool,
    },

    /// Create a job
    Create {
        project: String,
        name: String,
        build: String,
        /// Lifetime in hours
        #[arg(long, default_value = "24")]
        duration: u64,
    },

    /// Stop a job and all tasks that make up the job
    Delete { job_id: String },

    /// List every task of a job, including stopped ones
    Tasks { job_id: String },

    /// Names of the containers of one type used by the job's tasks
    Containers {
        job_id: String,
        container_type: ContainerType,
    },

    /// Delete the storage containers used by a job
    DeleteContainers {
        job_id: String,
        /// Also delete shared containers not derived from this job
        #[arg(long)]
        include_shared: bool,
        /// Report what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },
}

pub async fn run(client: &FuzzClient, command: JobsCommand, as_json: bool) -> Result<()> {
    let jobs = client.jobs();

    match command {
        JobsCommand::List { all } => {
            let states = if all { None } else { Some(JobState::available()) };
            let items = jobs.list(states).await?;
            output::list(&items, as_json, |j| JobRow::from(j))
        }
        JobsCommand::Get { job_id, with_tasks } => {
            output::json(&jobs.get(job_id.as_str(), with_tasks).await?)
        }
        JobsCommand::Create {
            project,
            name,
            build,
            duration,
        } => output::json(&jobs.create(&project, &name, &build, duration).await?),
        JobsCommand::Delete { job_id } => output::json(&jobs.delete(job_id.as_str()).await?),
        JobsCommand::Tasks { job_id } => {
            let items = jobs.list_tasks(job_id.as_str()).await?;
            output::list(&items, as_json, |t| TaskRow::from(t))
        }
        JobsCommand::Containers {
            job_id,
            container_type,
        } => {
            let names: Vec<String> = jobs
                .list_containers(job_id.as_str(), container_type)
                .await?
                .into_iter()
                .collect();
            output::list(&names, as_json, |n| NameRow::new(n.as_str()))
        }
        JobsCommand::DeleteContainers {
            job_id,
            include_shared,
            dry_run,
        } => {
            let report = jobs
                .delete_containers(job_id.as_str(), !include_shared, dry_run)
                .await?;
            if dry_run {
                println!("{}", "Dry run: nothing was deleted".cyan().bold());
            }
            output::cleanup_report(&report);
            Ok(())
        }
    }
}
