//! `fuzzctl tasks`

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use fuzzctl_sdk::{ContainerType, FuzzClient, NewTask, TaskConfig, TaskType, UuidExpansion};

use crate::commands::parse_key_val;
use crate::output::{self, TaskRow};

#[derive(Subcommand)]
pub enum TasksCommand {
    /// List tasks (available ones unless a job is given)
    List {
        #[arg(long)]
        job_id: Option<String>,
    },

    /// Get information about a task
    Get { task_id: String },

    /// Stop an individual task
    Delete { task_id: String },

    /// Create a task
    Create {
        job_id: String,
        task_type: TaskType,
        target_exe: String,
        /// Worker pool to run on
        #[arg(long)]
        pool_name: String,
        /// Container as TYPE=NAME, repeatable
        #[arg(long = "container", value_parser = parse_container)]
        containers: Vec<(ContainerType, String)>,
        #[arg(long, default_value = "1")]
        vm_count: u64,
        /// Lifetime in hours
        #[arg(long, default_value = "24")]
        duration: u64,
        /// Option passed to the target, repeatable
        #[arg(long = "target-option", allow_hyphen_values = true)]
        target_options: Vec<String>,
        /// Environment variable for the target as KEY=VALUE, repeatable
        #[arg(long = "target-env", value_parser = parse_key_val)]
        target_env: Vec<(String, String)>,
        /// Tag as KEY=VALUE, repeatable
        #[arg(long = "tag", value_parser = parse_key_val)]
        tags: Vec<(String, String)>,
        #[arg(long)]
        colocate: bool,
    },

    /// Create a task from a JSON TaskConfig file
    CreateFromFile { path: PathBuf },
}

fn parse_container(s: &str) -> Result<(ContainerType, String), String> {
    let (kind, name) = parse_key_val(s)?;
    let kind = kind.parse::<ContainerType>().map_err(|e| e.to_string())?;
    Ok((kind, name))
}

pub async fn run(client: &FuzzClient, command: TasksCommand, as_json: bool) -> Result<()> {
    let tasks = client.tasks();

    match command {
        TasksCommand::List { job_id } => {
            let items = tasks.list(job_id.map(UuidExpansion::from), None).await?;
            output::list(&items, as_json, |t| TaskRow::from(t))
        }
        TasksCommand::Get { task_id } => output::json(&tasks.get(task_id.as_str()).await?),
        TasksCommand::Delete { task_id } => output::json(&tasks.delete(task_id.as_str()).await?),
        TasksCommand::Create {
            job_id,
            task_type,
            target_exe,
            pool_name,
            containers,
            vm_count,
            duration,
            target_options,
            target_env,
            tags,
            colocate,
        } => {
            let mut new = NewTask::new(job_id, task_type, target_exe, containers, pool_name);
            new.vm_count = vm_count;
            new.duration = duration;
            new.colocate = colocate;
            new.tags = tags.into_iter().collect();
            new.details.target_options = Some(target_options);
            if !target_env.is_empty() {
                new.details.target_env = Some(target_env.into_iter().collect::<HashMap<_, _>>());
            }

            output::json(&tasks.create(new).await?)
        }
        TasksCommand::CreateFromFile { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: TaskConfig =
                serde_json::from_str(&raw).context("Invalid task configuration")?;
            output::json(&tasks.create_with_config(&config).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_container() {
        assert_eq!(
            parse_container("unique_reports=oft-unique-reports-1").unwrap(),
            (ContainerType::UniqueReports, "oft-unique-reports-1".to_string())
        );
        assert!(parse_container("bogus=name").is_err());
    }
}
