//! Terminal rendering: tables for lists, pretty JSON for single objects

use anyhow::Result;
use colored::Colorize;
use fuzzctl_sdk::types::{Node, Notification, Pool, Scaleset, Webhook};
use fuzzctl_sdk::{CleanupReport, DeleteOutcome, Job, Task};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Lower-case wire name of a serde enum (`TaskState::Running` -> `running`)
pub fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::from("?"),
    }
}

pub fn json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Table of `rows`, or JSON of `items` when `as_json` is set
pub fn list<T, R>(items: &[T], as_json: bool, row: impl Fn(&T) -> R) -> Result<()>
where
    T: Serialize,
    R: Tabled,
{
    if as_json {
        return json(&items);
    }

    if items.is_empty() {
        println!("{}", "(none)".dimmed());
        return Ok(());
    }

    let rows: Vec<R> = items.iter().map(row).collect();
    println!("{}", Table::new(rows));
    Ok(())
}

#[derive(Tabled)]
pub struct JobRow {
    job_id: String,
    state: String,
    project: String,
    name: String,
    build: String,
}

impl From<&Job> for JobRow {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.job_id.to_string(),
            state: job.state.to_string(),
            project: job.config.project.clone(),
            name: job.config.name.clone(),
            build: job.config.build.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct TaskRow {
    task_id: String,
    job_id: String,
    #[tabled(rename = "type")]
    task_type: String,
    state: String,
    os: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.task_id.to_string(),
            job_id: task.job_id.to_string(),
            task_type: task
                .config
                .task
                .task_type
                .map(|t| t.to_string())
                .unwrap_or_default(),
            state: label(&task.state),
            os: task.os.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct PoolRow {
    name: String,
    os: String,
    managed: bool,
    state: String,
    pool_id: String,
}

impl From<&Pool> for PoolRow {
    fn from(pool: &Pool) -> Self {
        Self {
            name: pool.name.clone(),
            os: pool.os.to_string(),
            managed: pool.managed,
            state: label(&pool.state),
            pool_id: pool.pool_id.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct NodeRow {
    machine_id: String,
    pool_name: String,
    state: String,
    scaleset_id: String,
    version: String,
}

impl From<&Node> for NodeRow {
    fn from(node: &Node) -> Self {
        Self {
            machine_id: node.machine_id.to_string(),
            pool_name: node.pool_name.clone(),
            state: label(&node.state),
            scaleset_id: node.scaleset_id.clone().unwrap_or_default(),
            version: node.version.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct ScalesetRow {
    scaleset_id: String,
    pool_name: String,
    state: String,
    size: u64,
    vm_sku: String,
    region: String,
}

impl From<&Scaleset> for ScalesetRow {
    fn from(scaleset: &Scaleset) -> Self {
        Self {
            scaleset_id: scaleset.scaleset_id.clone(),
            pool_name: scaleset.pool_name.clone(),
            state: label(&scaleset.state),
            size: scaleset.size,
            vm_sku: scaleset.vm_sku.clone(),
            region: scaleset.region.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct WebhookRow {
    webhook_id: String,
    name: String,
    event_types: String,
}

impl From<&Webhook> for WebhookRow {
    fn from(hook: &Webhook) -> Self {
        Self {
            webhook_id: hook.webhook_id.to_string(),
            name: hook.name.clone(),
            event_types: hook.event_types.join(","),
        }
    }
}

#[derive(Tabled)]
pub struct NotificationRow {
    notification_id: String,
    container: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            notification_id: n.notification_id.to_string(),
            container: n.container.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct NameRow {
    name: String,
}

impl NameRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

pub fn cleanup_report(report: &CleanupReport) {
    for name in &report.kept {
        println!("  {} {}", "○ keeping".dimmed(), name);
    }

    if report.deleted.is_empty() {
        println!("{}", "Nothing to delete".yellow());
        return;
    }

    for (name, outcome) in &report.deleted {
        match outcome {
            DeleteOutcome::WouldDelete => println!("  {} {}", "• would delete".cyan(), name),
            DeleteOutcome::Removed => println!("  {} {}", "✓ removed".green(), name),
            DeleteOutcome::AlreadyRemoved => {
                println!("  {} {}", "○ already removed".yellow(), name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzctl_sdk::types::PoolState;
    use fuzzctl_sdk::TaskState;

    #[test]
    fn test_label_uses_wire_names() {
        assert_eq!(label(&TaskState::Running), "running");
        assert_eq!(label(&PoolState::Shutdown), "shutdown");
    }
}
