// Job Domain Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::task::{TaskState, TaskType};

/// Job ID (UUID assigned by the control plane)
pub type JobId = Uuid;

/// Job State
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Init,
    Enabled,
    Stopping,
    Stopped,
}

impl JobState {
    /// States in which a job still accepts work
    pub fn available() -> Vec<JobState> {
        vec![JobState::Init, JobState::Enabled]
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Init => write!(f, "init"),
            JobState::Enabled => write!(f, "enabled"),
            JobState::Stopping => write!(f, "stopping"),
            JobState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Descriptive metadata a job is created with.
///
/// `project`, `name` and `build` are the naming key that container names are
/// derived from, so they must round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub project: String,
    pub name: String,
    pub build: String,
    /// Lifetime in hours
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
}

impl JobConfig {
    pub fn new(project: impl Into<String>, name: impl Into<String>, build: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            name: name.into(),
            build: build.into(),
            duration: 24,
            logs: None,
        }
    }
}

/// Summary of a task embedded in a job when requested `with_tasks`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTaskInfo {
    pub task_id: Uuid,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub state: TaskState,
}

/// Job Entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub job_id: JobId,
    pub state: JobState,
    pub config: JobConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_info: Option<Vec<JobTaskInfo>>,
}

impl Job {
    /// Create a job in `init` state
    ///
    /// # Arguments
    ///
    /// * `job_id` - ID assigned by the control plane
    /// * `config` - Naming metadata and lifetime
    pub fn new(job_id: JobId, config: JobConfig) -> Self {
        Self {
            job_id,
            state: JobState::Init,
            config,
            error: None,
            end_time: None,
            task_info: None,
        }
    }
}
