// Task Domain Model

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::container::{ContainerName, ContainerType};
use crate::domain::error::DomainError;

/// Task ID (UUID assigned by the control plane)
pub type TaskId = Uuid;

/// Pool name
pub type PoolName = String;

/// Platform a task runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Windows,
    Linux,
}

impl Os {
    /// Lowercase name; this exact string feeds container naming
    pub fn name(&self) -> &'static str {
        match self {
            Os::Windows => "windows",
            Os::Linux => "linux",
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Os {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" => Ok(Os::Windows),
            "linux" => Ok(Os::Linux),
            other => Err(DomainError::UnknownOs(other.to_string())),
        }
    }
}

/// Task State
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Init,
    Waiting,
    Scheduled,
    SettingUp,
    Running,
    Stopping,
    Stopped,
    WaitJob,
}

impl TaskState {
    /// Every state except the two shutdown states
    pub fn available() -> Vec<TaskState> {
        vec![
            TaskState::Init,
            TaskState::Waiting,
            TaskState::Scheduled,
            TaskState::SettingUp,
            TaskState::Running,
            TaskState::WaitJob,
        ]
    }
}

/// Task Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Coverage,
    DotnetCoverage,
    DotnetCrashReport,
    LibfuzzerDotnetFuzz,
    LibfuzzerFuzz,
    LibfuzzerCoverage,
    LibfuzzerCrashReport,
    LibfuzzerMerge,
    LibfuzzerRegression,
    GenericAnalysis,
    GenericSupervisor,
    GenericMerge,
    GenericGenerator,
    GenericCrashReport,
    GenericRegression,
}

impl TaskType {
    pub const ALL: [TaskType; 15] = [
        TaskType::Coverage,
        TaskType::DotnetCoverage,
        TaskType::DotnetCrashReport,
        TaskType::LibfuzzerDotnetFuzz,
        TaskType::LibfuzzerFuzz,
        TaskType::LibfuzzerCoverage,
        TaskType::LibfuzzerCrashReport,
        TaskType::LibfuzzerMerge,
        TaskType::LibfuzzerRegression,
        TaskType::GenericAnalysis,
        TaskType::GenericSupervisor,
        TaskType::GenericMerge,
        TaskType::GenericGenerator,
        TaskType::GenericCrashReport,
        TaskType::GenericRegression,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Coverage => "coverage",
            TaskType::DotnetCoverage => "dotnet_coverage",
            TaskType::DotnetCrashReport => "dotnet_crash_report",
            TaskType::LibfuzzerDotnetFuzz => "libfuzzer_dotnet_fuzz",
            TaskType::LibfuzzerFuzz => "libfuzzer_fuzz",
            TaskType::LibfuzzerCoverage => "libfuzzer_coverage",
            TaskType::LibfuzzerCrashReport => "libfuzzer_crash_report",
            TaskType::LibfuzzerMerge => "libfuzzer_merge",
            TaskType::LibfuzzerRegression => "libfuzzer_regression",
            TaskType::GenericAnalysis => "generic_analysis",
            TaskType::GenericSupervisor => "generic_supervisor",
            TaskType::GenericMerge => "generic_merge",
            TaskType::GenericGenerator => "generic_generator",
            TaskType::GenericCrashReport => "generic_crash_report",
            TaskType::GenericRegression => "generic_regression",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::UnknownTaskType(s.to_string()))
    }
}

/// Debug behaviours an operator can request for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskDebugFlag {
    KeepNodeOnFailure,
    KeepNodeOnCompletion,
}

/// Reference from a task to one storage container
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskContainers {
    #[serde(rename = "type")]
    pub container_type: ContainerType,
    pub name: ContainerName,
}

impl TaskContainers {
    pub fn new(container_type: ContainerType, name: impl Into<String>) -> Self {
        Self {
            container_type,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPool {
    pub count: u64,
    pub pool_name: PoolName,
}

/// Type-specific task settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDetails {
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
    /// Lifetime in hours
    pub duration: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_exe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_env: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_options: Option<Vec<String>>,
    #[serde(default)]
    pub target_options_merge: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_workers: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer_exe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer_env: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer_options: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_exe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_options: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_exe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_env: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_input_marker: Option<String>,

    #[serde(default)]
    pub check_asan_log: bool,
    #[serde(default)]
    pub check_debugger: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_retry_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_fuzzer_help: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_crash_on_failure: Option<bool>,

    #[serde(default)]
    pub rename_output: bool,
    #[serde(default)]
    pub reboot_after_setup: bool,
    #[serde(default)]
    pub preserve_existing_outputs: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensemble_sync_delay: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_files: Option<ContainerType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimized_stack_depth: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_allowlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_allowlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_env: Option<HashMap<String, String>>,
}

/// Full task configuration as submitted to and returned by the control plane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    pub job_id: Uuid,
    pub task: TaskDetails,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<TaskPool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prereq_tasks: Option<Vec<Uuid>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<TaskContainers>>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<Vec<TaskDebugFlag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colocate: Option<bool>,
}

impl TaskConfig {
    /// Container references, empty when the task has none
    pub fn container_refs(&self) -> &[TaskContainers] {
        self.containers.as_deref().unwrap_or(&[])
    }
}

/// Task Entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub job_id: Uuid,
    pub task_id: TaskId,
    pub state: TaskState,
    pub os: Os,
    pub config: TaskConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a task record with the given container references
    pub fn new(
        job_id: Uuid,
        task_id: TaskId,
        os: Os,
        task_type: TaskType,
        containers: Vec<TaskContainers>,
    ) -> Self {
        Self {
            job_id,
            task_id,
            state: TaskState::Init,
            os,
            config: TaskConfig {
                job_id,
                task: TaskDetails {
                    task_type: Some(task_type),
                    duration: 24,
                    ..Default::default()
                },
                pool: None,
                prereq_tasks: None,
                containers: Some(containers),
                tags: HashMap::new(),
                debug: None,
                colocate: None,
            },
            error: None,
            end_time: None,
        }
    }
}
