//! Tasks endpoint

use std::collections::HashMap;

use fuzzctl_core::application::resolve_uuid;
use fuzzctl_core::domain::{
    ContainerName, ContainerType, PoolName, Task, TaskConfig, TaskContainers, TaskDebugFlag,
    TaskDetails, TaskPool, TaskState, TaskType, UuidExpansion,
};
use fuzzctl_core::AppError;
use reqwest::Method;
use tracing::{debug, error};
use uuid::Uuid;

use crate::client::FuzzClient;
use crate::error::{Result, SdkError};
use crate::types::{TaskGet, TaskSearch};

const ENDPOINT: &str = "tasks";

/// Parameters for [`Tasks::create`]
#[derive(Debug, Clone)]
pub struct NewTask {
    pub job_id: UuidExpansion,
    pub task_type: TaskType,
    pub target_exe: String,
    pub containers: Vec<(ContainerType, ContainerName)>,
    pub pool_name: PoolName,
    pub vm_count: u64,
    /// Lifetime in hours
    pub duration: u64,
    pub tags: HashMap<String, String>,
    pub prereq_tasks: Option<Vec<Uuid>>,
    pub debug: Option<Vec<TaskDebugFlag>>,
    pub colocate: bool,
    /// Remaining task knobs; `type`, `duration` and `target_exe` are taken from above
    pub details: TaskDetails,
}

impl NewTask {
    pub fn new(
        job_id: impl Into<UuidExpansion>,
        task_type: TaskType,
        target_exe: impl Into<String>,
        containers: Vec<(ContainerType, ContainerName)>,
        pool_name: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            task_type,
            target_exe: target_exe.into(),
            containers,
            pool_name: pool_name.into(),
            vm_count: 1,
            duration: 24,
            tags: HashMap::new(),
            prereq_tasks: None,
            debug: None,
            colocate: false,
            details: TaskDetails {
                check_debugger: true,
                ..Default::default()
            },
        }
    }
}

/// Strip surrounding whitespace from each option.
///
/// Operators quote several options together to get them past the shell;
/// the target must still see them as options. Empty lists become `None`.
pub fn trim_options(options: Option<Vec<String>>) -> Option<Vec<String>> {
    options
        .filter(|o| !o.is_empty())
        .map(|o| o.iter().map(|s| s.trim().to_string()).collect())
}

/// Interact with tasks
pub struct Tasks<'a> {
    client: &'a FuzzClient,
}

impl<'a> Tasks<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    pub async fn resolve_id(&self, task_id: impl Into<UuidExpansion>) -> Result<Uuid> {
        Ok(resolve_uuid("task_id", task_id, &move || self.candidate_ids()).await?)
    }

    async fn candidate_ids(&self) -> fuzzctl_core::Result<Vec<String>> {
        let tasks = self.list(None, None).await.map_err(AppError::from)?;
        Ok(tasks.into_iter().map(|t| t.task_id.to_string()).collect())
    }

    /// List tasks.
    ///
    /// Without a job and without states, only available tasks are returned.
    pub async fn list(
        &self,
        job_id: Option<UuidExpansion>,
        states: Option<Vec<TaskState>>,
    ) -> Result<Vec<Task>> {
        debug!("list tasks");

        let job_id = match job_id {
            Some(job_id) => Some(self.client.jobs().resolve_id(job_id).await?),
            None => None,
        };

        let state = match (&job_id, states) {
            (None, None) => Some(TaskState::available()),
            (_, states) => states,
        };

        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&TaskSearch {
                    job_id,
                    task_id: None,
                    state,
                }),
            )
            .await
    }

    /// Get information about a task
    pub async fn get(&self, task_id: impl Into<UuidExpansion>) -> Result<Task> {
        let task_id = self.resolve_id(task_id).await?;
        debug!("get task: {}", task_id);

        self.client
            .call(Method::GET, ENDPOINT, Some(&TaskGet { task_id }))
            .await
    }

    /// Stop an individual task
    pub async fn delete(&self, task_id: impl Into<UuidExpansion>) -> Result<Task> {
        let task_id = self.resolve_id(task_id).await?;
        debug!("delete task: {}", task_id);

        self.client
            .call(Method::DELETE, ENDPOINT, Some(&TaskGet { task_id }))
            .await
    }

    pub async fn create_with_config(&self, config: &TaskConfig) -> Result<Task> {
        self.client.call(Method::POST, ENDPOINT, Some(config)).await
    }

    /// Create a task
    pub async fn create(&self, new: NewTask) -> Result<Task> {
        debug!("creating task: {}", new.task_type);

        if new.task_type == TaskType::LibfuzzerCoverage {
            error!(
                "The `libfuzzer_coverage` task type is deprecated. \
                 Please migrate to the `coverage` task type."
            );
            return Err(SdkError::Core(AppError::Validation(
                "`libfuzzer_coverage` task type not supported".to_string(),
            )));
        }

        let job_id = self.client.jobs().resolve_id(new.job_id.clone()).await?;
        let config = build_task_config(job_id, new);

        self.create_with_config(&config).await
    }
}

fn build_task_config(job_id: Uuid, new: NewTask) -> TaskConfig {
    let mut task = new.details;
    task.task_type = Some(new.task_type);
    task.duration = new.duration;
    task.target_exe = Some(new.target_exe);
    task.target_options = trim_options(task.target_options);
    task.analyzer_options = trim_options(task.analyzer_options);
    task.generator_options = trim_options(task.generator_options);
    task.supervisor_options = trim_options(task.supervisor_options);

    let containers = new
        .containers
        .into_iter()
        .map(|(container_type, name)| TaskContainers::new(container_type, name))
        .collect();

    TaskConfig {
        job_id,
        task,
        pool: Some(TaskPool {
            count: new.vm_count,
            pool_name: new.pool_name,
        }),
        prereq_tasks: new.prereq_tasks,
        containers: Some(containers),
        tags: new.tags,
        debug: new.debug,
        colocate: Some(new.colocate),
    }
}
