//! Jobs endpoint

use std::collections::BTreeSet;
use std::sync::Arc;

use fuzzctl_core::application::{resolve_uuid, CleanupPlan, CleanupReport, JobCleanupService};
use fuzzctl_core::domain::{
    ContainerName, ContainerType, Job, JobConfig, JobState, Task, UuidExpansion,
};
use fuzzctl_core::AppError;
use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

use crate::client::FuzzClient;
use crate::error::Result;
use crate::types::{JobGet, JobSearch, TaskSearch};

const ENDPOINT: &str = "jobs";

/// Interact with jobs
pub struct Jobs<'a> {
    client: &'a FuzzClient,
}

impl<'a> Jobs<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    /// Full job ID for a prefix, enumerating available jobs when needed
    pub async fn resolve_id(&self, job_id: impl Into<UuidExpansion>) -> Result<Uuid> {
        Ok(resolve_uuid("job_id", job_id, &move || self.candidate_ids()).await?)
    }

    pub(crate) async fn candidate_ids(&self) -> fuzzctl_core::Result<Vec<String>> {
        let jobs = self
            .list(Some(JobState::available()))
            .await
            .map_err(AppError::from)?;
        Ok(jobs.into_iter().map(|j| j.job_id.to_string()).collect())
    }

    /// List jobs; `None` returns every job regardless of state
    pub async fn list(&self, states: Option<Vec<JobState>>) -> Result<Vec<Job>> {
        debug!("list jobs");
        self.client
            .call(Method::GET, ENDPOINT, Some(&JobSearch { job_id: None, state: states }))
            .await
    }

    /// Get information about a specific job
    pub async fn get(&self, job_id: impl Into<UuidExpansion>, with_tasks: bool) -> Result<Job> {
        let job_id = self.resolve_id(job_id).await?;
        debug!("get job: {}", job_id);

        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&JobGet {
                    job_id,
                    with_tasks: Some(with_tasks),
                }),
            )
            .await
    }

    /// Create a job
    pub async fn create(
        &self,
        project: &str,
        name: &str,
        build: &str,
        duration: u64,
    ) -> Result<Job> {
        let mut config = JobConfig::new(project, name, build);
        config.duration = duration;
        self.create_with_config(&config).await
    }

    pub async fn create_with_config(&self, config: &JobConfig) -> Result<Job> {
        debug!(
            "create job: project:{} name:{} build:{}",
            config.project, config.name, config.build
        );
        self.client.call(Method::POST, ENDPOINT, Some(config)).await
    }

    /// Stop a job and all tasks that make up the job
    pub async fn delete(&self, job_id: impl Into<UuidExpansion>) -> Result<Job> {
        let job_id = self.resolve_id(job_id).await?;
        debug!("delete job: {}", job_id);

        self.client
            .call(
                Method::DELETE,
                ENDPOINT,
                Some(&JobGet {
                    job_id,
                    with_tasks: None,
                }),
            )
            .await
    }

    /// Every task of a job, including stopped ones
    pub async fn list_tasks(&self, job_id: impl Into<UuidExpansion>) -> Result<Vec<Task>> {
        let job_id = self.resolve_id(job_id).await?;

        self.client
            .call(
                Method::GET,
                "tasks",
                Some(&TaskSearch {
                    job_id: Some(job_id),
                    task_id: None,
                    state: Some(vec![]),
                }),
            )
            .await
    }

    /// Names of the containers of one type used by the job's tasks
    pub async fn list_containers(
        &self,
        job_id: impl Into<UuidExpansion>,
        container_type: ContainerType,
    ) -> Result<BTreeSet<ContainerName>> {
        let tasks = self.list_tasks(job_id).await?;

        Ok(tasks
            .iter()
            .flat_map(|task| task.config.container_refs())
            .filter(|c| c.container_type == container_type)
            .map(|c| c.name.clone())
            .collect())
    }

    /// Which of the job's containers cleanup would keep and delete
    pub async fn plan_container_cleanup(
        &self,
        job_id: impl Into<UuidExpansion>,
        only_job_specific: bool,
    ) -> Result<CleanupPlan> {
        let job_id = self.resolve_id(job_id).await?;
        Ok(self.cleanup_service().plan(job_id, only_job_specific).await?)
    }

    /// Delete the storage containers used by a job.
    ///
    /// With `only_job_specific`, only containers whose name derives from this
    /// job's own metadata are removed. `dry_run` reports without deleting.
    pub async fn delete_containers(
        &self,
        job_id: impl Into<UuidExpansion>,
        only_job_specific: bool,
        dry_run: bool,
    ) -> Result<CleanupReport> {
        let job_id = self.resolve_id(job_id).await?;

        Ok(self
            .cleanup_service()
            .plan_and_execute(job_id, only_job_specific, dry_run)
            .await?)
    }

    fn cleanup_service(&self) -> JobCleanupService {
        let client = Arc::new(self.client.clone());
        JobCleanupService::new(client.clone(), client)
    }
}
