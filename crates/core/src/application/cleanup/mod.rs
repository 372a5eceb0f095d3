// Job Cleanup Service - container teardown for a finished job

pub mod plan;

pub use plan::{is_safe_to_remove, plan_cleanup, CleanupPlan, SAFE_TO_REMOVE};

use crate::domain::{ContainerName, JobId};
use crate::error::Result;
use crate::port::{ContainerStore, JobSource};
use std::sync::Arc;
use tracing::info;

/// What happened to one container selected for deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Dry run: would have been deleted
    WouldDelete,
    /// Deleted; it existed
    Removed,
    /// Delete issued but the container was already gone
    AlreadyRemoved,
}

/// Result of one cleanup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub kept: Vec<ContainerName>,
    pub deleted: Vec<(ContainerName, DeleteOutcome)>,
}

impl CleanupReport {
    pub fn outcome(&self, name: &str) -> Option<DeleteOutcome> {
        self.deleted
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| *outcome)
    }
}

/// Carry out a plan, one delete at a time.
///
/// A failing delete aborts the rest of the batch; containers already
/// removed stay removed.
pub async fn execute_cleanup(
    store: &dyn ContainerStore,
    plan: &CleanupPlan,
    dry_run: bool,
) -> Result<CleanupReport> {
    for name in &plan.keep {
        info!("not removing: {}", name);
    }

    if plan.delete.is_empty() {
        info!("nothing to delete");
    }

    let mut deleted = Vec::with_capacity(plan.delete.len());
    for name in &plan.delete {
        let outcome = if dry_run {
            info!("container would be deleted: {}", name);
            DeleteOutcome::WouldDelete
        } else if store.delete_container(name).await? {
            info!("removed container: {}", name);
            DeleteOutcome::Removed
        } else {
            info!("container already removed: {}", name);
            DeleteOutcome::AlreadyRemoved
        };
        deleted.push((name.clone(), outcome));
    }

    Ok(CleanupReport {
        kept: plan.keep.iter().cloned().collect(),
        deleted,
    })
}

/// Job Cleanup Service
pub struct JobCleanupService {
    jobs: Arc<dyn JobSource>,
    containers: Arc<dyn ContainerStore>,
}

impl JobCleanupService {
    pub fn new(jobs: Arc<dyn JobSource>, containers: Arc<dyn ContainerStore>) -> Self {
        Self { jobs, containers }
    }

    /// Compute the keep/delete partition for a job without touching storage
    pub async fn plan(&self, job_id: JobId, only_job_specific: bool) -> Result<CleanupPlan> {
        let job = self.jobs.get_job(job_id).await?;
        let tasks = self.jobs.list_job_tasks(job.job_id).await?;

        Ok(plan_cleanup(&job, &tasks, only_job_specific))
    }

    /// Plan and carry out container cleanup for a job
    ///
    /// # Arguments
    ///
    /// * `job_id` - Fully resolved job ID
    /// * `only_job_specific` - Delete only containers whose name this job owns
    /// * `dry_run` - Report intent without deleting
    pub async fn plan_and_execute(
        &self,
        job_id: JobId,
        only_job_specific: bool,
        dry_run: bool,
    ) -> Result<CleanupReport> {
        let plan = self.plan(job_id, only_job_specific).await?;

        info!(
            job_id = %job_id,
            keep = plan.keep.len(),
            delete = plan.delete.len(),
            dry_run,
            "Container cleanup planned"
        );

        execute_cleanup(self.containers.as_ref(), &plan, dry_run).await
    }
}
