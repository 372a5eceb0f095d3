// Job Source Port (Interface)

use crate::domain::{Job, JobId, Task};
use crate::error::Result;
use async_trait::async_trait;

/// Read access to jobs and their tasks on the control plane
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch one job by its full ID
    async fn get_job(&self, job_id: JobId) -> Result<Job>;

    /// Every task of a job, regardless of state
    async fn list_job_tasks(&self, job_id: JobId) -> Result<Vec<Task>>;
}
