//! fuzzctl Client Implementation

use crate::backend::Backend;
use crate::config::BackendConfig;
use crate::endpoints::{
    Containers, Events, InstanceConfigs, Jobs, Nodes, Notifications, Pools, Scalesets, Tasks,
    Versions, Webhooks,
};
use crate::error::Result;
use crate::types::Info;
use async_trait::async_trait;
use fuzzctl_core::domain::{Job, JobId, Task};
use fuzzctl_core::port::{ContainerStore, JobSource};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Control plane client
///
/// Groups the remote API by resource. Every operation that accepts an
/// identifier also accepts a unique prefix of it.
///
/// # Example
///
/// ```no_run
/// use fuzzctl_sdk::{BackendConfig, FuzzClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = FuzzClient::new(BackendConfig::new("https://fuzz.example.com"))?;
/// let job = client.jobs().get("8326", false).await?;
/// println!("{} {}", job.job_id, job.config.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FuzzClient {
    backend: Arc<Backend>,
}

impl FuzzClient {
    /// Create a client for the configured endpoint
    pub fn new(config: BackendConfig) -> Result<Self> {
        Ok(Self {
            backend: Arc::new(Backend::new(config)?),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        self.backend.config()
    }

    pub fn jobs(&self) -> Jobs<'_> {
        Jobs::new(self)
    }

    pub fn tasks(&self) -> Tasks<'_> {
        Tasks::new(self)
    }

    pub fn containers(&self) -> Containers<'_> {
        Containers::new(self)
    }

    pub fn pools(&self) -> Pools<'_> {
        Pools::new(self)
    }

    pub fn nodes(&self) -> Nodes<'_> {
        Nodes::new(self)
    }

    pub fn scalesets(&self) -> Scalesets<'_> {
        Scalesets::new(self)
    }

    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(self)
    }

    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(self)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    pub fn instance_config(&self) -> InstanceConfigs<'_> {
        InstanceConfigs::new(self)
    }

    pub fn versions(&self) -> Versions<'_> {
        Versions::new(self)
    }

    /// Service information
    pub async fn info(&self) -> Result<Info> {
        debug!("get info");
        self.call(Method::GET, "info", None::<&()>).await
    }

    /// Check that `endpoint` looks like a control plane.
    ///
    /// The API rejects unauthenticated requests with 401; anything else
    /// suggests the URL is wrong. Returns whether the check passed.
    pub async fn verify_endpoint(&self, endpoint: &str) -> Result<bool> {
        let status = self.backend.probe(endpoint).await?;
        if status != StatusCode::UNAUTHORIZED {
            warn!(
                endpoint,
                status = status.as_u16(),
                "This could be an invalid API endpoint: Missing HTTP Authentication"
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// JSON-body request against `api/<endpoint>`
    pub(crate) async fn call<B, R>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.backend.request(method, endpoint, body).await
    }
}

#[async_trait]
impl JobSource for FuzzClient {
    async fn get_job(&self, job_id: JobId) -> fuzzctl_core::Result<Job> {
        Ok(self.jobs().get(job_id, false).await?)
    }

    async fn list_job_tasks(&self, job_id: JobId) -> fuzzctl_core::Result<Vec<Task>> {
        Ok(self.jobs().list_tasks(job_id).await?)
    }
}

#[async_trait]
impl ContainerStore for FuzzClient {
    async fn delete_container(&self, name: &str) -> fuzzctl_core::Result<bool> {
        Ok(self.containers().delete(name).await?)
    }
}
