//! Pools endpoint

use fuzzctl_core::application::resolve_name;
use fuzzctl_core::domain::{Os, PoolName};
use fuzzctl_core::AppError;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::client::FuzzClient;
use crate::error::{Result, SdkError};
use crate::types::{
    Architecture, BoolResult, Pool, PoolCreate, PoolSearch, PoolState, PoolStop, PoolUpdate,
};

const ENDPOINT: &str = "pool";

/// Interact with worker pools
pub struct Pools<'a> {
    client: &'a FuzzClient,
}

impl<'a> Pools<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    /// Full pool name for a prefix
    pub async fn resolve_name(&self, field: &str, name: &str) -> Result<PoolName> {
        Ok(resolve_name(field, name, &move || self.candidate_names()).await?)
    }

    async fn candidate_names(&self) -> fuzzctl_core::Result<Vec<String>> {
        let pools = self.list(None).await.map_err(AppError::from)?;
        Ok(pools.into_iter().map(|p| p.name).collect())
    }

    /// Create a worker pool
    pub async fn create(
        &self,
        name: &str,
        os: Os,
        object_id: Option<Uuid>,
        unmanaged: bool,
    ) -> Result<Pool> {
        debug!("create worker pool");
        self.client
            .call(
                Method::POST,
                ENDPOINT,
                Some(&PoolCreate {
                    name: name.to_string(),
                    os,
                    arch: Architecture::X86_64,
                    managed: !unmanaged,
                    object_id,
                }),
            )
            .await
    }

    /// Change the object ID the pool's agents authenticate as
    pub async fn update(&self, name: &str, object_id: Option<Uuid>) -> Result<Pool> {
        let name = self.resolve_name("name", name).await?;
        debug!("update worker pool: {}", name);

        self.client
            .call(Method::PATCH, ENDPOINT, Some(&PoolUpdate { name, object_id }))
            .await
    }

    pub async fn get(&self, name: &str) -> Result<Pool> {
        debug!("get details on a specific pool");
        let name = self.resolve_name("pool name", name).await?;

        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&PoolSearch {
                    name: Some(name),
                    state: None,
                }),
            )
            .await
    }

    /// Agent configuration for the pool
    pub async fn get_config(&self, name: &str) -> Result<Value> {
        let pool = self.get(name).await?;
        pool.config.ok_or_else(|| {
            SdkError::MissingConfiguration("Missing AgentConfig in response".to_string())
        })
    }

    pub async fn shutdown(&self, name: &str, now: bool) -> Result<bool> {
        let name = self.resolve_name("name", name).await?;
        debug!("shutdown worker pool: {} (now: {})", name, now);

        let result: BoolResult = self
            .client
            .call(Method::DELETE, ENDPOINT, Some(&PoolStop { name, now }))
            .await?;
        Ok(result.result)
    }

    pub async fn list(&self, states: Option<Vec<PoolState>>) -> Result<Vec<Pool>> {
        debug!("list worker pools");
        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&PoolSearch {
                    name: None,
                    state: states,
                }),
            )
            .await
    }
}
