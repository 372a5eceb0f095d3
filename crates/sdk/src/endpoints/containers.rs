//! Containers endpoint

use std::collections::HashMap;

use reqwest::Method;
use tracing::debug;

use crate::client::FuzzClient;
use crate::error::Result;
use crate::types::{
    BoolResult, ContainerCreate, ContainerDelete, ContainerGet, ContainerInfo, ContainerInfoBase,
};

const ENDPOINT: &str = "containers";

/// Interact with storage containers
pub struct Containers<'a> {
    client: &'a FuzzClient,
}

impl<'a> Containers<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    /// Get a fully qualified SAS URL for a container
    pub async fn get(&self, name: &str) -> Result<ContainerInfo> {
        debug!("get container: {}", name);
        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&ContainerGet {
                    name: name.to_string(),
                }),
            )
            .await
    }

    /// Create a storage container
    pub async fn create(
        &self,
        name: &str,
        metadata: Option<HashMap<String, String>>,
    ) -> Result<ContainerInfo> {
        debug!("create container: {}", name);
        self.client
            .call(
                Method::POST,
                ENDPOINT,
                Some(&ContainerCreate {
                    name: name.to_string(),
                    metadata,
                }),
            )
            .await
    }

    /// Delete a storage container; `false` when it did not exist
    pub async fn delete(&self, name: &str) -> Result<bool> {
        debug!("delete container: {}", name);
        let result: BoolResult = self
            .client
            .call(
                Method::DELETE,
                ENDPOINT,
                Some(&ContainerDelete {
                    name: name.to_string(),
                }),
            )
            .await?;
        Ok(result.result)
    }

    /// Get a list of containers
    pub async fn list(&self) -> Result<Vec<ContainerInfoBase>> {
        debug!("list containers");
        self.client.call(Method::GET, ENDPOINT, None::<&()>).await
    }
}
