//! Instance configuration endpoint

use reqwest::Method;
use tracing::debug;

use crate::client::FuzzClient;
use crate::error::Result;
use crate::types::{InstanceConfig, InstanceConfigUpdate};

const ENDPOINT: &str = "instance_config";

/// Read and replace the instance-wide configuration
pub struct InstanceConfigs<'a> {
    client: &'a FuzzClient,
}

impl<'a> InstanceConfigs<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    pub async fn get(&self) -> Result<InstanceConfig> {
        debug!("get instance config");
        self.client.call(Method::GET, ENDPOINT, None::<&()>).await
    }

    /// Replace the whole configuration; returns what the service stored
    pub async fn update(&self, config: &InstanceConfig) -> Result<InstanceConfig> {
        debug!("update instance config");
        self.client
            .call(Method::POST, ENDPOINT, Some(&InstanceConfigUpdate { config }))
            .await
    }
}
