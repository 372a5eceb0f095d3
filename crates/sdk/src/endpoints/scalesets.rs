//! Scalesets endpoint

use std::collections::HashMap;

use fuzzctl_core::application::resolve_uuid;
use fuzzctl_core::domain::{PoolName, UuidExpansion};
use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

use crate::client::FuzzClient;
use crate::error::{Result, SdkError};
use crate::types::{
    AutoScaleOptions, BoolResult, Scaleset, ScalesetCreate, ScalesetSearch, ScalesetState,
    ScalesetStop, ScalesetUpdate,
};

const ENDPOINT: &str = "scaleset";

/// VM size used when none is given
pub const DEFAULT_VM_SKU: &str = "Standard_D2s_v3";

/// Parameters for [`Scalesets::create`]
#[derive(Debug, Clone)]
pub struct NewScaleset {
    pub pool_name: PoolName,
    pub max_size: u64,
    /// Nodes provisioned up front; auto-scaling grows towards `max_size`
    pub initial_size: u64,
    pub image: Option<String>,
    pub vm_sku: String,
    pub region: Option<String>,
    pub spot_instances: bool,
    pub ephemeral_os_disks: bool,
    pub tags: HashMap<String, String>,
    pub auto_scale: AutoScaleOptions,
}

impl NewScaleset {
    pub fn new(pool_name: impl Into<String>, max_size: u64) -> Self {
        Self {
            pool_name: pool_name.into(),
            max_size,
            initial_size: 1,
            image: None,
            vm_sku: DEFAULT_VM_SKU.to_string(),
            region: None,
            spot_instances: false,
            ephemeral_os_disks: false,
            tags: HashMap::new(),
            auto_scale: AutoScaleOptions::for_max(max_size),
        }
    }

    fn into_request(self) -> ScalesetCreate {
        ScalesetCreate {
            pool_name: self.pool_name,
            vm_sku: self.vm_sku,
            image: self.image,
            region: self.region,
            size: self.initial_size,
            spot_instances: self.spot_instances,
            ephemeral_os_disks: self.ephemeral_os_disks,
            tags: self.tags,
            auto_scale: self.auto_scale,
        }
    }
}

/// Interact with managed scaleset pools
pub struct Scalesets<'a> {
    client: &'a FuzzClient,
}

impl<'a> Scalesets<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, new: NewScaleset) -> Result<Scaleset> {
        debug!("create scaleset");
        self.client
            .call(Method::POST, ENDPOINT, Some(&new.into_request()))
            .await
    }

    pub async fn get(&self, scaleset_id: &str, include_auth: bool) -> Result<Scaleset> {
        debug!("get scaleset: {}", scaleset_id);
        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&ScalesetSearch {
                    scaleset_id: Some(scaleset_id.to_string()),
                    state: None,
                    include_auth,
                }),
            )
            .await
    }

    pub async fn update(&self, scaleset_id: &str, size: Option<u64>) -> Result<Scaleset> {
        debug!("update scaleset: {}", scaleset_id);
        self.client
            .call(
                Method::PATCH,
                ENDPOINT,
                Some(&ScalesetUpdate {
                    scaleset_id: scaleset_id.to_string(),
                    size,
                }),
            )
            .await
    }

    pub async fn shutdown(&self, scaleset_id: &str, now: bool) -> Result<bool> {
        debug!("shutdown scaleset: {} (now: {})", scaleset_id, now);
        let result: BoolResult = self
            .client
            .call(
                Method::DELETE,
                ENDPOINT,
                Some(&ScalesetStop {
                    scaleset_id: scaleset_id.to_string(),
                    now,
                }),
            )
            .await?;
        Ok(result.result)
    }

    pub async fn list(&self, states: Option<Vec<ScalesetState>>) -> Result<Vec<Scaleset>> {
        debug!("list scalesets");
        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&ScalesetSearch {
                    scaleset_id: None,
                    state: states,
                    include_auth: false,
                }),
            )
            .await
    }

    /// Fetch a scaleset and resolve a machine ID among its nodes
    pub async fn expand_machine(
        &self,
        scaleset_id: &str,
        machine_id: impl Into<UuidExpansion>,
        include_auth: bool,
    ) -> Result<(Scaleset, Uuid)> {
        let scaleset = self.get(scaleset_id, include_auth).await?;
        let nodes = scaleset.nodes.as_deref().ok_or_else(|| {
            SdkError::Core(fuzzctl_core::AppError::MissingConfiguration(
                "no nodes defined in scaleset".to_string(),
            ))
        })?;

        let ids: Vec<String> = nodes.iter().map(|n| n.machine_id.to_string()).collect();
        let machine_id = resolve_uuid("machine_id", machine_id, &move || {
            let ids = ids.clone();
            async move { Ok::<_, fuzzctl_core::AppError>(ids) }
        })
        .await?;

        Ok((scaleset, machine_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scaleset_defaults() {
        let request = NewScaleset::new("linux-pool", 20).into_request();

        assert_eq!(request.size, 1);
        assert_eq!(request.vm_sku, "Standard_D2s_v3");
        assert_eq!(request.auto_scale.min, 0);
        assert_eq!(request.auto_scale.max, 20);
        assert_eq!(request.auto_scale.default, 20);
        assert_eq!(request.auto_scale.scale_in_cooldown, 15);
    }
}
