//! Nodes endpoint

use fuzzctl_core::application::resolve_uuid;
use fuzzctl_core::domain::UuidExpansion;
use fuzzctl_core::AppError;
use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

use crate::client::FuzzClient;
use crate::error::Result;
use crate::types::{BoolResult, Node, NodeAddSshKey, NodeGet, NodeSearch, NodeState, NodeUpdate};

const ENDPOINT: &str = "node";

/// Interact with nodes
pub struct Nodes<'a> {
    client: &'a FuzzClient,
}

impl<'a> Nodes<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    pub async fn resolve_id(&self, machine_id: impl Into<UuidExpansion>) -> Result<Uuid> {
        Ok(resolve_uuid("machine_id", machine_id, &move || self.candidate_ids()).await?)
    }

    async fn candidate_ids(&self) -> fuzzctl_core::Result<Vec<String>> {
        let nodes = self.list(None, None, None).await.map_err(AppError::from)?;
        Ok(nodes.into_iter().map(|n| n.machine_id.to_string()).collect())
    }

    pub async fn get(&self, machine_id: impl Into<UuidExpansion>) -> Result<Node> {
        let machine_id = self.resolve_id(machine_id).await?;
        debug!("get node: {}", machine_id);

        self.client
            .call(Method::GET, ENDPOINT, Some(&NodeGet { machine_id }))
            .await
    }

    pub async fn halt(&self, machine_id: impl Into<UuidExpansion>) -> Result<bool> {
        let machine_id = self.resolve_id(machine_id).await?;
        debug!("halt node: {}", machine_id);

        self.bool_call(Method::DELETE, ENDPOINT, &NodeGet { machine_id })
            .await
    }

    pub async fn reimage(&self, machine_id: impl Into<UuidExpansion>) -> Result<bool> {
        let machine_id = self.resolve_id(machine_id).await?;
        debug!("reimage node: {}", machine_id);

        self.bool_call(Method::PATCH, ENDPOINT, &NodeGet { machine_id })
            .await
    }

    pub async fn update(
        &self,
        machine_id: impl Into<UuidExpansion>,
        debug_keep_node: Option<bool>,
    ) -> Result<bool> {
        let machine_id = self.resolve_id(machine_id).await?;
        debug!("update node: {}", machine_id);

        self.bool_call(
            Method::POST,
            ENDPOINT,
            &NodeUpdate {
                machine_id,
                debug_keep_node,
            },
        )
        .await
    }

    pub async fn add_ssh_key(
        &self,
        machine_id: impl Into<UuidExpansion>,
        public_key: &str,
    ) -> Result<bool> {
        let machine_id = self.resolve_id(machine_id).await?;
        debug!("add ssh public key to node: {}", machine_id);

        self.bool_call(
            Method::POST,
            "node/add_ssh_key",
            &NodeAddSshKey {
                machine_id,
                public_key: public_key.to_string(),
            },
        )
        .await
    }

    /// List nodes, optionally filtered. `pool_name` may be a prefix.
    pub async fn list(
        &self,
        states: Option<Vec<NodeState>>,
        scaleset_id: Option<String>,
        pool_name: Option<&str>,
    ) -> Result<Vec<Node>> {
        debug!("list nodes");

        let pool_name = match pool_name {
            Some(name) => Some(self.client.pools().resolve_name("name", name).await?),
            None => None,
        };

        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&NodeSearch {
                    state: states,
                    scaleset_id,
                    pool_name,
                }),
            )
            .await
    }

    async fn bool_call<B: serde::Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<bool> {
        let result: BoolResult = self.client.call(method, endpoint, Some(body)).await?;
        Ok(result.result)
    }
}
