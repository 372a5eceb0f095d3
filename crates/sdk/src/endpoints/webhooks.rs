//! Webhooks endpoint

use fuzzctl_core::application::resolve_uuid;
use fuzzctl_core::domain::UuidExpansion;
use fuzzctl_core::AppError;
use reqwest::Method;
use tracing::debug;
use uuid::Uuid;

use crate::client::FuzzClient;
use crate::error::Result;
use crate::types::{
    BoolResult, EventPing, Webhook, WebhookCreate, WebhookGet, WebhookMessageLog, WebhookPatch,
    WebhookSearch, WebhookUpdate,
};

const ENDPOINT: &str = "webhooks";

/// Interact with webhooks
pub struct Webhooks<'a> {
    client: &'a FuzzClient,
}

impl<'a> Webhooks<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    pub async fn resolve_id(&self, webhook_id: impl Into<UuidExpansion>) -> Result<Uuid> {
        Ok(resolve_uuid("webhook_id", webhook_id, &move || self.candidate_ids()).await?)
    }

    async fn candidate_ids(&self) -> fuzzctl_core::Result<Vec<String>> {
        let hooks = self.list().await.map_err(AppError::from)?;
        Ok(hooks.into_iter().map(|h| h.webhook_id.to_string()).collect())
    }

    pub async fn get(&self, webhook_id: impl Into<UuidExpansion>) -> Result<Webhook> {
        let webhook_id = self.resolve_id(webhook_id).await?;
        debug!("getting webhook: {}", webhook_id);

        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&WebhookSearch {
                    webhook_id: Some(webhook_id),
                }),
            )
            .await
    }

    pub async fn list(&self) -> Result<Vec<Webhook>> {
        debug!("listing webhooks");
        self.client
            .call(Method::GET, ENDPOINT, Some(&WebhookSearch::default()))
            .await
    }

    pub async fn create(&self, request: &WebhookCreate) -> Result<Webhook> {
        debug!("creating webhook. name: {}", request.name);
        self.client.call(Method::POST, ENDPOINT, Some(request)).await
    }

    /// Update a webhook; only the fields set in `changes` are sent
    pub async fn update(
        &self,
        webhook_id: impl Into<UuidExpansion>,
        changes: &WebhookUpdate,
    ) -> Result<Webhook> {
        let webhook_id = self.resolve_id(webhook_id).await?;
        debug!("updating webhook: {}", webhook_id);

        self.client
            .call(Method::PATCH, ENDPOINT, Some(&WebhookPatch { webhook_id, changes }))
            .await
    }

    pub async fn delete(&self, webhook_id: impl Into<UuidExpansion>) -> Result<bool> {
        let webhook_id = self.resolve_id(webhook_id).await?;
        debug!("deleting webhook: {}", webhook_id);

        let result: BoolResult = self
            .client
            .call(Method::DELETE, ENDPOINT, Some(&WebhookGet { webhook_id }))
            .await?;
        Ok(result.result)
    }

    pub async fn ping(&self, webhook_id: impl Into<UuidExpansion>) -> Result<EventPing> {
        let webhook_id = self.resolve_id(webhook_id).await?;
        debug!("pinging webhook: {}", webhook_id);

        self.client
            .call(Method::POST, "webhooks/ping", Some(&WebhookGet { webhook_id }))
            .await
    }

    /// Delivery log of a webhook
    pub async fn logs(&self, webhook_id: impl Into<UuidExpansion>) -> Result<Vec<WebhookMessageLog>> {
        let webhook_id = self.resolve_id(webhook_id).await?;
        debug!("webhook logs: {}", webhook_id);

        self.client
            .call(Method::POST, "webhooks/logs", Some(&WebhookGet { webhook_id }))
            .await
    }
}
