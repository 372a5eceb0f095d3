//! Notifications endpoint

use fuzzctl_core::application::resolve_uuid;
use fuzzctl_core::domain::UuidExpansion;
use fuzzctl_core::AppError;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::client::FuzzClient;
use crate::error::Result;
use crate::types::{Notification, NotificationCreate, NotificationGet, NotificationSearch};

const ENDPOINT: &str = "notifications";

/// Interact with notification integrations
pub struct Notifications<'a> {
    client: &'a FuzzClient,
}

impl<'a> Notifications<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    pub async fn resolve_id(&self, notification_id: impl Into<UuidExpansion>) -> Result<Uuid> {
        Ok(
            resolve_uuid("notification_id", notification_id, &move || self.candidate_ids())
                .await?,
        )
    }

    async fn candidate_ids(&self) -> fuzzctl_core::Result<Vec<String>> {
        let items = self.list(None).await.map_err(AppError::from)?;
        Ok(items
            .into_iter()
            .map(|n| n.notification_id.to_string())
            .collect())
    }

    /// Create a notification from an integration template
    pub async fn create(
        &self,
        container: &str,
        config: Value,
        replace_existing: bool,
    ) -> Result<Notification> {
        debug!("create notification integration: {}", container);
        self.client
            .call(
                Method::POST,
                ENDPOINT,
                Some(&NotificationCreate {
                    container: container.to_string(),
                    config,
                    replace_existing,
                }),
            )
            .await
    }

    /// Create a Teams notification integration
    pub async fn create_teams(&self, container: &str, url: &str) -> Result<Notification> {
        self.create(container, json!({ "url": url }), false).await
    }

    /// Search by ID; the service answers with a list, as for any search
    pub async fn get(
        &self,
        notification_id: impl Into<UuidExpansion>,
    ) -> Result<Vec<Notification>> {
        let notification_id = self.resolve_id(notification_id).await?;
        debug!("get notification integration: {}", notification_id);

        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&NotificationSearch {
                    container: None,
                    notification_id: Some(notification_id),
                }),
            )
            .await
    }

    /// Delete a notification integration
    pub async fn delete(&self, notification_id: impl Into<UuidExpansion>) -> Result<Notification> {
        let notification_id = self.resolve_id(notification_id).await?;
        debug!("delete notification integration: {}", notification_id);

        self.client
            .call(
                Method::DELETE,
                ENDPOINT,
                Some(&NotificationGet { notification_id }),
            )
            .await
    }

    /// List notification integrations, optionally only for some containers
    pub async fn list(&self, containers: Option<Vec<String>>) -> Result<Vec<Notification>> {
        debug!("list notification integrations");
        self.client
            .call(
                Method::GET,
                ENDPOINT,
                Some(&NotificationSearch {
                    container: containers,
                    notification_id: None,
                }),
            )
            .await
    }
}
