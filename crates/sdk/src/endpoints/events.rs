//! Events endpoint

use fuzzctl_core::application::resolve_uuid;
use fuzzctl_core::domain::UuidExpansion;
use reqwest::Method;
use tracing::debug;

use crate::client::FuzzClient;
use crate::error::Result;
use crate::types::{EventGet, EventGetResponse};

const ENDPOINT: &str = "events";

/// Look up delivered events
pub struct Events<'a> {
    client: &'a FuzzClient,
}

impl<'a> Events<'a> {
    pub(crate) fn new(client: &'a FuzzClient) -> Self {
        Self { client }
    }

    /// Payload of one event.
    ///
    /// Events cannot be listed, so the candidate set is empty: a full ID
    /// resolves, a prefix is reported as not found.
    pub async fn get(&self, event_id: impl Into<UuidExpansion>) -> Result<EventGetResponse> {
        let no_listing = || async { Ok::<Vec<String>, fuzzctl_core::AppError>(Vec::new()) };
        let event_id = resolve_uuid("event_id", event_id, &no_listing).await?;
        debug!("get event: {}", event_id);

        self.client
            .call(Method::GET, ENDPOINT, Some(&EventGet { event_id }))
            .await
    }
}
