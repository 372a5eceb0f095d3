// Candidate Source Port
// Enumerates the full identifiers a short token may expand to

use crate::error::Result;
use async_trait::async_trait;
use std::future::Future;

/// Source of the current Candidate Set for one identifier space.
///
/// Called at most once per resolution, never cached. Implemented for any
/// `Fn() -> impl Future<Output = Result<Vec<String>>>` so callers can pass a
/// closure over their own `list` call:
///
/// ```text
/// let id = resolve_uuid("job_id", token, &|| async { client.job_ids().await }).await?;
/// ```
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Full identifiers in enumeration order; must not contain duplicates
    async fn list_candidates(&self) -> Result<Vec<String>>;
}

#[async_trait]
impl<F, Fut> CandidateSource for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<String>>> + Send,
{
    async fn list_candidates(&self) -> Result<Vec<String>> {
        (self)().await
    }
}
