// Container Store Port (Interface)

use crate::error::Result;
use async_trait::async_trait;

/// Remote storage container operations needed by cleanup
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerStore: Send + Sync {
    /// Delete a container.
    ///
    /// Returns whether the container existed at delete time; deleting an
    /// absent container is `Ok(false)`, not an error.
    async fn delete_container(&self, name: &str) -> Result<bool>;
}
