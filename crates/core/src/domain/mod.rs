// Domain Layer - Pure models and naming rules

pub mod container;
pub mod error;
pub mod identifier;
pub mod job;
pub mod naming;
pub mod task;

// Re-exports
pub use container::{ContainerName, ContainerType};
pub use error::DomainError;
pub use identifier::{is_uuid, parse_uuid, UuidExpansion};
pub use job::{Job, JobConfig, JobId, JobState, JobTaskInfo};
pub use naming::{container_name, namespaced_digest, namespaced_guid, NAMESPACE};
pub use task::{
    Os, PoolName, Task, TaskConfig, TaskContainers, TaskDebugFlag, TaskDetails, TaskId, TaskPool,
    TaskState, TaskType,
};
