// Port Layer - Interfaces for the remote control plane

pub mod candidate_source;
pub mod container_store;
pub mod job_source;

// Re-exports
pub use candidate_source::CandidateSource;
pub use container_store::ContainerStore;
pub use job_source::JobSource;

#[cfg(test)]
pub use container_store::MockContainerStore;
