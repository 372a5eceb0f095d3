//! fuzzctl SDK - Rust Client Library
//!
//! Typed client for the fuzzing orchestration control plane. Identifiers
//! may be given as unique prefixes; they are expanded against the current
//! list of the matching resource before each call.
//!
//! # Example
//!
//! ```no_run
//! use fuzzctl_sdk::{BackendConfig, FuzzClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FuzzClient::new(BackendConfig::new("https://fuzz.example.com"))?;
//!
//!     // Preview which of the job's containers would be removed
//!     let report = client.jobs().delete_containers("8326", true, true).await?;
//!     for (name, outcome) in &report.deleted {
//!         println!("{}: {:?}", name, outcome);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod backend;
mod client;
mod config;
mod error;

pub mod endpoints;
pub mod types;

pub use client::FuzzClient;
pub use config::{BackendConfig, DEFAULT_TIMEOUT_SECS};
pub use endpoints::{NewScaleset, NewTask, CLIENT_VERSION};
pub use error::{Result, SdkError};

// Domain re-exports so callers need only one dependency
pub use fuzzctl_core::application::{CleanupPlan, CleanupReport, DeleteOutcome};
pub use fuzzctl_core::domain::{
    container_name, namespaced_guid, ContainerType, Job, JobConfig, JobState, Os, Task,
    TaskConfig, TaskState, TaskType, UuidExpansion,
};
