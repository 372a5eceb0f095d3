// Application Layer - Use Cases

pub mod cleanup;
pub mod resolver;

// Re-exports
pub use cleanup::{
    execute_cleanup, plan_cleanup, CleanupPlan, CleanupReport, DeleteOutcome, JobCleanupService,
};
pub use resolver::{resolve, resolve_name, resolve_uuid};
