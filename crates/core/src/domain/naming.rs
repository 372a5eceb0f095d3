//! Deterministic container naming.
//!
//! Container names are derived from job metadata with namespaced UUIDv5
//! hashing, so the same `(project, name, build, platform)` always addresses
//! the same storage container without any lookup table. Containers already
//! exist remotely under these names: the namespace and the key reduction per
//! role must never change.

use uuid::{uuid, Uuid};

use crate::domain::container::{ContainerName, ContainerType};
use crate::domain::task::Os;

/// Root namespace for every derived name. Frozen.
pub const NAMESPACE: Uuid = uuid!("27f25e3f-6544-4b69-b309-9b096c5a9cbc");

/// Separator between identifier parts before hashing
pub const SEPARATOR: &str = ":";

/// Prefix shared by all derived container names
pub const CONTAINER_PREFIX: &str = "oft";

/// UUIDv5 of `parts` joined with `:` under [`NAMESPACE`]
pub fn namespaced_digest(parts: &[&str]) -> Uuid {
    Uuid::new_v5(&NAMESPACE, parts.join(SEPARATOR).as_bytes())
}

/// Digest over `project` plus whichever of the optional parts are present, in order
pub fn namespaced_guid(
    project: &str,
    name: Option<&str>,
    build: Option<&str>,
    platform: Option<&str>,
) -> Uuid {
    let parts: Vec<&str> = std::iter::once(project)
        .chain(name)
        .chain(build)
        .chain(platform)
        .collect();
    namespaced_digest(&parts)
}

/// Canonical container name for a role within a job.
///
/// | role                          | digest over                      |
/// |-------------------------------|----------------------------------|
/// | `setup`, `coverage`           | project, name, build, platform   |
/// | `regression_reports`          | project, name, build             |
/// | anything else                 | project, name                    |
pub fn container_name(
    role: ContainerType,
    project: &str,
    name: &str,
    build: &str,
    platform: Os,
) -> ContainerName {
    let guid = match role {
        ContainerType::Setup | ContainerType::Coverage => {
            namespaced_guid(project, Some(name), Some(build), Some(platform.name()))
        }
        ContainerType::RegressionReports => namespaced_guid(project, Some(name), Some(build), None),
        _ => namespaced_guid(project, Some(name), None, None),
    };

    format!("{}-{}-{}", CONTAINER_PREFIX, role.slug(), guid.simple())
}
