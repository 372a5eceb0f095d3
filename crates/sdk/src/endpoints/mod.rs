// Endpoint groups - one typed wrapper per control-plane resource

pub mod containers;
pub mod events;
pub mod instance_config;
pub mod jobs;
pub mod nodes;
pub mod notifications;
pub mod pools;
pub mod scalesets;
pub mod tasks;
pub mod versions;
pub mod webhooks;

pub use containers::Containers;
pub use events::Events;
pub use instance_config::InstanceConfigs;
pub use jobs::Jobs;
pub use nodes::Nodes;
pub use notifications::Notifications;
pub use pools::Pools;
pub use scalesets::{NewScaleset, Scalesets, DEFAULT_VM_SKU};
pub use tasks::{trim_options, NewTask, Tasks};
pub use versions::{check_compatible, Versions, CLIENT_VERSION};
pub use webhooks::Webhooks;
