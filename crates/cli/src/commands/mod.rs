// Subcommands, one module per resource group

pub mod config;
pub mod containers;
pub mod instance;
pub mod jobs;
pub mod nodes;
pub mod notifications;
pub mod pools;
pub mod scalesets;
pub mod tasks;
pub mod utils;
pub mod webhooks;

pub use config::ConfigArgs;
pub use containers::ContainersCommand;
pub use instance::{EventsCommand, InstanceConfigCommand, VersionsCommand};
pub use jobs::JobsCommand;
pub use nodes::NodesCommand;
pub use notifications::NotificationsCommand;
pub use pools::PoolsCommand;
pub use scalesets::ScalesetsCommand;
pub use tasks::TasksCommand;
pub use utils::UtilsCommand;
pub use webhooks::WebhooksCommand;

/// Parse a `KEY=VALUE` argument
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", s))?;
    if key.is_empty() {
        return Err(format!("empty key in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}
