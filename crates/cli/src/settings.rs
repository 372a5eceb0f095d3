//! Persistent CLI configuration
//!
//! Precedence, lowest first: built-in defaults, the JSON config file,
//! `FUZZCTL_*` environment variables, command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use fuzzctl_sdk::BackendConfig;
use tracing::debug;

const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "FUZZCTL";

/// Location of the config file: `--config` when given, else the per-user default
pub fn config_path(explicit: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(PathBuf::from(shellexpand::tilde(path).into_owned()));
    }

    let dirs = ProjectDirs::from("", "", "fuzzctl")
        .context("Unable to determine a configuration directory for this user")?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}

/// Load the layered configuration. `endpoint` overrides every other source.
pub fn load(path: &Path, endpoint: Option<&str>) -> Result<BackendConfig> {
    debug!(path = %path.display(), "loading config");

    let mut builder = config::Config::builder()
        .add_source(
            config::File::new(&path.to_string_lossy(), config::FileFormat::Json).required(false),
        )
        .add_source(config::Environment::with_prefix(ENV_PREFIX));

    if let Some(endpoint) = endpoint {
        builder = builder.set_override("endpoint", endpoint)?;
    }

    let settings = builder
        .build()
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    settings
        .try_deserialize::<BackendConfig>()
        .context("Invalid configuration")
}

/// Read only the file layer, ignoring the environment
pub fn load_file(path: &Path) -> Result<BackendConfig> {
    if !path.exists() {
        return Ok(BackendConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn save(path: &Path, config: &BackendConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let raw = serde_json::to_string_pretty(config)?;
    std::fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}
