//! `fuzzctl config`

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use fuzzctl_sdk::{BackendConfig, FuzzClient};

use crate::settings;

#[derive(Args)]
pub struct ConfigArgs {
    /// Control plane endpoint to store
    #[arg(long)]
    endpoint: Option<String>,

    /// Bearer token to store
    #[arg(long)]
    access_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Start from an empty configuration instead of the stored one
    #[arg(long)]
    reset: bool,
}

impl ConfigArgs {
    fn is_update(&self) -> bool {
        self.reset
            || self.endpoint.is_some()
            || self.access_token.is_some()
            || self.timeout_secs.is_some()
    }
}

pub async fn run(path: &Path, args: ConfigArgs) -> Result<()> {
    let mut config = if args.reset {
        BackendConfig::default()
    } else {
        settings::load_file(path)?
    };

    if !args.is_update() {
        return show(path, &config);
    }

    if let Some(endpoint) = args.endpoint {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        let probe = FuzzClient::new(BackendConfig::new(endpoint.clone()))?;
        probe
            .verify_endpoint(&endpoint)
            .await
            .with_context(|| format!("Unable to reach {}", endpoint))?;
        config.endpoint = endpoint;
    }
    if let Some(token) = args.access_token {
        config.access_token = Some(token);
    }
    if let Some(timeout) = args.timeout_secs {
        config.timeout_secs = timeout;
    }

    settings::save(path, &config)?;
    println!("{}", format!("✓ Saved {}", path.display()).green().bold());
    Ok(())
}

fn show(path: &Path, config: &BackendConfig) -> Result<()> {
    println!("{} {}", "Config file:".bold(), path.display());
    let endpoint = if config.is_configured() {
        config.endpoint.as_str().normal()
    } else {
        "(not set)".yellow()
    };
    println!("{} {}", "Endpoint:".bold(), endpoint);
    let token = if config.access_token.is_some() {
        "(set)"
    } else {
        "(not set)"
    };
    println!("{} {}", "Access token:".bold(), token);
    println!("{} {}s", "Timeout:".bold(), config.timeout_secs);
    Ok(())
}
