//! fuzzctl - command-line client for the fuzzing orchestration control plane

mod commands;
mod output;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fuzzctl_sdk::FuzzClient;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    ConfigArgs, ContainersCommand, EventsCommand, InstanceConfigCommand, JobsCommand,
    NodesCommand, NotificationsCommand, PoolsCommand, ScalesetsCommand, TasksCommand,
    UtilsCommand, VersionsCommand, WebhooksCommand,
};

#[derive(Parser)]
#[command(name = "fuzzctl")]
#[command(about = "Fuzzing orchestration control plane CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: per-user config directory)
    #[arg(long, global = true, env = "FUZZCTL_CONFIG")]
    config: Option<String>,

    /// Control plane endpoint, overriding the config file
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interact with jobs
    #[command(subcommand)]
    Jobs(JobsCommand),

    /// Interact with tasks
    #[command(subcommand)]
    Tasks(TasksCommand),

    /// Interact with storage containers
    #[command(subcommand)]
    Containers(ContainersCommand),

    /// Interact with worker pools
    #[command(subcommand)]
    Pools(PoolsCommand),

    /// Interact with nodes
    #[command(subcommand)]
    Nodes(NodesCommand),

    /// Interact with managed scaleset pools
    #[command(subcommand)]
    Scalesets(ScalesetsCommand),

    /// Interact with webhooks
    #[command(subcommand)]
    Webhooks(WebhooksCommand),

    /// Interact with notification integrations
    #[command(subcommand)]
    Notifications(NotificationsCommand),

    /// Look up delivered events
    #[command(subcommand)]
    Events(EventsCommand),

    /// Read or replace the instance configuration
    #[command(subcommand)]
    InstanceConfig(InstanceConfigCommand),

    /// Check service and client version compatibility
    #[command(subcommand)]
    Versions(VersionsCommand),

    /// Offline helpers
    #[command(subcommand)]
    Utils(UtilsCommand),

    /// Show or change the stored configuration
    Config(ConfigArgs),

    /// Show service information
    Info,
}

fn init_tracing(verbose: u8) {
    let log_format = std::env::var("FUZZCTL_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let default_level = match verbose {
        0 => "fuzzctl=warn",
        1 => "fuzzctl=info",
        _ => "fuzzctl=debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = settings::config_path(cli.config.as_deref())?;

    // Commands that need no configured endpoint
    match cli.command {
        Commands::Config(args) => return commands::config::run(&config_path, args).await,
        Commands::Utils(command) => return commands::utils::run(command),
        _ => {}
    }

    let config = settings::load(&config_path, cli.endpoint.as_deref())?;
    let client = FuzzClient::new(config)?;
    let as_json = cli.json;

    match cli.command {
        Commands::Jobs(command) => commands::jobs::run(&client, command, as_json).await,
        Commands::Tasks(command) => commands::tasks::run(&client, command, as_json).await,
        Commands::Containers(command) => {
            commands::containers::run(&client, command, as_json).await
        }
        Commands::Pools(command) => commands::pools::run(&client, command, as_json).await,
        Commands::Nodes(command) => commands::nodes::run(&client, command, as_json).await,
        Commands::Scalesets(command) => {
            commands::scalesets::run(&client, command, as_json).await
        }
        Commands::Webhooks(command) => commands::webhooks::run(&client, command, as_json).await,
        Commands::Notifications(command) => {
            commands::notifications::run(&client, command, as_json).await
        }
        Commands::Events(command) => commands::instance::events(&client, command).await,
        Commands::InstanceConfig(command) => {
            commands::instance::instance_config(&client, command).await
        }
        Commands::Versions(command) => commands::instance::versions(&client, command).await,
        Commands::Info => output::json(&client.info().await?),
        Commands::Config(_) | Commands::Utils(_) => Ok(()),
    }
}
