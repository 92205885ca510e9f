mod check_config_cmd;
mod commands_cmd;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use celestia_channels::{ChannelAdapter, DiscordAdapter};
use celestia_commands::build_default_dispatcher;
use celestia_config::defaults::DEFAULT_PREFIX;
use celestia_gateway::start_server;
use celestia_logging::init_logger;

#[derive(Parser)]
#[command(name = "celestia")]
#[command(about = "Celestia — Discord utility and moderation bot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve the liveness endpoint
    Serve {
        /// Port for the liveness endpoint (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Validate the environment and print the redacted config
    CheckConfig,
    /// List the registered commands
    Commands {
        /// Prefix to show in usage lines
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => run_server(port).await,
        Commands::CheckConfig => check_config_cmd::run(),
        Commands::Commands { prefix, json } => commands_cmd::run(&prefix, json),
    }
}

async fn run_server(port: Option<u16>) -> Result<()> {
    let mut config = celestia_config::from_env().context("loading configuration")?;
    if let Some(port) = port {
        config.port = port;
    }

    let _log_guard = init_logger(config.log_dir.as_deref(), &config.log_level);
    celestia_config::check(&config)?;
    info!(config = %celestia_config::summary(&config), "Starting Celestia");

    let dispatcher = Arc::new(build_default_dispatcher(config.prefix.clone())?);
    let addr = config.listen_addr().context("parsing liveness listen address")?;
    let adapter = DiscordAdapter::new(config.token.clone(), config.guild_id, dispatcher);

    tokio::select! {
        result = adapter.start() => result.with_context(|| format!("{} adapter stopped", adapter.name()))?,
        result = start_server(addr, shutdown_signal()) => result?,
    }

    info!("Celestia stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Could not listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
