//! tabweave - context synchronization and AI tab organization engine.
//!
//! Main entry point for the tabweave CLI.

mod cli;
mod cmd_access;
mod cmd_browser;
mod engine;

use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::Parser;
use tracing::{debug, error, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tabweave_config::{data_dir, Config, ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.tabweave/logs/ with daily rotation.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = data_dir().join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("tabweave")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop, so it lives for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load and validate the configuration.
fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = path.unwrap_or_else(|| data_dir().join("config.toml"));
    debug!("Loading configuration from {}", path.display());
    let config = ConfigLoader::load_or_default(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let validation = ConfigValidator::validate(&config);
    for warning in &validation.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    if !validation.is_valid() {
        for err in &validation.errors {
            error!("{}: {}", err.path, err.message);
        }
        bail!("Invalid configuration in {}", path.display());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Access { action } => cmd_access::handle_access_command(action, &config).await,
        Commands::Context { snapshot, query } => {
            cmd_browser::context(&config, &snapshot, query.as_deref()).await
        }
        Commands::Organize { snapshot, output } => {
            cmd_browser::organize(&config, &snapshot, output.as_deref()).await
        }
        Commands::Tools => cmd_browser::list_tools(&config),
        Commands::Tool {
            tool_id,
            snapshot,
            params,
        } => cmd_browser::run_tool(&config, &tool_id, &snapshot, &params).await,
    }
}
