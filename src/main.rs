//! Iron Dome - alliance membership marker for Torn profile pages.
//!
//! Main entry point for the Iron Dome CLI.

mod cli;
mod cmd_list;
mod cmd_simulate;

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use irondome_config::{Config, ConfigLoader, ConfigValidator};

use cli::{Cli, Commands};
use cmd_simulate::SimulateArgs;

/// Iron Dome home directory (`~/.irondome`).
fn irondome_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".irondome")
}

fn init_tracing() -> anyhow::Result<()> {
    let log_dir = irondome_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("irondome")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The writer stops flushing once the guard drops.
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

/// Load and validate the configuration, falling back to defaults when the
/// file does not exist.
fn load_config(path: &std::path::Path) -> anyhow::Result<Config> {
    let config = ConfigLoader::load_or_default(path)?;

    let result = ConfigValidator::validate(&config);
    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !result.is_valid() {
        let details = result
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::bail!("Invalid configuration {}: {}", path.display(), details);
    }

    info!("Configuration loaded from {}", path.display());
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Resolve { format } => cmd_list::handle_resolve(&config, format).await,
        Commands::Manual { action } => cmd_list::handle_manual(&config, action).await,
        Commands::Clear => cmd_list::handle_clear(&config),
        Commands::Simulate {
            identity,
            no_container,
            delay_ms,
            navigate_to,
            paste,
            force,
            format,
        } => {
            let args = SimulateArgs {
                identity,
                no_container,
                delay_ms,
                navigate_to,
                paste,
                force,
                format,
            };
            cmd_simulate::handle_simulate(config, args).await
        }
    }
}
