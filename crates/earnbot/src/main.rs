//! earnbot - ad-reward earning bot backend
//!
//! # Usage
//!
//! ```bash
//! # Run the server (default)
//! earnbot
//! earnbot --config configs/earnbot.toml
//!
//! # Inspect the ledger
//! earnbot account 42
//! earnbot account --all
//!
//! # Validate a config file
//! earnbot check-config --config configs/earnbot.toml
//! ```

mod cmd;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use earnbot_config::{Config, LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// earnbot - ad-reward earning bot backend
#[derive(Parser, Debug)]
#[command(name = "earnbot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true, env = "EARNBOT_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve,

    /// Print accounts from the ledger as JSON
    Account(cmd::account::AccountArgs),

    /// Validate the configuration and print a summary
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        // No subcommand = run server
        Some(Command::Serve) | None => {
            let (level, log) = resolve_log_config(cli.log_level.as_deref(), config_path);
            init_logging(&level, &log)?;
            let config = cmd::load_config(config_path)?;
            cmd::serve::run(config).await
        }
        Some(Command::Account(args)) => {
            // Account output goes to stdout, no logging
            let config = cmd::load_config(config_path)?;
            cmd::account::run(&config, args).await
        }
        Some(Command::CheckConfig) => cmd::check_config::run(config_path),
    }
}

/// Resolve log settings: CLI flag > config file > default "info"
fn resolve_log_config(cli_level: Option<&str>, config_path: Option<&Path>) -> (String, LogConfig) {
    let log = config_path
        .filter(|path| path.exists())
        .and_then(|path| Config::from_file(path).ok())
        .map(|config| config.log)
        .unwrap_or_default();

    let level = match cli_level {
        Some(level) => level.to_string(),
        None => log.level.as_str().to_string(),
    };

    (level, log)
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str, log: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(log.directives(level))
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init(),
    }

    Ok(())
}
