//! CLI commands

pub mod account;
pub mod api_server;
pub mod check_config;
pub mod serve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use earnbot_config::{Config, LedgerBackend, LedgerConfig};
use earnbot_ledger::{FileLedgerStore, LedgerStore, MemoryLedgerStore};
use tracing::info;

/// Config files tried, in order, when `--config` is not given
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/earnbot.toml", "earnbot.toml"];

/// Load the configuration
///
/// An explicit path must exist. Without one the default paths are tried
/// and the built-in defaults are used if none exists.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        return Config::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()));
    }

    for candidate in DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from) {
        if candidate.exists() {
            info!(config = %candidate.display(), "using config file");
            return Config::from_file(&candidate).with_context(|| {
                format!("failed to load configuration from {}", candidate.display())
            });
        }
    }

    info!("no config file found, using defaults");
    Ok(Config::default())
}

/// Open the configured ledger store
pub fn open_ledger(config: &LedgerConfig) -> Result<Arc<dyn LedgerStore>> {
    match config.backend {
        LedgerBackend::File => {
            let store = FileLedgerStore::open(&config.path, config.io_timeout)
                .with_context(|| format!("failed to open ledger {}", config.path.display()))?;
            Ok(Arc::new(store))
        }
        LedgerBackend::Memory => Ok(Arc::new(MemoryLedgerStore::new())),
    }
}
