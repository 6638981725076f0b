//! earnbot configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty file is a valid configuration.
//!
//! # Parsing
//!
//! ```
//! use earnbot_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[rewards]\nad_reward = 3.0").unwrap();
//! assert_eq!(config.api_server.port, 10000);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [api_server]
//! port = 10000
//!
//! [ledger]
//! path = "data/users.json"
//!
//! [rewards]
//! ad_reward = 3.00
//!
//! [notify]
//! telegram_token = "123456:ABC..."
//! ```

mod api_server;
mod error;
mod ledger;
mod logging;
mod notify;
mod rewards;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use api_server::ApiServerConfig;
pub use error::{ConfigError, Result};
pub use ledger::{LedgerBackend, LedgerConfig};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use notify::{NotifyConfig, TELEGRAM_TOKEN_ENV_VAR};
pub use rewards::RewardsConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// HTTP server
    pub api_server: ApiServerConfig,

    /// User ledger storage
    pub ledger: LedgerConfig,

    /// Reward amounts and duplicate detection
    pub rewards: RewardsConfig,

    /// Outbound user notifications
    pub notify: NotifyConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse and validate configuration from a TOML string
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        validation::validate_config(&config)?;
        Ok(config)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.log.level, LogLevel::Info);
        assert_eq!(config.api_server.port, 10000);
        assert_eq!(config.ledger.backend, LedgerBackend::File);
        assert_eq!(config.rewards.ad_reward, dec!(3.00));
        assert!(config.notify.enabled);
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[log]
level = "debug"
format = "json"

[api_server]
host = "127.0.0.1"
port = 8080
cors = true

[ledger]
backend = "memory"
io_timeout = "2s"

[rewards]
ad_reward = 1.25
dedup_capacity = 64
dedup_window = "30s"

[notify]
enabled = false
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.api_server.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.ledger.backend, LedgerBackend::Memory);
        assert_eq!(config.ledger.io_timeout, Duration::from_secs(2));
        assert_eq!(config.rewards.ad_reward, dec!(1.25));
        assert_eq!(config.rewards.dedup_capacity, 64);
        assert_eq!(config.rewards.dedup_window, Duration::from_secs(30));
        assert!(!config.notify.enabled);
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_str("[rewards\nad_reward = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api_server]\nport = 9000").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_server.port, 9000);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/nonexistent/earnbot.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
        assert!(err.to_string().contains("/nonexistent/earnbot.toml"));
    }
}
