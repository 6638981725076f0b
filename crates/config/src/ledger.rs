//! Ledger storage configuration

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Storage backend for user accounts
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// Single JSON file, rewritten atomically on every mutation
    #[default]
    File,
    /// Process memory only, lost on restart
    Memory,
}

/// Ledger configuration
///
/// # Example
///
/// ```toml
/// [ledger]
/// backend = "file"            # default
/// path = "data/users.json"    # default
/// io_timeout = "5s"           # default
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub backend: LedgerBackend,

    /// Path of the JSON ledger file (file backend only)
    pub path: PathBuf,

    /// Upper bound for a single persist operation before it is reported
    /// as storage unavailable
    #[serde(with = "humantime_serde")]
    pub io_timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::File,
            path: PathBuf::from("data/users.json"),
            io_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert_eq!(config.backend, LedgerBackend::File);
        assert_eq!(config.path, PathBuf::from("data/users.json"));
        assert_eq!(config.io_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_memory_backend() {
        let toml = r#"
backend = "memory"
io_timeout = "250ms"
"#;
        let config: LedgerConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.backend, LedgerBackend::Memory);
        assert_eq!(config.io_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result: Result<LedgerConfig, _> = toml::from_str("backend = \"redis\"");
        assert!(result.is_err());
    }
}
