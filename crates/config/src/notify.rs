//! Outbound notification configuration
//!
//! The bot token can come from the config file or from the
//! `EARNBOT_TELEGRAM_TOKEN` environment variable. The environment wins so
//! that the token does not need to live in a checked-in file.

use std::time::Duration;

use serde::Deserialize;

/// Environment variable for the bot token.
pub const TELEGRAM_TOKEN_ENV_VAR: &str = "EARNBOT_TELEGRAM_TOKEN";

/// Notification configuration
///
/// # Example
///
/// ```toml
/// [notify]
/// enabled = true
/// telegram_token = "123456:ABC..."
/// api_base = "https://api.telegram.org"
/// timeout = "10s"
/// queue_size = 1024
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Send balance updates to users after a credit
    pub enabled: bool,

    /// Bot API token. Without a token notifications are only logged.
    pub telegram_token: Option<String>,

    /// Bot API base URL
    pub api_base: String,

    /// Timeout for a single send
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Pending notifications buffered before new ones are dropped
    pub queue_size: usize,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            telegram_token: None,
            api_base: "https://api.telegram.org".to_string(),
            timeout: Duration::from_secs(10),
            queue_size: 1024,
        }
    }
}

impl NotifyConfig {
    /// Resolve the bot token: environment variable, then config file
    pub fn resolved_token(&self) -> Option<String> {
        if let Ok(token) = std::env::var(TELEGRAM_TOKEN_ENV_VAR) {
            let token = token.trim().to_string();
            if !token.is_empty() {
                return Some(token);
            }
        }

        self.telegram_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}
