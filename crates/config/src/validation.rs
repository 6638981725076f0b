//! Configuration validation
//!
//! Rejects values that would make the service misbehave at runtime
//! rather than fail at startup: non-positive rewards, zero-sized buffers,
//! zero timeouts and a missing ledger path.

use std::time::Duration;

use rust_decimal::Decimal;

use crate::Config;
use crate::error::{ConfigError, Result};
use crate::ledger::LedgerBackend;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_api_server(config)?;
    validate_ledger(config)?;
    validate_rewards(config)?;
    validate_notify(config)?;
    Ok(())
}

fn validate_api_server(config: &Config) -> Result<()> {
    if config.api_server.port == 0 {
        return Err(ConfigError::invalid_value(
            "api_server",
            "port",
            "must be greater than 0",
        ));
    }
    Ok(())
}

fn validate_ledger(config: &Config) -> Result<()> {
    let ledger = &config.ledger;

    if ledger.backend == LedgerBackend::File && ledger.path.as_os_str().is_empty() {
        return Err(ConfigError::missing_field("ledger", "path"));
    }

    non_zero_duration("ledger", "io_timeout", ledger.io_timeout)
}

fn validate_rewards(config: &Config) -> Result<()> {
    let rewards = &config.rewards;

    if rewards.ad_reward <= Decimal::ZERO {
        return Err(ConfigError::invalid_value(
            "rewards",
            "ad_reward",
            format!("must be positive, got {}", rewards.ad_reward),
        ));
    }

    if rewards.dedup_capacity == 0 {
        return Err(ConfigError::invalid_value(
            "rewards",
            "dedup_capacity",
            "must be greater than 0",
        ));
    }

    non_zero_duration("rewards", "dedup_window", rewards.dedup_window)
}

fn validate_notify(config: &Config) -> Result<()> {
    let notify = &config.notify;

    if notify.queue_size == 0 {
        return Err(ConfigError::invalid_value(
            "notify",
            "queue_size",
            "must be greater than 0",
        ));
    }

    if !notify.api_base.starts_with("http://") && !notify.api_base.starts_with("https://") {
        return Err(ConfigError::invalid_value(
            "notify",
            "api_base",
            format!("expected an http(s) URL, got '{}'", notify.api_base),
        ));
    }

    non_zero_duration("notify", "timeout", notify.timeout)
}

fn non_zero_duration(section: &'static str, field: &'static str, value: Duration) -> Result<()> {
    if value.is_zero() {
        return Err(ConfigError::invalid_value(section, field, "must not be zero"));
    }
    Ok(())
}
