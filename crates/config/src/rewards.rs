//! Reward crediting configuration

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Reward configuration
///
/// # Example
///
/// ```toml
/// [rewards]
/// ad_reward = 3.00          # credited per completed ad
/// dedup_capacity = 10000    # recently seen event ids kept in memory
/// dedup_window = "10s"      # bucket size for events without an event_id
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RewardsConfig {
    /// Amount credited for each accepted ad-watch event
    pub ad_reward: Decimal,

    /// Maximum number of `(user_id, event_id)` pairs remembered for
    /// duplicate detection
    pub dedup_capacity: usize,

    /// Events that arrive without an `event_id` are keyed by user and by
    /// this time bucket
    #[serde(with = "humantime_serde")]
    pub dedup_window: Duration,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            ad_reward: Decimal::new(300, 2),
            dedup_capacity: 10_000,
            dedup_window: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = RewardsConfig::default();
        assert_eq!(config.ad_reward, dec!(3.00));
        assert_eq!(config.dedup_capacity, 10_000);
        assert_eq!(config.dedup_window, Duration::from_secs(10));
    }

    #[test]
    fn test_reward_from_float() {
        let config: RewardsConfig = toml::from_str("ad_reward = 2.5").unwrap();
        assert_eq!(config.ad_reward, dec!(2.5));
    }

    #[test]
    fn test_reward_from_string() {
        let config: RewardsConfig = toml::from_str("ad_reward = \"0.75\"").unwrap();
        assert_eq!(config.ad_reward, dec!(0.75));
    }
}
