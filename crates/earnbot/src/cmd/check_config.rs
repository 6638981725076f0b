//! Check-config command - validate configuration and print a summary

use std::path::Path;

use anyhow::Result;
use earnbot_config::Config;

use crate::cmd::load_config;

/// Run the check-config command
pub fn run(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    println!("{}", summary(&config));
    println!("configuration OK");
    Ok(())
}

fn summary(config: &Config) -> String {
    let token = if config.notify.resolved_token().is_some() {
        "set"
    } else {
        "not set"
    };

    format!(
        "log:        {} ({:?})\n\
         api_server: {} (cors: {})\n\
         ledger:     {:?} at {} (io timeout {:?})\n\
         rewards:    {} per ad, dedup {} events / {:?} window\n\
         notify:     enabled={} token {} queue {}",
        config.log.level.as_str(),
        config.log.format,
        config.api_server.bind_addr(),
        config.api_server.cors,
        config.ledger.backend,
        config.ledger.path.display(),
        config.ledger.io_timeout,
        config.rewards.ad_reward,
        config.rewards.dedup_capacity,
        config.rewards.dedup_window,
        config.notify.enabled,
        token,
        config.notify.queue_size,
    )
}
