//! Serve command - run the reward service
//!
//! Startup order: ledger, notification dispatcher, reward service, HTTP
//! server. Shutdown runs in reverse: the server stops accepting requests,
//! then queued notifications are delivered.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use earnbot_api::AppState;
use earnbot_config::{Config, NotifyConfig};
use earnbot_notify::{
    DispatcherConfig, LogNotifier, Notifier, NotifyHandle, TelegramNotifier, spawn,
};
use earnbot_rewards::{RewardService, RewardServiceConfig};
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::cmd::api_server::start_api_server;
use crate::cmd::open_ledger;

/// Upper bound for each shutdown stage
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(15);

/// Run the serve command
pub async fn run(config: Config) -> Result<()> {
    info!(
        version = env!("CARGO_PKG_VERSION"),
        platform = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "earnbot starting"
    );

    if let Err(e) = run_server(config).await {
        error!(error = %e, "server error");
        return Err(e);
    }

    info!("earnbot shutdown complete");
    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    let ledger = open_ledger(&config.ledger)?;
    let accounts = ledger.count().await.context("failed to read ledger")?;
    info!(backend = ledger.name(), accounts, "ledger ready");

    let notifications = start_notifier(&config.notify);

    let mut rewards = RewardService::new(ledger, RewardServiceConfig::from(&config.rewards));
    let mut state_notify = None;
    if let Some((handle, _)) = &notifications {
        rewards = rewards.with_notifier(handle.clone());
        state_notify = Some(handle.clone());
    }

    info!(ad_reward = %rewards.ad_reward(), "reward service ready");

    let mut state = AppState::new(Arc::new(rewards));
    if let Some(handle) = state_notify {
        state = state.with_notify(handle);
    }

    let cancel = CancellationToken::new();
    let server = start_api_server(&config.api_server, state, cancel.clone()).await?;

    wait_for_shutdown().await;
    info!("shutdown signal received, stopping server...");
    cancel.cancel();

    match tokio::time::timeout(SHUTDOWN_TIMEOUT, server).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "API server task panicked"),
        Err(_) => warn!("API server did not stop within timeout"),
    }

    if let Some((handle, task)) = notifications {
        info!("delivering queued notifications...");
        handle.shutdown().await;
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "notification dispatcher panicked"),
            Err(_) => warn!("notification dispatcher did not drain within timeout"),
        }
    }

    Ok(())
}

/// Spawn the notification dispatcher if notifications are enabled
fn start_notifier(config: &NotifyConfig) -> Option<(NotifyHandle, JoinHandle<()>)> {
    if !config.enabled {
        info!("notifications disabled");
        return None;
    }

    let notifier: Arc<dyn Notifier> = match config.resolved_token() {
        Some(token) => Arc::new(TelegramNotifier::new(&config.api_base, &token, config.timeout)),
        None => {
            warn!("no bot token configured, notifications will only be logged");
            Arc::new(LogNotifier)
        }
    };

    info!(
        notifier = notifier.name(),
        queue_size = config.queue_size,
        "notification dispatcher started"
    );

    let dispatcher = DispatcherConfig {
        queue_size: config.queue_size,
        timeout: config.timeout,
    };
    Some(spawn(notifier, dispatcher))
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
