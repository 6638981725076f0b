//! Background notification dispatcher
//!
//! Callers queue notifications through a [`NotifyHandle`] and never wait
//! for delivery. A single task drains the bounded queue and hands each
//! message to the configured [`Notifier`], bounded by a timeout. Delivery
//! failures are logged and counted, never returned to the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{NotifyError, Result};
use crate::notifier::Notifier;

/// A message for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub user_id: String,
    pub text: String,
}

impl Notification {
    pub fn new(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}

/// Dispatcher settings
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Pending notifications buffered before new ones are dropped
    pub queue_size: usize,
    /// Timeout for a single delivery
    pub timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            queue_size: 1024,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Delivery counters
#[derive(Debug, Default)]
pub struct DispatchStats {
    delivered: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSnapshot {
    pub delivered: u64,
    pub failed: u64,
    pub dropped: u64,
}

impl DispatchStats {
    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot {
            delivered: self.delivered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

enum Command {
    Send(Notification),
    Shutdown,
}

/// Handle for queueing notifications
///
/// Cheap to clone. Queueing never blocks; when the queue is full the
/// notification is dropped.
#[derive(Clone)]
pub struct NotifyHandle {
    tx: mpsc::Sender<Command>,
    stats: Arc<DispatchStats>,
}

impl NotifyHandle {
    /// Queue a notification (non-blocking, fire-and-forget)
    pub fn notify(&self, notification: Notification) -> Result<()> {
        self.tx
            .try_send(Command::Send(notification))
            .map_err(|e| {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                match e {
                    TrySendError::Full(_) => NotifyError::QueueFull,
                    TrySendError::Closed(_) => NotifyError::Closed,
                }
            })
    }

    /// Ask the dispatcher to deliver what is queued and stop
    pub async fn shutdown(&self) {
        // Closed means the dispatcher is already gone
        let _ = self.tx.send(Command::Shutdown).await;
    }

    /// Current delivery counters
    pub fn stats(&self) -> DispatchSnapshot {
        self.stats.snapshot()
    }
}

/// Notification dispatcher task
pub struct Dispatcher {
    rx: mpsc::Receiver<Command>,
    notifier: Arc<dyn Notifier>,
    timeout: Duration,
    stats: Arc<DispatchStats>,
}

impl Dispatcher {
    /// Create a dispatcher and its handle
    ///
    /// The dispatcher must be driven with [`Dispatcher::run`].
    pub fn new(notifier: Arc<dyn Notifier>, config: DispatcherConfig) -> (Self, NotifyHandle) {
        let (tx, rx) = mpsc::channel(config.queue_size.max(1));
        let stats = Arc::new(DispatchStats::default());

        let dispatcher = Self {
            rx,
            notifier,
            timeout: config.timeout,
            stats: Arc::clone(&stats),
        };

        (dispatcher, NotifyHandle { tx, stats })
    }

    /// Run until shutdown is requested or every handle is dropped
    pub async fn run(mut self) {
        info!(notifier = self.notifier.name(), "notification dispatcher started");

        while let Some(command) = self.rx.recv().await {
            match command {
                Command::Send(notification) => self.deliver(notification).await,
                Command::Shutdown => {
                    self.rx.close();
                    while let Ok(Command::Send(notification)) = self.rx.try_recv() {
                        self.deliver(notification).await;
                    }
                    break;
                }
            }
        }

        let stats = self.stats.snapshot();
        info!(
            delivered = stats.delivered,
            failed = stats.failed,
            dropped = stats.dropped,
            "notification dispatcher stopped"
        );
    }

    async fn deliver(&self, notification: Notification) {
        let send = self.notifier.send(&notification.user_id, &notification.text);

        let result = match tokio::time::timeout(self.timeout, send).await {
            Ok(result) => result,
            Err(_) => Err(NotifyError::Timeout),
        };

        match result {
            Ok(()) => {
                self.stats.delivered.fetch_add(1, Ordering::Relaxed);
                debug!(user_id = %notification.user_id, "notification sent");
            }
            Err(e) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                warn!(user_id = %notification.user_id, error = %e, "notification failed");
            }
        }
    }
}

/// Spawn a dispatcher on the current runtime
pub fn spawn(
    notifier: Arc<dyn Notifier>,
    config: DispatcherConfig,
) -> (NotifyHandle, JoinHandle<()>) {
    let (dispatcher, handle) = Dispatcher::new(notifier, config);
    let task = tokio::spawn(dispatcher.run());
    (handle, task)
}

#[cfg(test)]
#[path = "dispatcher_test.rs"]
mod tests;
