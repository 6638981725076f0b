//! earnbot notifications
//!
//! Outbound messages to users, delivered in the background so that a slow
//! or failing messaging API never delays or fails a ledger operation.
//!
//! ```text
//! RewardService ──notify()──▶ bounded queue ──▶ Dispatcher ──▶ Notifier
//!   (never waits)                               (timeout)     (Telegram / log)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use earnbot_notify::{DispatcherConfig, LogNotifier, Notification, spawn};
//!
//! let (handle, task) = spawn(Arc::new(LogNotifier), DispatcherConfig::default());
//! let _ = handle.notify(Notification::new("42", "Balance: $3.00"));
//! handle.shutdown().await;
//! task.await?;
//! ```

mod dispatcher;
mod error;
mod notifier;
mod telegram;

pub use dispatcher::{
    DispatchSnapshot, DispatchStats, Dispatcher, DispatcherConfig, Notification, NotifyHandle,
    spawn,
};
pub use error::{NotifyError, Result};
pub use notifier::{LogNotifier, Notifier};
pub use telegram::TelegramNotifier;
