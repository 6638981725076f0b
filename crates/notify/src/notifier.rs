//! Notifier trait and the log-only implementation

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;

/// Delivers a text message to a user
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notifier name for logs
    fn name(&self) -> &'static str;

    /// Send `text` to the chat identified by `user_id`
    async fn send(&self, user_id: &str, text: &str) -> Result<()>;
}

/// Notifier that only writes the message to the log
///
/// Used when no bot token is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, user_id: &str, text: &str) -> Result<()> {
        info!(user_id, text, "notification (not delivered, no bot token)");
        Ok(())
    }
}
