//! Notification error types

use thiserror::Error;

/// Result type for notification operations
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Errors that can occur while queueing or delivering a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Queue is full (non-blocking send failed)
    #[error("notification queue full, message dropped")]
    QueueFull,

    /// Dispatcher has shut down
    #[error("notification dispatcher closed")]
    Closed,

    /// Transport failure talking to the messaging API
    #[error("network error: {0}")]
    Network(String),

    /// Messaging API rejected the request
    #[error("messaging api error: HTTP {status}: {description}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error description returned by the API
        description: String,
    },

    /// Delivery took longer than the configured timeout
    #[error("notification timed out")]
    Timeout,
}

impl NotifyError {
    /// Create an Api error
    pub fn api(status: u16, description: impl Into<String>) -> Self {
        Self::Api {
            status,
            description: description.into(),
        }
    }
}

/// The request URL carries the bot token, so it is stripped before the
/// error is rendered.
impl From<reqwest::Error> for NotifyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(e.without_url().to_string())
        }
    }
}
