//! Reward service error types

use earnbot_ledger::LedgerError;
use thiserror::Error;

/// Result type for reward operations
pub type Result<T> = std::result::Result<T, RewardError>;

/// Errors returned by [`crate::RewardService`]
///
/// Business rejections (not completed, duplicate, already referred) are
/// not errors; they come back as `Ok` outcomes.
#[derive(Debug, Error)]
pub enum RewardError {
    /// Missing or malformed user ID. Not retryable.
    #[error("invalid user: {0}")]
    InvalidUser(String),

    /// Malformed event ID. Not retryable.
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// Ledger could not be read or written. Retry the whole event later.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] LedgerError),
}

impl RewardError {
    /// Create an InvalidUser error
    pub fn invalid_user(message: impl Into<String>) -> Self {
        Self::InvalidUser(message.into())
    }

    /// Whether the caller may retry the same request later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_retryable() {
        assert!(!RewardError::invalid_user("empty").is_retryable());
        assert!(!RewardError::InvalidEvent("too long".into()).is_retryable());
        assert!(
            RewardError::from(LedgerError::timeout("persist", Duration::from_secs(1)))
                .is_retryable()
        );
    }

    #[test]
    fn test_storage_display() {
        let err = RewardError::from(LedgerError::Task("ledger writer stopped".into()));
        assert!(err.to_string().starts_with("storage unavailable"));
    }
}
