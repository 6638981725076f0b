//! Ledger error types

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors raised by a ledger store
///
/// Every variant means the storage is unavailable for this operation.
/// Callers should retry the whole operation later.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Reading or writing the ledger file failed
    #[error("ledger io error on '{path}': {source}")]
    Io {
        /// Path of the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// The ledger file exists but cannot be parsed
    #[error("ledger file '{path}' is corrupt: {message}")]
    Corrupt {
        /// Path of the file
        path: String,
        /// Parse error
        message: String,
    },

    /// A persist operation did not finish within the configured bound
    #[error("ledger {operation} timed out after {after:?}")]
    Timeout {
        /// Operation name
        operation: &'static str,
        /// Configured timeout
        after: Duration,
    },

    /// The writer task failed (panicked, was cancelled or has stopped)
    #[error("ledger writer task failed: {0}")]
    Task(String),
}

impl LedgerError {
    /// Create an Io error
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a Corrupt error
    pub fn corrupt(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a Timeout error
    pub fn timeout(operation: &'static str, after: Duration) -> Self {
        Self::Timeout { operation, after }
    }

    /// Copy of this error for every caller in a failed commit group
    ///
    /// `io::Error` is not `Clone`, so Io keeps its kind and message.
    pub(crate) fn replicate(&self) -> Self {
        match self {
            Self::Io { path, source } => Self::Io {
                path: path.clone(),
                source: io::Error::new(source.kind(), source.to_string()),
            },
            Self::Corrupt { path, message } => Self::corrupt(path.clone(), message.clone()),
            Self::Timeout { operation, after } => Self::timeout(operation, *after),
            Self::Task(message) => Self::Task(message.clone()),
        }
    }
}
