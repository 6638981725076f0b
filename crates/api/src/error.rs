//! API error types
//!
//! Every error is returned as `{"status": "error", "message": ...}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use earnbot_rewards::RewardError;
use serde::Serialize;
use thiserror::Error;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid request field
    #[error("{0}")]
    BadRequest(String),

    /// Body is not valid JSON for the endpoint
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Ledger cannot be reached; the client should retry
    #[error("storage unavailable, try again later")]
    StorageUnavailable,

    /// Internal server error
    #[error("internal error")]
    Internal,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<RewardError> for ApiError {
    fn from(err: RewardError) -> Self {
        match err {
            RewardError::InvalidUser(message) | RewardError::InvalidEvent(message) => {
                Self::BadRequest(message)
            }
            RewardError::StorageUnavailable(e) => {
                tracing::error!(error = %e, "ledger unavailable");
                Self::StorageUnavailable
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

/// Body shared by error responses and business rejections
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `"error"`
    pub status: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(self.to_string());

        tracing::warn!(
            error_message = %body.message,
            status = %status,
            "API error"
        );

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use earnbot_ledger::LedgerError;
    use std::time::Duration;

    #[test]
    fn test_reward_error_mapping() {
        let err = ApiError::from(RewardError::invalid_user("user_id required"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "user_id required");

        let err = ApiError::from(RewardError::from(LedgerError::timeout(
            "persist",
            Duration::from_secs(5),
        )));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!err.to_string().contains("persist"));
    }
}
