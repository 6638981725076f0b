//! Operations routes
//!
//! Health check for load balancers and monitoring. No authentication.

use axum::{Json, Router, extract::State, routing::get};
use earnbot_notify::DispatchSnapshot;
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
    /// Notification counters (only when notifications are enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<DispatchSnapshot>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

/// GET /health
///
/// Always returns 200 OK while the server is running.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: state.uptime_secs(),
        notifications: state.notify_stats(),
    })
}
