//! API routes

pub mod ops;
pub mod rewards;
pub mod users;

use std::any::Any;

use axum::Router;
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the complete API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Operations routes (health - no auth)
        .merge(ops::routes())
        .nest("/api/v1/rewards", rewards::routes())
        .nest("/api/v1/users", users::routes())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Turn a handler panic into the standard error body
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    tracing::error!(panic = detail, "request handler panicked");
    ApiError::Internal.into_response()
}
