//! earnbot API
//!
//! HTTP surface of the reward service, built on axum.
//!
//! # Usage
//!
//! ```ignore
//! use earnbot_api::{AppState, build_router};
//!
//! let state = AppState::new(Arc::new(rewards));
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:10000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! # Endpoints
//!
//! - `GET /health` - liveness and uptime
//! - `POST /api/v1/rewards/ad` - credit a completed ad
//! - `GET /api/v1/users/{user_id}` - account view
//! - `POST /api/v1/users/{user_id}/referrals` - register a referral
//!
//! Errors and rejections share one body shape:
//! `{"status": "error", "message": "..."}`.

pub mod error;
pub mod routes;
pub mod state;
pub mod types;

pub use error::{ApiError, ErrorResponse, Result};
pub use routes::build_router;
pub use state::AppState;
pub use types::{AccountView, AdRewardRequest, AdRewardResponse, RawId};
