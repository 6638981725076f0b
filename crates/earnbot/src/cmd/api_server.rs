//! API server startup
//!
//! Configurable via `[api_server]` in the config file.

use anyhow::{Context, Result};
use earnbot_api::{AppState, build_router};
use earnbot_config::ApiServerConfig;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Bind and start the API server; it stops when `cancel` fires
pub async fn start_api_server(
    config: &ApiServerConfig,
    state: AppState,
    cancel: CancellationToken,
) -> Result<JoinHandle<()>> {
    let mut app = build_router(state).layer(TraceLayer::new_for_http());

    if config.cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind API server to {}", addr))?;

    info!(addr = %addr, cors = config.cors, "API server listening");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
            })
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, "API server error");
            });
    });

    Ok(handle)
}
