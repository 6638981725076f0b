#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use earnbot_api::{AppState, build_router};
use earnbot_ledger::{LedgerStore, MemoryLedgerStore};
use earnbot_rewards::{RewardService, RewardServiceConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub fn test_app() -> (Router, Arc<MemoryLedgerStore>) {
    let store = Arc::new(MemoryLedgerStore::new());
    (app_with_store(store.clone()), store)
}

pub fn app_with_store(store: Arc<dyn LedgerStore>) -> Router {
    let rewards = RewardService::new(store, RewardServiceConfig::default());
    build_router(AppState::new(Arc::new(rewards)))
}

pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn post_reward(app: &Router, body: &str) -> (StatusCode, Value) {
    send(app, json_request(Method::POST, "/api/v1/rewards/ad", body)).await
}
