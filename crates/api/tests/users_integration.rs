//! Integration tests for account and referral endpoints

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use earnbot_ledger::LedgerStore;
use serde_json::json;

use common::{json_request, post_reward, send, test_app};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_account_view_for_new_user() {
    let (app, store) = test_app();

    let (status, body) = send(&app, get("/api/v1/users/42")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "42");
    assert_eq!(body["balance"], 0.0);
    assert_eq!(body["ads_watched"], 0);
    assert_eq!(body["referrals"], json!([]));
    assert!(body["last_ad_time"].is_null());
    assert!(body["joined_date"].is_string());

    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_account_view_after_credit() {
    let (app, _) = test_app();

    post_reward(&app, r#"{"user_id": 42, "result": "success", "event_id": "e1"}"#).await;

    let (_, body) = send(&app, get("/api/v1/users/42")).await;
    assert_eq!(body["balance"], 3.0);
    assert_eq!(body["ads_watched"], 1);
    assert!(body["last_ad_time"].is_string());
}

#[tokio::test]
async fn test_account_invalid_id() {
    let (app, _) = test_app();

    let (status, body) = send(&app, get("/api/v1/users/bad%20id")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_referral_flow() {
    let (app, store) = test_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/users/1/referrals", r#"{"referred_id": 2}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success", "referrals": 1}));

    // Same pair again
    let (_, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/users/1/referrals", r#"{"referred_id": "2"}"#),
    )
    .await;
    assert_eq!(body, json!({"status": "success", "referrals": 1}));

    // Another referrer for the same user
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/users/3/referrals", r#"{"referred_id": 2}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "error", "message": "already_referred"}));

    let referred = store.get("2").await.unwrap().unwrap();
    assert_eq!(referred.referred_by.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_referral_validation() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/v1/users/1/referrals", "{}"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "error", "message": "referred_id required"}));

    let (status, _) = send(
        &app,
        json_request(Method::POST, "/api/v1/users/1/referrals", r#"{"referred_id": 1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
