//! Account lookup and referral routes

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use earnbot_rewards::ReferralResult;

use crate::error::{ApiError, ErrorResponse, Result};
use crate::state::AppState;
use crate::types::{AccountView, RawId, ReferralRequest, ReferralResponse};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", get(account_handler))
        .route("/{user_id}/referrals", post(referral_handler))
}

/// GET /api/v1/users/{user_id}
///
/// Unseen users are created with a zero balance.
async fn account_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AccountView>> {
    let account = state.rewards.account(&user_id).await?;
    Ok(Json(account.into()))
}

/// POST /api/v1/users/{user_id}/referrals
async fn referral_handler(
    State(state): State<AppState>,
    Path(referrer_id): Path<String>,
    body: std::result::Result<Json<ReferralRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = body?;

    let referred_id = request
        .referred_id
        .map(RawId::into_string)
        .ok_or_else(|| ApiError::bad_request("referred_id required"))?;

    let result = state
        .rewards
        .register_referral(&referrer_id, &referred_id)
        .await?;

    let response = match result {
        ReferralResult::Registered { referrals } => Json(ReferralResponse {
            status: "success",
            referrals,
        })
        .into_response(),
        ReferralResult::AlreadyReferred => {
            Json(ErrorResponse::new(result.as_str())).into_response()
        }
    };

    Ok(response)
}
