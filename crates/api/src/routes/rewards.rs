//! Reward completion route

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, extract::State, routing::post};
use earnbot_rewards::CreditResult;

use crate::error::{ApiError, ErrorResponse, Result};
use crate::state::AppState;
use crate::types::{AdRewardRequest, AdRewardResponse, RawId};

pub fn routes() -> Router<AppState> {
    Router::new().route("/ad", post(ad_reward_handler))
}

/// POST /api/v1/rewards/ad
///
/// Credits one completed ad. Rejections (`not_completed`, `duplicate`) are
/// returned with 200 and the error body, since the request itself was
/// valid and must not be retried.
async fn ad_reward_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<AdRewardRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = body?;

    let outcome = request.outcome();
    let user_id = request
        .user_id
        .map(RawId::into_string)
        .ok_or_else(|| ApiError::bad_request("user_id required"))?;
    let event_id = request.event_id.map(RawId::into_string);

    let result = state
        .rewards
        .credit_ad_reward(&user_id, event_id.as_deref(), outcome)
        .await?;

    let response = match result {
        CreditResult::Credited {
            reward,
            balance,
            ads_watched,
        } => Json(AdRewardResponse::new(reward, balance, ads_watched)).into_response(),
        CreditResult::Rejected(reason) => Json(ErrorResponse::new(reason.as_str())).into_response(),
    };

    Ok(response)
}
