//! API request and response types

use chrono::{DateTime, Utc};
use earnbot_ledger::UserAccount;
use earnbot_rewards::AdOutcome;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier sent either as a JSON string or a JSON integer
///
/// Messaging platforms hand out integer chat IDs while other clients send
/// strings; both map to the same account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            Self::Int(id) => id.to_string(),
            Self::Text(id) => id,
        }
    }
}

/// Body of `POST /api/v1/rewards/ad`
#[derive(Debug, Deserialize)]
pub struct AdRewardRequest {
    pub user_id: Option<RawId>,
    /// Any JSON value; only the string `"success"` counts
    #[serde(default)]
    pub result: Option<Value>,
    pub event_id: Option<RawId>,
}

impl AdRewardRequest {
    pub fn outcome(&self) -> AdOutcome {
        match &self.result {
            Some(Value::String(result)) => AdOutcome::from_result(result),
            _ => AdOutcome::Failure,
        }
    }
}

/// Accepted credit
#[derive(Debug, Serialize)]
pub struct AdRewardResponse {
    pub status: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    pub reward: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub new_balance: Decimal,
    pub total_ads: u64,
}

impl AdRewardResponse {
    pub fn new(reward: Decimal, new_balance: Decimal, total_ads: u64) -> Self {
        Self {
            status: "success",
            reward,
            new_balance,
            total_ads,
        }
    }
}

/// Body of `POST /api/v1/users/{user_id}/referrals`
#[derive(Debug, Deserialize)]
pub struct ReferralRequest {
    pub referred_id: Option<RawId>,
}

#[derive(Debug, Serialize)]
pub struct ReferralResponse {
    pub status: &'static str,
    pub referrals: usize,
}

/// Public view of a user account
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub user_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub ads_watched: u64,
    pub last_ad_time: Option<DateTime<Utc>>,
    pub referrals: Vec<String>,
    pub referred_by: Option<String>,
    pub joined_date: DateTime<Utc>,
}

impl From<UserAccount> for AccountView {
    fn from(account: UserAccount) -> Self {
        Self {
            user_id: account.user_id,
            balance: account.balance,
            ads_watched: account.ads_watched,
            last_ad_time: account.last_ad_time,
            referrals: account.referrals,
            referred_by: account.referred_by,
            joined_date: account.joined_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_raw_id_accepts_string_and_integer() {
        let req: AdRewardRequest =
            serde_json::from_str(r#"{"user_id": 42, "result": "success"}"#).unwrap();
        assert_eq!(req.user_id.map(RawId::into_string).as_deref(), Some("42"));

        let req: AdRewardRequest =
            serde_json::from_str(r#"{"user_id": "42", "result": "success", "event_id": "e1"}"#)
                .unwrap();
        assert_eq!(req.user_id, Some(RawId::Text("42".into())));
        assert_eq!(req.event_id, Some(RawId::Text("e1".into())));
    }

    #[test]
    fn test_missing_fields() {
        let req: AdRewardRequest = serde_json::from_str("{}").unwrap();
        assert!(req.user_id.is_none());
        assert!(req.result.is_none());
        assert_eq!(req.outcome(), AdOutcome::Failure);
    }

    #[test]
    fn test_only_success_string_is_success() {
        let success: AdRewardRequest =
            serde_json::from_str(r#"{"user_id": 42, "result": "success"}"#).unwrap();
        assert_eq!(success.outcome(), AdOutcome::Success);

        for result in [r#""failed""#, "null", "1", "true", r#"["success"]"#, r#"{"ok": true}"#] {
            let body = format!(r#"{{"user_id": 42, "result": {result}}}"#);
            let req: AdRewardRequest = serde_json::from_str(&body).unwrap();
            assert_eq!(req.outcome(), AdOutcome::Failure, "result {result}");
        }
    }

    #[test]
    fn test_amounts_serialize_as_numbers() {
        let body = serde_json::to_value(AdRewardResponse::new(dec!(3.00), dec!(6.00), 2)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "status": "success",
                "reward": 3.0,
                "new_balance": 6.0,
                "total_ads": 2
            })
        );
    }
}
