//! User account record

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Earning state of a single user
///
/// Created lazily on first interaction and never deleted. `user_id` and
/// `joined_date` are fixed at creation; stores restore them if a mutator
/// touches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Messaging platform user ID (stringified)
    pub user_id: String,

    /// Current balance, stored as a decimal string so reloads are exact
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,

    /// Number of accepted ad-watch events
    pub ads_watched: u64,

    /// Time of the most recent accepted credit
    #[serde(default)]
    pub last_ad_time: Option<DateTime<Utc>>,

    /// Users referred by this user, in referral order
    #[serde(default)]
    pub referrals: Vec<String>,

    pub joined_date: DateTime<Utc>,

    /// User who referred this user (set at most once)
    #[serde(default)]
    pub referred_by: Option<String>,

    /// Most recent accepted reward event ID
    #[serde(default)]
    pub last_event_id: Option<String>,
}

impl UserAccount {
    /// Create a fresh account with zero balance
    pub fn new(user_id: impl Into<String>, joined_date: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            balance: Decimal::ZERO,
            ads_watched: 0,
            last_ad_time: None,
            referrals: Vec::new(),
            joined_date,
            referred_by: None,
            last_event_id: None,
        }
    }

    /// Check whether `user_id` is already in this account's referrals
    pub fn has_referral(&self, user_id: &str) -> bool {
        self.referrals.iter().any(|r| r == user_id)
    }
}
