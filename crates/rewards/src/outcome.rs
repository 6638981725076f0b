//! Reward and referral outcomes

use std::fmt;

use rust_decimal::Decimal;

/// What the ad webview reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdOutcome {
    Success,
    Failure,
}

impl AdOutcome {
    /// `"success"` is a success; anything else is a failure
    pub fn from_result(result: &str) -> Self {
        if result == "success" {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Why a reward event was not credited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The ad was not watched to completion
    NotCompleted,
    /// The event was already credited
    Duplicate,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotCompleted => "not_completed",
            Self::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of [`crate::RewardService::credit_ad_reward`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreditResult {
    Credited {
        reward: Decimal,
        balance: Decimal,
        ads_watched: u64,
    },
    Rejected(RejectReason),
}

impl CreditResult {
    pub fn is_credited(&self) -> bool {
        matches!(self, Self::Credited { .. })
    }
}

/// Result of [`crate::RewardService::register_referral`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferralResult {
    /// Recorded (or already recorded for the same referrer)
    Registered { referrals: usize },
    /// The referred user already belongs to another referrer
    AlreadyReferred,
}

impl ReferralResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered { .. } => "registered",
            Self::AlreadyReferred => "already_referred",
        }
    }
}
