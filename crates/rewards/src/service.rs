//! Reward crediting service
//!
//! Sole mutation path for user accounts. Turns "ad watched" events into
//! idempotent balance updates and records referrals.
//!
//! # Crediting
//!
//! 1. Validate the user ID and event ID.
//! 2. A non-success outcome is rejected as `not_completed` with no mutation.
//! 3. Reserve `(user_id, event_id)` in the recent-events set. A reservation
//!    that already exists is a `duplicate`.
//! 4. Apply the credit inside the ledger's per-user update. The persisted
//!    `last_event_id` is checked again there, which catches a replay of the
//!    latest event after a restart.
//! 5. If storage fails, release the reservation so the event can be retried.
//! 6. Queue the balance notification after the update has committed.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use earnbot_config::RewardsConfig;
use earnbot_ledger::{LedgerStore, UserAccount};
use earnbot_notify::{Notification, NotifyHandle};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::dedup::{EventKey, RecentEvents, auto_event_id};
use crate::error::{RewardError, Result};
use crate::message::credit_message;
use crate::outcome::{AdOutcome, CreditResult, ReferralResult, RejectReason};
use crate::user_id::{normalize_event_id, normalize_user_id};

/// Reward service settings
#[derive(Debug, Clone)]
pub struct RewardServiceConfig {
    /// Amount credited per accepted ad
    pub ad_reward: Decimal,
    /// Recent-events set capacity
    pub dedup_capacity: usize,
    /// Time bucket for events without an event ID
    pub dedup_window: Duration,
}

impl Default for RewardServiceConfig {
    fn default() -> Self {
        Self::from(&RewardsConfig::default())
    }
}

impl From<&RewardsConfig> for RewardServiceConfig {
    fn from(config: &RewardsConfig) -> Self {
        Self {
            ad_reward: config.ad_reward,
            dedup_capacity: config.dedup_capacity,
            dedup_window: config.dedup_window,
        }
    }
}

/// Reward crediting service
pub struct RewardService {
    ledger: Arc<dyn LedgerStore>,
    ad_reward: Decimal,
    dedup_window: Duration,
    recent: Mutex<RecentEvents>,
    notifier: Option<NotifyHandle>,
}

impl RewardService {
    pub fn new(ledger: Arc<dyn LedgerStore>, config: RewardServiceConfig) -> Self {
        Self {
            ledger,
            ad_reward: config.ad_reward,
            dedup_window: config.dedup_window,
            recent: Mutex::new(RecentEvents::new(config.dedup_capacity)),
            notifier: None,
        }
    }

    /// Send balance notifications through `handle` after each credit
    pub fn with_notifier(mut self, handle: NotifyHandle) -> Self {
        self.notifier = Some(handle);
        self
    }

    /// Amount credited per accepted ad
    pub fn ad_reward(&self) -> Decimal {
        self.ad_reward
    }

    /// Underlying ledger
    pub fn ledger(&self) -> &Arc<dyn LedgerStore> {
        &self.ledger
    }

    /// Credit one ad-watch event
    ///
    /// # Errors
    ///
    /// `InvalidUser`/`InvalidEvent` for malformed input, `StorageUnavailable`
    /// when the ledger cannot be updated (nothing was credited; retry).
    pub async fn credit_ad_reward(
        &self,
        user_id: &str,
        event_id: Option<&str>,
        outcome: AdOutcome,
    ) -> Result<CreditResult> {
        let user_id = normalize_user_id(user_id)?;

        // Event ids are validated only for completed ads
        if outcome != AdOutcome::Success {
            info!(user_id = %user_id, "ad not completed, nothing credited");
            return Ok(CreditResult::Rejected(RejectReason::NotCompleted));
        }

        let event_id = normalize_event_id(event_id)?;

        let now = Utc::now();
        let event_id = event_id.unwrap_or_else(|| auto_event_id(&user_id, now, self.dedup_window));
        let key = EventKey::new(&user_id, &event_id);

        if !self.recent.lock().reserve(key.clone()) {
            info!(user_id = %user_id, event_id = %event_id, "duplicate reward event");
            return Ok(CreditResult::Rejected(RejectReason::Duplicate));
        }

        let reward = self.ad_reward;
        let mut replayed = false;
        let updated = self
            .ledger
            .update(
                &user_id,
                Box::new(|account: &mut UserAccount| {
                    if account.last_event_id.as_deref() == Some(event_id.as_str()) {
                        replayed = true;
                        return;
                    }
                    account.balance += reward;
                    account.ads_watched += 1;
                    account.last_ad_time = Some(now);
                    account.last_event_id = Some(event_id.clone());
                }),
            )
            .await;

        let account = match updated {
            Ok(account) => account,
            Err(e) => {
                self.recent.lock().release(&key);
                warn!(user_id = %user_id, event_id = %event_id, error = %e, "reward credit failed");
                return Err(RewardError::StorageUnavailable(e));
            }
        };
        self.recent.lock().confirm(&key);

        if replayed {
            info!(user_id = %user_id, event_id = %event_id, "reward event already applied");
            return Ok(CreditResult::Rejected(RejectReason::Duplicate));
        }

        info!(
            user_id = %user_id,
            event_id = %event_id,
            reward = %reward,
            balance = %account.balance,
            ads_watched = account.ads_watched,
            "ad reward credited"
        );

        self.notify_credit(&account, reward);

        Ok(CreditResult::Credited {
            reward,
            balance: account.balance,
            ads_watched: account.ads_watched,
        })
    }

    /// Record that `referrer_id` referred `referred_id`
    ///
    /// A user can be referred once. Registering the same pair again is a
    /// no-op that still reports `Registered`.
    pub async fn register_referral(
        &self,
        referrer_id: &str,
        referred_id: &str,
    ) -> Result<ReferralResult> {
        let referrer = normalize_user_id(referrer_id)?;
        let referred = normalize_user_id(referred_id)?;

        if referrer == referred {
            return Err(RewardError::invalid_user("a user cannot refer themselves"));
        }

        self.ledger.get_or_create(&referrer).await?;

        let referred_account = self
            .ledger
            .update(
                &referred,
                Box::new(|account: &mut UserAccount| {
                    if account.referred_by.is_none() {
                        account.referred_by = Some(referrer.clone());
                    }
                }),
            )
            .await?;

        if referred_account.referred_by.as_deref() != Some(referrer.as_str()) {
            debug!(referrer = %referrer, referred = %referred, "user already referred by someone else");
            return Ok(ReferralResult::AlreadyReferred);
        }

        let referrer_account = self
            .ledger
            .update(
                &referrer,
                Box::new(|account: &mut UserAccount| {
                    if !account.has_referral(&referred) {
                        account.referrals.push(referred.clone());
                    }
                }),
            )
            .await?;

        info!(
            referrer = %referrer,
            referred = %referred,
            referrals = referrer_account.referrals.len(),
            "referral registered"
        );

        Ok(ReferralResult::Registered {
            referrals: referrer_account.referrals.len(),
        })
    }

    /// Current account for `user_id`, created on first access
    pub async fn account(&self, user_id: &str) -> Result<UserAccount> {
        let user_id = normalize_user_id(user_id)?;
        Ok(self.ledger.get_or_create(&user_id).await?)
    }

    fn notify_credit(&self, account: &UserAccount, reward: Decimal) {
        let Some(ref handle) = self.notifier else {
            return;
        };

        let text = credit_message(reward, account.balance, account.ads_watched);
        if let Err(e) = handle.notify(Notification::new(&account.user_id, text)) {
            warn!(user_id = %account.user_id, error = %e, "balance notification dropped");
        }
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
