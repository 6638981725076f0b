//! earnbot rewards
//!
//! The reward crediting service: the only code path that changes a user's
//! balance.
//!
//! # Guarantees
//!
//! - A `(user_id, event_id)` pair is credited at most once, including under
//!   concurrent delivery of the same event.
//! - Concurrent credits for one user never lose an increment.
//! - A failed or rejected event leaves the account unchanged.
//! - Notifications are queued after the credit commits; their failure
//!   never affects the result.
//!
//! # Usage
//!
//! ```ignore
//! use earnbot_rewards::{AdOutcome, RewardService, RewardServiceConfig};
//!
//! let service = RewardService::new(store, RewardServiceConfig::default())
//!     .with_notifier(handle);
//! let result = service
//!     .credit_ad_reward("42", Some("e1"), AdOutcome::from_result("success"))
//!     .await?;
//! ```

mod dedup;
mod error;
mod message;
mod outcome;
mod service;
mod user_id;

pub use dedup::{EventKey, RecentEvents, auto_event_id};
pub use error::{Result, RewardError};
pub use message::credit_message;
pub use outcome::{AdOutcome, CreditResult, ReferralResult, RejectReason};
pub use service::{RewardService, RewardServiceConfig};
pub use user_id::{MAX_EVENT_ID_LEN, MAX_USER_ID_LEN, normalize_event_id, normalize_user_id};
