//! Application state shared by all handlers

use std::sync::Arc;
use std::time::Instant;

use earnbot_notify::{DispatchSnapshot, NotifyHandle};
use earnbot_rewards::RewardService;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Reward crediting service (owns the ledger)
    pub rewards: Arc<RewardService>,
    /// Notification queue, when notifications are enabled
    pub notify: Option<NotifyHandle>,
    /// Server start time for uptime
    pub started_at: Instant,
}

impl AppState {
    pub fn new(rewards: Arc<RewardService>) -> Self {
        Self {
            rewards,
            notify: None,
            started_at: Instant::now(),
        }
    }

    /// Expose notification counters on the health endpoint
    pub fn with_notify(mut self, handle: NotifyHandle) -> Self {
        self.notify = Some(handle);
        self
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn notify_stats(&self) -> Option<DispatchSnapshot> {
        self.notify.as_ref().map(NotifyHandle::stats)
    }
}
