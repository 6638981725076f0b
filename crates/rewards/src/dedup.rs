//! Recently seen reward events
//!
//! Bounded FIFO set of `(user_id, event_id)` pairs. A pair is pending from
//! `reserve` until the ledger write settles, then confirmed or released.
//! Only confirmed pairs count against the capacity and are evicted, oldest
//! first; a pending pair is never forgotten while its write is in flight.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Deduplication key for one reward event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    user_id: String,
    event_id: String,
}

impl EventKey {
    pub fn new(user_id: impl Into<String>, event_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            event_id: event_id.into(),
        }
    }
}

/// Bounded set of recently reserved event keys
#[derive(Debug)]
pub struct RecentEvents {
    capacity: usize,
    /// Confirmed keys, oldest first
    order: VecDeque<EventKey>,
    confirmed: HashSet<EventKey>,
    pending: HashSet<EventKey>,
}

impl RecentEvents {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity.min(1024)),
            confirmed: HashSet::with_capacity(capacity.min(1024)),
            pending: HashSet::new(),
        }
    }

    /// Reserve `key` as pending. Returns false if it is already pending or
    /// confirmed.
    pub fn reserve(&mut self, key: EventKey) -> bool {
        if self.contains(&key) {
            return false;
        }
        self.pending.insert(key)
    }

    /// Mark a pending `key` as applied, evicting the oldest confirmed key
    /// when full
    pub fn confirm(&mut self, key: &EventKey) {
        if !self.pending.remove(key) {
            return;
        }

        if self.order.len() >= self.capacity
            && let Some(oldest) = self.order.pop_front()
        {
            self.confirmed.remove(&oldest);
        }

        self.order.push_back(key.clone());
        self.confirmed.insert(key.clone());
    }

    /// Forget `key` so the same event can be retried
    pub fn release(&mut self, key: &EventKey) {
        if self.pending.remove(key) {
            return;
        }
        if self.confirmed.remove(key) {
            self.order.retain(|k| k != key);
        }
    }

    pub fn contains(&self, key: &EventKey) -> bool {
        self.pending.contains(key) || self.confirmed.contains(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.confirmed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Event ID for callers that did not send one: user plus time bucket
///
/// Completions from the same user inside one `window` share an ID and so
/// are credited once.
pub fn auto_event_id(user_id: &str, now: DateTime<Utc>, window: Duration) -> String {
    let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX).max(1);
    let bucket = now.timestamp_millis().div_euclid(window_ms);
    format!("auto:{}:{}", user_id, bucket)
}
