//! Per-key account slots shared by the store implementations

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::account::UserAccount;
use crate::store::Mutator;

/// A single account behind its own async lock
pub(crate) type Slot = Arc<Mutex<UserAccount>>;

/// Map of user ID to slot
///
/// The map lock is held only for lookups and inserts, never across an
/// await. Record mutation happens under the slot lock.
#[derive(Default)]
pub(crate) struct AccountTable {
    slots: RwLock<HashMap<String, Slot>>,
}

impl AccountTable {
    pub(crate) fn from_accounts(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        let slots = accounts
            .into_iter()
            .map(|a| (a.user_id.clone(), Arc::new(Mutex::new(a))))
            .collect();

        Self {
            slots: RwLock::new(slots),
        }
    }

    pub(crate) fn get(&self, user_id: &str) -> Option<Slot> {
        self.slots.read().get(user_id).cloned()
    }

    /// Return the slot for `user_id`, inserting `make()` if absent.
    /// The flag is true when this call created the slot.
    pub(crate) fn get_or_insert_with(
        &self,
        user_id: &str,
        make: impl FnOnce() -> UserAccount,
    ) -> (Slot, bool) {
        if let Some(slot) = self.get(user_id) {
            return (slot, false);
        }

        let mut slots = self.slots.write();
        if let Some(slot) = slots.get(user_id) {
            return (Arc::clone(slot), false);
        }

        let slot = Arc::new(Mutex::new(make()));
        slots.insert(user_id.to_string(), Arc::clone(&slot));
        (slot, true)
    }

    pub(crate) fn insert(&self, account: UserAccount) -> Slot {
        let user_id = account.user_id.clone();
        let slot = Arc::new(Mutex::new(account));
        self.slots.write().insert(user_id, Arc::clone(&slot));
        slot
    }

    pub(crate) fn slots(&self) -> Vec<Slot> {
        self.slots.read().values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.read().len()
    }
}

/// Run `mutator` on a copy of `current`, keeping the immutable fields
pub(crate) fn apply(current: &UserAccount, mutator: Mutator<'_>) -> UserAccount {
    let mut next = current.clone();
    mutator(&mut next);
    next.user_id.clone_from(&current.user_id);
    next.joined_date = current.joined_date;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_get_or_insert_creates_once() {
        let table = AccountTable::default();
        let now = Utc::now();

        let (_, created) = table.get_or_insert_with("1", || UserAccount::new("1", now));
        assert!(created);

        let (_, created) = table.get_or_insert_with("1", || UserAccount::new("1", now));
        assert!(!created);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_apply_keeps_immutable_fields() {
        let now = Utc::now();
        let current = UserAccount::new("1", now);

        let next = apply(
            &current,
            Box::new(|a| {
                a.user_id = "other".to_string();
                a.joined_date = now + Duration::days(1);
                a.ads_watched = 5;
            }),
        );

        assert_eq!(next.user_id, "1");
        assert_eq!(next.joined_date, now);
        assert_eq!(next.ads_watched, 5);
    }

    #[test]
    fn test_insert_keys_by_user_id() {
        let table = AccountTable::default();
        table.insert(UserAccount::new("abc", Utc::now()));
        assert!(table.get("abc").is_some());
    }
}
