//! In-memory ledger store
//!
//! Used for tests and for deployments that accept losing balances on
//! restart (`[ledger] backend = "memory"`).

use async_trait::async_trait;
use chrono::Utc;

use crate::account::UserAccount;
use crate::error::Result;
use crate::store::{LedgerStore, Mutator};
use crate::table::{AccountTable, apply};

/// Ledger kept entirely in process memory
#[derive(Default)]
pub struct MemoryLedgerStore {
    table: AccountTable,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `accounts`
    pub fn with_accounts(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        Self {
            table: AccountTable::from_accounts(accounts),
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryLedgerStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, user_id: &str) -> Result<Option<UserAccount>> {
        match self.table.get(user_id) {
            Some(slot) => Ok(Some(slot.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn get_or_create(&self, user_id: &str) -> Result<UserAccount> {
        let (slot, _) = self
            .table
            .get_or_insert_with(user_id, || UserAccount::new(user_id, Utc::now()));
        let account = slot.lock().await.clone();
        Ok(account)
    }

    async fn update<'a>(&self, user_id: &str, mutator: Mutator<'a>) -> Result<UserAccount> {
        let (slot, _) = self
            .table
            .get_or_insert_with(user_id, || UserAccount::new(user_id, Utc::now()));

        let mut current = slot.lock().await;
        let next = apply(&current, mutator);
        *current = next.clone();
        Ok(next)
    }

    async fn list(&self) -> Result<Vec<UserAccount>> {
        let mut accounts = Vec::with_capacity(self.table.len());
        for slot in self.table.slots() {
            accounts.push(slot.lock().await.clone());
        }
        accounts.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(accounts)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.table.len())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
