//! Ledger store trait
//!
//! The store is the only owner of [`UserAccount`] records. Callers read
//! snapshots and mutate through [`LedgerStore::update`], which runs the
//! mutator under a per-user lock so concurrent updates to one user are
//! serialized while different users proceed independently.

use async_trait::async_trait;

use crate::account::UserAccount;
use crate::error::Result;

/// Transformation applied to a record inside [`LedgerStore::update`]
///
/// Changes to `user_id` and `joined_date` are discarded.
pub type Mutator<'a> = Box<dyn FnOnce(&mut UserAccount) + Send + 'a>;

/// Abstract ledger storage
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Read a record without creating it
    async fn get(&self, user_id: &str) -> Result<Option<UserAccount>>;

    /// Return the existing record, or create, persist and return a fresh one
    async fn get_or_create(&self, user_id: &str) -> Result<UserAccount>;

    /// Apply `mutator` to the current record and persist the result
    ///
    /// Creates the record first if it does not exist. A mutator that leaves
    /// the record unchanged does not touch storage.
    async fn update<'a>(&self, user_id: &str, mutator: Mutator<'a>) -> Result<UserAccount>;

    /// Snapshot of all records, ordered by user ID
    async fn list(&self) -> Result<Vec<UserAccount>>;

    /// Number of records
    async fn count(&self) -> Result<usize>;
}
