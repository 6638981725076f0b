//! earnbot ledger
//!
//! Durable mapping from user ID to [`UserAccount`].
//!
//! # Stores
//!
//! | Store | Durability | Use |
//! |-------|------------|-----|
//! | [`FileLedgerStore`] | JSON file, atomic rename | production |
//! | [`MemoryLedgerStore`] | none | tests, throwaway deployments |
//!
//! Both give the same guarantees: `update` runs under a per-user lock, so
//! two concurrent updates to one user never lose an increment, and updates
//! to different users do not wait on each other's record locks.
//!
//! # Usage
//!
//! ```ignore
//! use earnbot_ledger::{FileLedgerStore, LedgerStore};
//!
//! let store = FileLedgerStore::open("data/users.json", Duration::from_secs(5))?;
//! let account = store
//!     .update("42", Box::new(|a| a.ads_watched += 1))
//!     .await?;
//! ```

mod account;
mod error;
mod file;
mod memory;
mod store;
mod table;

pub use account::UserAccount;
pub use error::{LedgerError, Result};
pub use file::FileLedgerStore;
pub use memory::MemoryLedgerStore;
pub use store::{LedgerStore, Mutator};
