//! JSON file ledger store
//!
//! Keeps every account in memory behind a per-user lock and mirrors the
//! committed state to a single human-readable JSON file. Every mutation
//! rewrites the whole file through a temp file and an atomic rename, so a
//! crash leaves either the old or the new file, never a truncated one.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "users": {
//!     "42": {
//!       "user_id": "42",
//!       "balance": "6.00",
//!       "ads_watched": 2,
//!       "last_ad_time": "2026-10-17T12:00:00Z",
//!       "referrals": [],
//!       "joined_date": "2026-10-17T11:58:00Z",
//!       "referred_by": null,
//!       "last_event_id": "e2"
//!     }
//!   }
//! }
//! ```
//!
//! # Writes
//!
//! One writer task owns the file. An update sends its new record with a
//! oneshot acknowledgement and waits; the writer folds every change queued
//! at that moment into one temp-file write, fsync and rename, then answers
//! them all. A failed write fails the whole group and no in-memory record
//! changes. Per-user slot locks serialize updates to one record; different
//! users only share the writer queue.
//!
//! [`FileLedgerStore::open`] spawns the writer, so it must be called from
//! inside a tokio runtime.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::account::UserAccount;
use crate::error::{LedgerError, Result};
use crate::store::{LedgerStore, Mutator};
use crate::table::{AccountTable, Slot, apply};

/// File format version
const FORMAT_VERSION: u32 = 1;

/// Pending commits the writer queue holds before senders wait
const COMMIT_QUEUE_SIZE: usize = 1024;

/// Most changes folded into a single file write
const MAX_GROUP_SIZE: usize = 512;

/// On-disk layout
#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    version: u32,
    users: BTreeMap<String, UserAccount>,
}

/// Ledger persisted to a JSON file
pub struct FileLedgerStore {
    path: PathBuf,
    table: AccountTable,
    writer: WriterHandle,
    /// Held only while a new record is created and persisted
    create_lock: tokio::sync::Mutex<()>,
}

impl FileLedgerStore {
    /// Open the ledger at `path`, loading existing records
    ///
    /// A missing file is an empty ledger; the file is created on the first
    /// write. Fails with [`LedgerError::Task`] outside a tokio runtime.
    pub fn open(path: impl Into<PathBuf>, io_timeout: Duration) -> Result<Self> {
        let path = path.into();
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| LedgerError::Task(format!("cannot start ledger writer: {e}")))?;
        let users = load_file(&path)?;

        info!(
            path = %path.display(),
            accounts = users.len(),
            "ledger opened"
        );

        let table = AccountTable::from_accounts(users.values().cloned());
        let (writer, handle) = Writer::new(path.clone(), io_timeout, users);
        runtime.spawn(writer.run());

        Ok(Self {
            path,
            table,
            writer: handle,
            create_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of file writes completed since open
    pub fn groups_written(&self) -> u64 {
        self.writer.groups_written()
    }

    /// Create and persist a fresh record, or return the slot another
    /// creator won with.
    async fn create(&self, user_id: &str) -> Result<Slot> {
        let _create = self.create_lock.lock().await;

        // Only creators insert into the table and all of them hold the
        // create lock, so this re-check is authoritative.
        if let Some(slot) = self.table.get(user_id) {
            return Ok(slot);
        }

        let account = UserAccount::new(user_id, Utc::now());
        if let Err(e) = self.writer.commit(account.clone()).await {
            warn!(user_id, error = %e, "failed to persist new account");
            return Err(e);
        }

        debug!(user_id, "account created");
        Ok(self.table.insert(account))
    }

    async fn slot(&self, user_id: &str) -> Result<Slot> {
        match self.table.get(user_id) {
            Some(slot) => Ok(slot),
            None => self.create(user_id).await,
        }
    }
}

#[async_trait]
impl LedgerStore for FileLedgerStore {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn get(&self, user_id: &str) -> Result<Option<UserAccount>> {
        match self.table.get(user_id) {
            Some(slot) => Ok(Some(slot.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn get_or_create(&self, user_id: &str) -> Result<UserAccount> {
        let slot = self.slot(user_id).await?;
        let account = slot.lock().await.clone();
        Ok(account)
    }

    async fn update<'a>(&self, user_id: &str, mutator: Mutator<'a>) -> Result<UserAccount> {
        let slot = self.slot(user_id).await?;
        let mut current = slot.lock_owned().await;

        let next = apply(&current, mutator);
        if next == *current {
            return Ok(next);
        }

        // Finished in its own task so a dropped caller cannot leave the
        // slot behind the file
        let writer = self.writer.clone();
        let user_id = user_id.to_string();
        tokio::spawn(async move {
            if let Err(e) = writer.commit(next.clone()).await {
                warn!(user_id = %user_id, error = %e, "failed to persist account update");
                return Err(e);
            }
            *current = next.clone();
            Ok(next)
        })
        .await
        .map_err(|e| LedgerError::Task(e.to_string()))?
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

/// One record waiting to be written
struct Commit {
    account: UserAccount,
    ack: oneshot::Sender<Result<()>>,
}

/// Sending side of the writer queue
#[derive(Clone)]
struct WriterHandle {
    tx: mpsc::Sender<Commit>,
    groups: Arc<AtomicU64>,
}

impl WriterHandle {
    /// Queue `account` and wait until the file holding it is on disk
    async fn commit(&self, account: UserAccount) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.tx
            .send(Commit { account, ack })
            .await
            .map_err(|_| writer_stopped())?;
        done.await.map_err(|_| writer_stopped())?
    }

    fn groups_written(&self) -> u64 {
        self.groups.load(Ordering::Relaxed)
    }
}

fn writer_stopped() -> LedgerError {
    LedgerError::Task("ledger writer stopped".to_string())
}

/// Writer task state: the file path and the last snapshot on disk
struct Writer {
    rx: mpsc::Receiver<Commit>,
    path: PathBuf,
    io_timeout: Duration,
    committed: BTreeMap<String, UserAccount>,
    groups: Arc<AtomicU64>,
}

impl Writer {
    fn new(
        path: PathBuf,
        io_timeout: Duration,
        committed: BTreeMap<String, UserAccount>,
    ) -> (Self, WriterHandle) {
        let (tx, rx) = mpsc::channel(COMMIT_QUEUE_SIZE);
        let groups = Arc::new(AtomicU64::new(0));
        let writer = Self {
            rx,
            path,
            io_timeout,
            committed,
            groups: Arc::clone(&groups),
        };
        (writer, WriterHandle { tx, groups })
    }

    /// Run until every handle is dropped
    async fn run(mut self) {
        while let Some(first) = self.rx.recv().await {
            let mut group = vec![first];
            while group.len() < MAX_GROUP_SIZE {
                match self.rx.try_recv() {
                    Ok(commit) => group.push(commit),
                    Err(_) => break,
                }
            }

            let mut next = self.committed.clone();
            for commit in &group {
                next.insert(commit.account.user_id.clone(), commit.account.clone());
            }

            let (result, abandoned) = self.write(next.clone()).await;
            match &result {
                Ok(()) => {
                    self.committed = next;
                    self.groups.fetch_add(1, Ordering::Relaxed);
                    debug!(changes = group.len(), "ledger group committed");
                }
                Err(e) => warn!(changes = group.len(), error = %e, "ledger group failed"),
            }

            for commit in group {
                let reply = match &result {
                    Ok(()) => Ok(()),
                    Err(e) => Err(e.replicate()),
                };
                // The caller may have gone away
                let _ = commit.ack.send(reply);
            }

            if let Some(task) = abandoned {
                self.reconcile(task).await;
            }
        }

        debug!("ledger writer stopped");
    }

    /// Write `users` on the blocking pool, bounded by the io timeout
    ///
    /// On timeout the still-running write is handed back so the caller can
    /// wait for it after answering the group.
    async fn write(
        &self,
        users: BTreeMap<String, UserAccount>,
    ) -> (Result<()>, Option<JoinHandle<Result<()>>>) {
        let path = self.path.clone();
        let mut task = tokio::task::spawn_blocking(move || write_file(&path, users));

        match tokio::time::timeout(self.io_timeout, &mut task).await {
            Ok(Ok(result)) => (result, None),
            Ok(Err(join_err)) => (Err(LedgerError::Task(join_err.to_string())), None),
            Err(_) => (
                Err(LedgerError::timeout("persist", self.io_timeout)),
                Some(task),
            ),
        }
    }

    /// Wait out an abandoned write; if it landed, put the committed
    /// snapshot back so the file never holds records that were refused.
    async fn reconcile(&self, task: JoinHandle<Result<()>>) {
        if !matches!(task.await, Ok(Ok(()))) {
            return;
        }

        warn!(path = %self.path.display(), "timed-out ledger write completed late, restoring");
        // A restore that itself times out still writes the committed state
        let (result, _) = self.write(self.committed.clone()).await;
        if let Err(e) = result {
            warn!(error = %e, "failed to restore ledger file after late write");
        }
    }
}

/// Load the user map from `path`; a missing file is empty
fn load_file(path: &Path) -> Result<BTreeMap<String, UserAccount>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let shown = path.display().to_string();
    let file = File::open(path).map_err(|e| LedgerError::io(&shown, e))?;
    let ledger: LedgerFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| LedgerError::corrupt(&shown, e.to_string()))?;

    if ledger.version != FORMAT_VERSION {
        warn!(
            path = %shown,
            expected = FORMAT_VERSION,
            found = ledger.version,
            "ledger file version mismatch"
        );
    }

    let users = ledger
        .users
        .into_iter()
        .map(|(key, mut account)| {
            if account.user_id != key {
                warn!(key = %key, user_id = %account.user_id, "ledger key does not match record, using key");
                account.user_id.clone_from(&key);
            }
            (key, account)
        })
        .collect();

    Ok(users)
}

/// Write the user map to a temp file, fsync it and rename it over `path`
fn write_file(path: &Path, users: BTreeMap<String, UserAccount>) -> Result<()> {
    let shown = path.display().to_string();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| LedgerError::io(&shown, e))?;
    }

    let temp_path = temp_path(path);
    let file = File::create(&temp_path).map_err(|e| LedgerError::io(&shown, e))?;
    let mut writer = BufWriter::new(file);

    let ledger = LedgerFile {
        version: FORMAT_VERSION,
        users,
    };
    serde_json::to_writer_pretty(&mut writer, &ledger)
        .map_err(|e| LedgerError::io(&shown, e.into()))?;

    writer.flush().map_err(|e| LedgerError::io(&shown, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::io(&shown, e))?;

    fs::rename(&temp_path, path).map_err(|e| LedgerError::io(&shown, e))?;

    debug!(path = %shown, accounts = ledger.users.len(), "ledger persisted");
    Ok(())
}

/// `users.json` -> `users.json.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
