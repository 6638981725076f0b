//! Account command - print ledger records as JSON

use anyhow::{Context, Result};
use clap::Args;
use earnbot_config::{Config, LedgerBackend};
use earnbot_ledger::{FileLedgerStore, LedgerStore};

/// Account command arguments
#[derive(Args, Debug)]
pub struct AccountArgs {
    /// User ID to print
    #[arg(required_unless_present = "all")]
    pub user_id: Option<String>,

    /// Print every account
    #[arg(long, conflicts_with = "user_id")]
    pub all: bool,
}

/// Run the account command
///
/// Reads the ledger file without creating records.
pub async fn run(config: &Config, args: AccountArgs) -> Result<()> {
    if config.ledger.backend == LedgerBackend::Memory {
        anyhow::bail!("the memory ledger backend has no stored accounts to show");
    }

    let store = FileLedgerStore::open(&config.ledger.path, config.ledger.io_timeout)
        .with_context(|| format!("failed to open ledger {}", config.ledger.path.display()))?;

    let output = if args.all {
        serde_json::to_string_pretty(&store.list().await?)?
    } else {
        let user_id = args.user_id.unwrap_or_default();
        let user_id = user_id.trim();
        let account = store
            .get(user_id)
            .await?
            .with_context(|| format!("no account for user '{}'", user_id))?;
        serde_json::to_string_pretty(&account)?
    };

    println!("{}", output);
    Ok(())
}
