use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

#[tokio::test]
async fn test_get_or_create_defaults() {
    let store = MemoryLedgerStore::new();

    let account = store.get_or_create("42").await.unwrap();
    assert_eq!(account.user_id, "42");
    assert_eq!(account.balance, Decimal::ZERO);
    assert_eq!(account.ads_watched, 0);
    assert!(account.referrals.is_empty());
}

#[tokio::test]
async fn test_get_or_create_returns_existing() {
    let store = MemoryLedgerStore::new();

    let first = store.get_or_create("42").await.unwrap();
    store
        .update("42", Box::new(|a| a.balance += dec!(3.00)))
        .await
        .unwrap();

    let second = store.get_or_create("42").await.unwrap();
    assert_eq!(second.joined_date, first.joined_date);
    assert_eq!(second.balance, dec!(3.00));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_get_does_not_create() {
    let store = MemoryLedgerStore::new();
    assert!(store.get("missing").await.unwrap().is_none());
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_creates_missing_record() {
    let store = MemoryLedgerStore::new();

    let account = store
        .update("7", Box::new(|a| a.ads_watched += 1))
        .await
        .unwrap();
    assert_eq!(account.ads_watched, 1);
    assert_eq!(store.get("7").await.unwrap().unwrap().ads_watched, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_same_user_no_lost_updates() {
    let store = Arc::new(MemoryLedgerStore::new());

    let mut handles = Vec::new();
    for _ in 0..200 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .update(
                    "hot",
                    Box::new(|a| {
                        a.balance += dec!(0.10);
                        a.ads_watched += 1;
                    }),
                )
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let account = store.get("hot").await.unwrap().unwrap();
    assert_eq!(account.ads_watched, 200);
    assert_eq!(account.balance, dec!(20.00));
}

#[tokio::test]
async fn test_list_sorted_by_user_id() {
    let store = MemoryLedgerStore::new();
    for id in ["b", "c", "a"] {
        store.get_or_create(id).await.unwrap();
    }

    let ids: Vec<_> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.user_id)
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_with_accounts() {
    let mut seeded = UserAccount::new("1", Utc::now());
    seeded.ads_watched = 9;

    let store = MemoryLedgerStore::with_accounts([seeded]);
    assert_eq!(store.get("1").await.unwrap().unwrap().ads_watched, 9);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_held_user_does_not_block_other_users() {
    let store = Arc::new(MemoryLedgerStore::new());
    store.get_or_create("a").await.unwrap();

    let (entered_tx, entered_rx) = std::sync::mpsc::channel::<()>();
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
    let held = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            store
                .update(
                    "a",
                    Box::new(move |a| {
                        entered_tx.send(()).unwrap();
                        release_rx.recv().unwrap();
                        a.ads_watched += 1;
                    }),
                )
                .await
        })
    };
    tokio::task::spawn_blocking(move || entered_rx.recv().unwrap())
        .await
        .unwrap();

    // Both an existing-record update and a new record go through
    let other = tokio::time::timeout(
        std::time::Duration::from_secs(2),
        async {
            store.get_or_create("b").await.unwrap();
            store.update("b", Box::new(|a| a.ads_watched += 1)).await
        },
    )
    .await
    .expect("update of b waited on a")
    .unwrap();
    assert_eq!(other.ads_watched, 1);

    release_tx.send(()).unwrap();
    assert_eq!(held.await.unwrap().unwrap().ads_watched, 1);
}
