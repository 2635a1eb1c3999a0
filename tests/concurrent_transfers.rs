//! Concurrent access tests for the ledger.
//!
//! These tests verify that:
//! - Concurrent transfers on the same pair of accounts lose no updates
//! - Snapshot reads never observe half of a transfer
//! - Total balance is conserved under mixed concurrent traffic

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rusty_remit::{Account, LedgerStore, TransferEngine, TransferRequest};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn mark_and_jane() -> Arc<LedgerStore> {
    Arc::new(LedgerStore::new([
        Account::new("Mark", dec!(100)),
        Account::new("Jane", dec!(50)),
    ]))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_fifty_concurrent_transfers() {
    let store = mark_and_jane();
    let engine = Arc::new(TransferEngine::new(Arc::clone(&store)));

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                engine.execute_transfer(&TransferRequest::new("Mark", "Jane", dec!(1)))
            })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert!(response.success);
    }

    let accounts = engine.get_all_accounts();
    assert_eq!(accounts["Mark"].balance, dec!(50));
    assert_eq!(accounts["Jane"].balance, dec!(100));
}

#[test]
fn test_snapshot_never_sees_partial_transfer() {
    let store = mark_and_jane();
    let done = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    let (from, to) = if i % 2 == 0 {
                        ("Mark", "Jane")
                    } else {
                        ("Jane", "Mark")
                    };
                    let _ = store.transfer(from, to, dec!(0.5));
                }
            })
        })
        .collect();

    let reader = {
        let store = Arc::clone(&store);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut reads = 0u64;
            loop {
                let accounts = store.get_all_accounts();
                let total: Decimal = accounts.values().map(|a| a.balance).sum();
                assert_eq!(total, dec!(150));
                reads += 1;
                if done.load(Ordering::Acquire) {
                    return reads;
                }
            }
        })
    };

    for writer in writers {
        writer.join().unwrap();
    }
    done.store(true, Ordering::Release);
    assert!(reader.join().unwrap() > 0);
}

#[test]
fn test_mixed_traffic_conserves_total() {
    let store = Arc::new(LedgerStore::new(
        (0..10).map(|i| Account::new(format!("acc{i}"), dec!(1000))),
    ));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for n in 0..1000usize {
                    let from = format!("acc{}", (t + n) % 10);
                    let to = format!("acc{}", (t * 3 + n * 7) % 10);
                    let amount = Decimal::new(((n % 50) as i64) * 100 + 1, 2);
                    let _ = store.transfer(&from, &to, amount);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let accounts = store.get_all_accounts();
    let total: Decimal = accounts.values().map(|a| a.balance).sum();
    assert_eq!(total, dec!(10000));
    assert!(accounts.values().all(|a| a.balance >= Decimal::ZERO));
}
