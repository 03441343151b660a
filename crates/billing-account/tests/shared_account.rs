//! Sharing one account between threads behind a per-account lock.

use std::sync::Arc;
use std::thread;

use billing_account::{AccountBalance, BalanceError};
use parking_lot::Mutex;
use rust_decimal_macros::dec;

#[test]
fn test_locked_account_never_overspends() {
    let account = Arc::new(Mutex::new(
        AccountBalance::new(dec!(60.00), dec!(40.00)).unwrap(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let account = Arc::clone(&account);
            thread::spawn(move || {
                let mut accepted = 0u32;
                for _ in 0..25 {
                    match account.lock().withdraw(dec!(1.00)) {
                        Ok(_) => accepted += 1,
                        Err(BalanceError::InsufficientFunds { .. }) => {}
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
                accepted
            })
        })
        .collect();

    let accepted: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    let account = account.lock();
    assert_eq!(accepted, 100);
    assert_eq!(account.bonuses(), dec!(0));
    assert_eq!(account.funds(), dec!(0));
    assert_eq!(account.current_overdraft(), dec!(40.00));
    assert!(account.invariants_hold());
}

#[test]
fn test_deposits_and_withdrawals_interleave_safely() {
    let account = Arc::new(Mutex::new(
        AccountBalance::new(dec!(0), dec!(1000.00)).unwrap(),
    ));

    let spenders: Vec<_> = (0..4)
        .map(|_| {
            let account = Arc::clone(&account);
            thread::spawn(move || {
                for _ in 0..100 {
                    account.lock().withdraw(dec!(2.50)).unwrap();
                }
            })
        })
        .collect();
    let payers: Vec<_> = (0..4)
        .map(|_| {
            let account = Arc::clone(&account);
            thread::spawn(move || {
                for _ in 0..100 {
                    account.lock().add_funds(dec!(2.50)).unwrap();
                }
            })
        })
        .collect();

    for handle in spenders.into_iter().chain(payers) {
        handle.join().unwrap();
    }

    let account = account.lock();
    assert_eq!(account.funds() - account.current_overdraft(), dec!(0));
    assert!(account.invariants_hold());
}
