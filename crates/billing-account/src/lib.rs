//! Billing Account - balance of a single subscription billing account
//!
//! An account holds three kinds of money:
//!
//! - **Funds**: real money paid in by the user
//! - **Bonuses**: promotional credit granted by the system, spent first
//! - **Overdraft**: debt drawn when bonuses and funds run out, bounded by a
//!   ceiling fixed when the account is opened
//!
//! All amounts are exact decimals ([`rust_decimal::Decimal`]).
//!
//! # Quick Start
//!
//! ```
//! use billing_account::{AccountBalance, BalanceError};
//! use rust_decimal_macros::dec;
//!
//! let mut balance = AccountBalance::with_bonuses(dec!(999.00)).unwrap();
//! let err = balance.withdraw(dec!(1000.00)).unwrap_err();
//! assert!(matches!(err, BalanceError::InsufficientFunds { .. }));
//! assert_eq!(balance.bonuses(), dec!(999.00));
//! ```

pub mod amount;
pub mod balance;
pub mod error;
pub mod operation;
pub mod snapshot;

pub use balance::{AccountBalance, Deposit, Withdrawal};
pub use error::{BalanceError, Result};
pub use operation::{Operation, Outcome};
pub use snapshot::BalanceSnapshot;

pub use rust_decimal::Decimal;
