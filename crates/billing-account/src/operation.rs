//! Balance operations as values.
//!
//! Lets callers queue, serialize or parse operations and apply them later
//! with [`AccountBalance::apply`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::{format_amount, parse_amount};
use crate::balance::{AccountBalance, Deposit, Withdrawal};
use crate::error::{BalanceError, Result};

/// A single mutation of an [`AccountBalance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "amount", rename_all = "snake_case")]
pub enum Operation {
    AddFunds(Decimal),
    AddBonuses(Decimal),
    Withdraw(Decimal),
}

impl Operation {
    /// Short name used in the compact text form
    pub fn name(&self) -> &'static str {
        match self {
            Operation::AddFunds(_) => "add-funds",
            Operation::AddBonuses(_) => "add-bonuses",
            Operation::Withdraw(_) => "withdraw",
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Operation::AddFunds(amount)
            | Operation::AddBonuses(amount)
            | Operation::Withdraw(amount) => *amount,
        }
    }
}

/// Compact form: `withdraw:250.00`, `add-funds:100`, `add-bonuses:5`.
impl FromStr for Operation {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, amount) = s.trim().split_once(':').ok_or_else(|| {
            BalanceError::invalid_argument(
                "operation",
                format!("expected '<operation>:<amount>', got '{}'", s),
            )
        })?;
        let amount = parse_amount(amount)?;

        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "add-funds" | "deposit" => Ok(Operation::AddFunds(amount)),
            "add-bonuses" | "bonus" => Ok(Operation::AddBonuses(amount)),
            "withdraw" => Ok(Operation::Withdraw(amount)),
            other => Err(BalanceError::invalid_argument(
                "operation",
                format!("unknown operation '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name(), format_amount(self.amount()))
    }
}

/// What an applied [`Operation`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Deposited(Deposit),
    BonusesAdded { amount: Decimal },
    Withdrew(Withdrawal),
}

impl AccountBalance {
    /// Apply an operation with the same semantics as calling it directly.
    pub fn apply(&mut self, operation: &Operation) -> Result<Outcome> {
        match *operation {
            Operation::AddFunds(amount) => self.add_funds(amount).map(Outcome::Deposited),
            Operation::AddBonuses(amount) => self
                .add_bonuses(amount)
                .map(|()| Outcome::BonusesAdded { amount }),
            Operation::Withdraw(amount) => self.withdraw(amount).map(Outcome::Withdrew),
        }
    }
}
