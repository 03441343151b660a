//! Serializable view of an account balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BalanceError, Result};

/// The four balance quantities as a plain record.
///
/// A snapshot may hold any values; converting it back into an
/// [`AccountBalance`](crate::AccountBalance) re-checks every invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub funds: Decimal,
    pub bonuses: Decimal,
    pub current_overdraft: Decimal,
    pub max_overdraft: Decimal,
}

impl BalanceSnapshot {
    /// Check the balance invariants, reporting the first one broken.
    pub fn validate(&self) -> Result<()> {
        if self.funds < Decimal::ZERO {
            return Err(BalanceError::invalid_argument("funds", "Funds cannot be negative"));
        }
        if self.bonuses < Decimal::ZERO {
            return Err(BalanceError::invalid_argument(
                "bonuses",
                "Bonuses amount cannot be negative",
            ));
        }
        if self.max_overdraft < Decimal::ZERO {
            return Err(BalanceError::invalid_argument(
                "max_overdraft",
                "Maximum overdraft cannot be negative",
            ));
        }
        if self.current_overdraft < Decimal::ZERO {
            return Err(BalanceError::invalid_argument(
                "current_overdraft",
                "Current overdraft cannot be negative",
            ));
        }
        if self.current_overdraft > self.max_overdraft {
            return Err(BalanceError::invalid_argument(
                "current_overdraft",
                format!(
                    "Current overdraft {} exceeds maximum overdraft {}",
                    self.current_overdraft, self.max_overdraft
                ),
            ));
        }
        Ok(())
    }
}
