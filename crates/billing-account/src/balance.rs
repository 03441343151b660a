//! Account balance for subscription billing.
//!
//! The balance tracks three mutable quantities (bonuses, funds, current
//! overdraft) bounded by a fixed overdraft ceiling.
//!
//! # Invariants
//!
//! 1. `bonuses >= 0` and `funds >= 0`
//! 2. `0 <= current_overdraft <= max_overdraft`
//! 3. `max_overdraft` never changes after construction
//! 4. A failed operation leaves every quantity untouched
//!
//! # Ordering
//!
//! Withdrawals spend bonuses first, then funds, and only then draw on the
//! overdraft. Deposits repay the overdraft before they increase funds.
//! Bonuses never repay the overdraft.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::amount::{self, checked_add, ensure_non_negative};
use crate::error::{BalanceError, Result};
use crate::snapshot::BalanceSnapshot;

/// Breakdown of a deposit made with [`AccountBalance::add_funds`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    /// Part of the deposit that repaid the current overdraft
    pub overdraft_closed: Decimal,
    /// Part of the deposit credited to funds
    pub funds_added: Decimal,
}

/// Breakdown of a withdrawal across the three sources, in spending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub from_bonuses: Decimal,
    pub from_funds: Decimal,
    pub from_overdraft: Decimal,
}

impl Withdrawal {
    /// Total withdrawn amount
    pub fn total(&self) -> Decimal {
        self.from_bonuses + self.from_funds + self.from_overdraft
    }
}

/// Balance of a single user account.
///
/// Not internally synchronized: share it between threads behind one lock per
/// account (e.g. `Mutex<AccountBalance>`).
///
/// ```
/// use billing_account::AccountBalance;
/// use rust_decimal_macros::dec;
///
/// let mut balance = AccountBalance::new(dec!(200.00), dec!(100.00)).unwrap();
/// balance.withdraw(dec!(250.00)).unwrap();
/// assert_eq!(balance.current_overdraft(), dec!(50.00));
///
/// balance.add_funds(dec!(100.00)).unwrap();
/// assert_eq!(balance.funds(), dec!(50.00));
/// assert_eq!(balance.current_overdraft(), dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BalanceSnapshot", into = "BalanceSnapshot")]
pub struct AccountBalance {
    funds: Decimal,
    bonuses: Decimal,
    current_overdraft: Decimal,
    max_overdraft: Decimal,
}

impl AccountBalance {
    /// Open an account with initial bonuses and a fixed overdraft ceiling.
    ///
    /// Funds and current overdraft start at zero. Bonuses are validated
    /// before the ceiling; the first violation is reported.
    pub fn new(bonuses: Decimal, max_overdraft: Decimal) -> Result<Self> {
        ensure_non_negative("bonuses", bonuses, "Bonuses amount cannot be negative")?;
        ensure_non_negative(
            "max_overdraft",
            max_overdraft,
            "Maximum overdraft cannot be negative",
        )?;

        Ok(Self {
            funds: Decimal::ZERO,
            bonuses,
            current_overdraft: Decimal::ZERO,
            max_overdraft,
        })
    }

    /// Open an account with initial bonuses and no overdraft.
    pub fn with_bonuses(bonuses: Decimal) -> Result<Self> {
        Self::new(bonuses, Decimal::ZERO)
    }

    /// Real money balance
    pub fn funds(&self) -> Decimal {
        self.funds
    }

    /// Promotional credit, spent before funds
    pub fn bonuses(&self) -> Decimal {
        self.bonuses
    }

    /// Amount currently owed
    pub fn current_overdraft(&self) -> Decimal {
        self.current_overdraft
    }

    /// Credit ceiling, fixed at construction
    pub fn max_overdraft(&self) -> Decimal {
        self.max_overdraft
    }

    /// Overdraft that can still be drawn
    pub fn overdraft_headroom(&self) -> Decimal {
        self.max_overdraft - self.current_overdraft
    }

    /// Largest amount [`withdraw`](Self::withdraw) would accept right now.
    ///
    /// Saturates at [`Decimal::MAX`]; no withdrawal can exceed that anyway.
    pub fn spending_capacity(&self) -> Decimal {
        self.bonuses
            .checked_add(self.funds)
            .and_then(|sum| sum.checked_add(self.overdraft_headroom()))
            .unwrap_or(Decimal::MAX)
    }

    /// Whether the account currently owes money
    pub fn is_overdrawn(&self) -> bool {
        self.current_overdraft > Decimal::ZERO
    }

    /// Check every balance invariant
    pub fn invariants_hold(&self) -> bool {
        self.funds >= Decimal::ZERO
            && self.bonuses >= Decimal::ZERO
            && self.current_overdraft >= Decimal::ZERO
            && self.current_overdraft <= self.max_overdraft
    }

    /// Copy the four quantities into a serializable record
    pub fn snapshot(&self) -> BalanceSnapshot {
        BalanceSnapshot {
            funds: self.funds,
            bonuses: self.bonuses,
            current_overdraft: self.current_overdraft,
            max_overdraft: self.max_overdraft,
        }
    }

    /// Top up the balance.
    ///
    /// The deposit first repays the current overdraft; only the remainder
    /// becomes funds.
    pub fn add_funds(&mut self, amount: Decimal) -> Result<Deposit> {
        ensure_non_negative("amount", amount, "Added funds must be positive")?;

        let overdraft_closed = self.current_overdraft.min(amount);
        let funds_added = amount - overdraft_closed;
        let funds = checked_add("amount", self.funds, funds_added)?;

        self.current_overdraft -= overdraft_closed;
        self.funds = funds;
        debug_assert!(self.invariants_hold(), "invariant violated after add_funds");

        debug!(
            %amount,
            %overdraft_closed,
            %funds_added,
            funds = %self.funds,
            current_overdraft = %self.current_overdraft,
            "funds added"
        );

        Ok(Deposit {
            overdraft_closed,
            funds_added,
        })
    }

    /// Credit promotional bonuses. Never repays the overdraft.
    pub fn add_bonuses(&mut self, amount: Decimal) -> Result<()> {
        ensure_non_negative("amount", amount, "Added bonuses must be positive")?;

        self.bonuses = checked_add("amount", self.bonuses, amount)?;
        debug_assert!(self.invariants_hold(), "invariant violated after add_bonuses");

        debug!(%amount, bonuses = %self.bonuses, "bonuses added");
        Ok(())
    }

    /// Work out how a withdrawal would be split without applying it.
    pub fn plan_withdrawal(&self, amount: Decimal) -> Result<Withdrawal> {
        ensure_non_negative("amount", amount, "Withdrawn amount must be positive")?;

        let available = self.spending_capacity();
        if amount > available {
            return Err(BalanceError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        let from_bonuses = self.bonuses.min(amount);
        let from_funds = self.funds.min(amount - from_bonuses);
        let from_overdraft = amount - from_bonuses - from_funds;

        Ok(Withdrawal {
            from_bonuses,
            from_funds,
            from_overdraft,
        })
    }

    /// Spend from the balance: bonuses first, then funds, then overdraft.
    ///
    /// Fails with [`BalanceError::InsufficientFunds`] when the amount exceeds
    /// [`spending_capacity`](Self::spending_capacity); nothing is withdrawn
    /// in that case.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<Withdrawal> {
        let withdrawal = match self.plan_withdrawal(amount) {
            Ok(withdrawal) => withdrawal,
            Err(err) => {
                if let BalanceError::InsufficientFunds { available, .. } = &err {
                    warn!(%amount, %available, "withdrawal rejected");
                }
                return Err(err);
            }
        };

        self.bonuses -= withdrawal.from_bonuses;
        self.funds -= withdrawal.from_funds;
        self.current_overdraft += withdrawal.from_overdraft;
        debug_assert!(self.invariants_hold(), "invariant violated after withdraw");

        debug!(
            %amount,
            from_bonuses = %withdrawal.from_bonuses,
            from_funds = %withdrawal.from_funds,
            from_overdraft = %withdrawal.from_overdraft,
            "withdrawal applied"
        );

        Ok(withdrawal)
    }
}

impl Default for AccountBalance {
    fn default() -> Self {
        Self {
            funds: Decimal::ZERO,
            bonuses: Decimal::ZERO,
            current_overdraft: Decimal::ZERO,
            max_overdraft: Decimal::ZERO,
        }
    }
}

impl TryFrom<BalanceSnapshot> for AccountBalance {
    type Error = BalanceError;

    fn try_from(snapshot: BalanceSnapshot) -> Result<Self> {
        snapshot.validate()?;
        Ok(Self {
            funds: snapshot.funds,
            bonuses: snapshot.bonuses,
            current_overdraft: snapshot.current_overdraft,
            max_overdraft: snapshot.max_overdraft,
        })
    }
}

impl From<AccountBalance> for BalanceSnapshot {
    fn from(balance: AccountBalance) -> Self {
        balance.snapshot()
    }
}

impl fmt::Display for AccountBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "funds={} bonuses={} overdraft={}/{}",
            amount::format_amount(self.funds),
            amount::format_amount(self.bonuses),
            amount::format_amount(self.current_overdraft),
            amount::format_amount(self.max_overdraft),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_starts_empty() {
        let balance = AccountBalance::new(dec!(200.00), dec!(100.00)).unwrap();
        assert_eq!(balance.funds(), Decimal::ZERO);
        assert_eq!(balance.bonuses(), dec!(200.00));
        assert_eq!(balance.current_overdraft(), Decimal::ZERO);
        assert_eq!(balance.max_overdraft(), dec!(100.00));
        assert!(balance.invariants_hold());
    }

    #[test]
    fn test_default_matches_zero_terms() {
        assert_eq!(
            AccountBalance::default(),
            AccountBalance::new(Decimal::ZERO, Decimal::ZERO).unwrap()
        );
    }

    #[test]
    fn test_new_reports_first_violation() {
        let err = AccountBalance::new(dec!(-1), dec!(-1)).unwrap_err();
        assert!(matches!(err, BalanceError::InvalidArgument { field: "bonuses", .. }));

        let err = AccountBalance::new(dec!(1), dec!(-1)).unwrap_err();
        assert!(matches!(err, BalanceError::InvalidArgument { field: "max_overdraft", .. }));
    }

    #[test]
    fn test_spending_capacity() {
        let mut balance = AccountBalance::new(dec!(200.00), dec!(100.00)).unwrap();
        balance.add_funds(dec!(50.00)).unwrap();
        assert_eq!(balance.spending_capacity(), dec!(350.00));

        balance.withdraw(dec!(300.00)).unwrap();
        assert_eq!(balance.overdraft_headroom(), dec!(50.00));
        assert_eq!(balance.spending_capacity(), dec!(50.00));
        assert!(balance.is_overdrawn());
    }

    #[test]
    fn test_spending_capacity_saturates() {
        let mut balance = AccountBalance::new(Decimal::MAX, Decimal::MAX).unwrap();
        balance.add_funds(dec!(1)).unwrap();
        assert_eq!(balance.spending_capacity(), Decimal::MAX);
        assert!(balance.withdraw(Decimal::MAX).is_ok());
    }

    #[test]
    fn test_plan_does_not_mutate() {
        let balance = AccountBalance::new(dec!(100), dec!(50)).unwrap();
        let plan = balance.plan_withdrawal(dec!(120)).unwrap();
        assert_eq!(
            plan,
            Withdrawal {
                from_bonuses: dec!(100),
                from_funds: dec!(0),
                from_overdraft: dec!(20),
            }
        );
        assert_eq!(plan.total(), dec!(120));
        assert_eq!(balance.bonuses(), dec!(100));
        assert_eq!(balance.current_overdraft(), Decimal::ZERO);
    }

    #[test]
    fn test_deposit_breakdown() {
        let mut balance = AccountBalance::new(dec!(0), dec!(100)).unwrap();
        balance.withdraw(dec!(80)).unwrap();

        let deposit = balance.add_funds(dec!(30)).unwrap();
        assert_eq!(deposit.overdraft_closed, dec!(30));
        assert_eq!(deposit.funds_added, dec!(0));

        let deposit = balance.add_funds(dec!(70)).unwrap();
        assert_eq!(deposit.overdraft_closed, dec!(50));
        assert_eq!(deposit.funds_added, dec!(20));
        assert_eq!(balance.funds(), dec!(20));
    }

    #[test]
    fn test_add_funds_overflow_leaves_state() {
        let mut balance = AccountBalance::default();
        balance.add_funds(Decimal::MAX).unwrap();
        let before = balance.clone();

        let err = balance.add_funds(dec!(1)).unwrap_err();
        assert!(matches!(err, BalanceError::InvalidArgument { .. }));
        assert_eq!(balance, before);
    }

    #[test]
    fn test_zero_amounts_are_accepted() {
        let mut balance = AccountBalance::with_bonuses(dec!(10)).unwrap();
        balance.add_funds(Decimal::ZERO).unwrap();
        balance.add_bonuses(Decimal::ZERO).unwrap();
        let withdrawal = balance.withdraw(Decimal::ZERO).unwrap();
        assert_eq!(withdrawal.total(), Decimal::ZERO);
        assert_eq!(balance, AccountBalance::with_bonuses(dec!(10)).unwrap());
    }

    #[test]
    fn test_display() {
        let mut balance = AccountBalance::new(dec!(200), dec!(100)).unwrap();
        balance.withdraw(dec!(250)).unwrap();
        assert_eq!(
            balance.to_string(),
            "funds=0.00 bonuses=0.00 overdraft=50.00/100.00"
        );
    }
}
