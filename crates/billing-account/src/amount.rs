//! Monetary amount helpers: exact decimals, no floating point.
//!
//! Amounts are plain [`Decimal`] values. Negative amounts are representable so
//! that callers can pass them in, but every operation rejects them before any
//! state is touched.

use rust_decimal::Decimal;

use crate::error::{BalanceError, Result};

/// Minimum number of decimal places used when rendering amounts (`150.00`).
pub const DISPLAY_DECIMALS: u32 = 2;

/// Parse a decimal string like `"50.25"` or `"100"`.
///
/// Parsing is exact: inputs with more significant digits than a [`Decimal`]
/// can hold are rejected rather than rounded.
///
/// ```
/// use billing_account::amount::parse_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_amount("50.25").unwrap(), dec!(50.25));
/// assert!(parse_amount("fifty").is_err());
/// ```
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return Err(BalanceError::invalid_argument("amount", "empty amount"));
    }
    Decimal::from_str_exact(s).map_err(|e| {
        BalanceError::invalid_argument("amount", format!("invalid amount '{}': {}", s, e))
    })
}

/// Reject negative amounts with the given message.
pub fn ensure_non_negative(field: &'static str, amount: Decimal, reason: &str) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(BalanceError::invalid_argument(field, reason));
    }
    Ok(())
}

/// Checked addition that reports overflow as an invalid argument.
pub(crate) fn checked_add(field: &'static str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| {
        BalanceError::invalid_argument(field, format!("adding {} overflows the balance", rhs))
    })
}

/// Format as `"150.00"`: padded to two decimal places, never rounded.
///
/// ```
/// use billing_account::amount::format_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_amount(dec!(150)), "150.00");
/// assert_eq!(format_amount(dec!(0.005)), "0.005");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    if amount.scale() > DISPLAY_DECIMALS {
        return amount.to_string();
    }
    format!("{:.prec$}", amount, prec = DISPLAY_DECIMALS as usize)
}
