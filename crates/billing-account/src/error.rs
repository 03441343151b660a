//! Error types for balance operations.
//!
//! There are exactly two failure kinds. Neither ever leaves the balance in a
//! modified state.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for balance operations
pub type Result<T> = std::result::Result<T, BalanceError>;

/// Errors raised by [`AccountBalance`](crate::AccountBalance) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// A supplied amount or construction parameter is unacceptable
    #[error("Invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// Withdrawal exceeds bonuses + funds + remaining overdraft
    #[error("Insufficient funds to withdraw: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
}

impl BalanceError {
    /// Create an invalid argument error
    pub fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }

    /// Get an error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
        }
    }

    /// HTTP status a billing front-end would answer with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidArgument { .. } => 400,
            Self::InsufficientFunds { .. } => 402,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        let err = BalanceError::invalid_argument("amount", "Added funds must be positive");
        assert_eq!(err.error_code(), "INVALID_ARGUMENT");
        assert_eq!(err.http_status(), 400);

        let err = BalanceError::InsufficientFunds {
            requested: dec!(1000.00),
            available: dec!(999.00),
        };
        assert_eq!(err.error_code(), "INSUFFICIENT_FUNDS");
        assert_eq!(err.http_status(), 402);
    }

    #[test]
    fn test_error_display() {
        let err = BalanceError::invalid_argument("max_overdraft", "Maximum overdraft cannot be negative");
        assert_eq!(
            err.to_string(),
            "Invalid argument `max_overdraft`: Maximum overdraft cannot be negative"
        );

        let err = BalanceError::InsufficientFunds {
            requested: dec!(1000.00),
            available: dec!(999.00),
        };
        assert!(err.to_string().contains("1000.00"));
        assert!(err.to_string().contains("999.00"));
    }
}
