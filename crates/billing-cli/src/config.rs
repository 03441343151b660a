//! CLI Configuration
//!
//! Opening terms for the account plus logging settings. Sources, lowest
//! priority first: built-in defaults, `config/default`, `config/local`, the
//! file given with `--config`, `BILLING__*` environment variables, CLI flags.
//!
//! Amounts are written as strings (`bonuses = "750.00"`) so they stay exact.

use billing_account::{AccountBalance, Decimal};
use serde::{Deserialize, Serialize};

/// Full CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Terms the account is opened with
    #[serde(default)]
    pub account: AccountSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Opening terms of the account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSettings {
    /// Initial bonuses
    #[serde(default)]
    pub bonuses: Decimal,

    /// Overdraft ceiling
    #[serde(default)]
    pub max_overdraft: Decimal,
}

impl AccountSettings {
    /// Open an account with these terms
    pub fn open(&self) -> billing_account::Result<AccountBalance> {
        AccountBalance::new(self.bonuses, self.max_overdraft)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl BillingConfig {
    /// Load configuration from environment and optional config file
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        // An explicitly requested file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        builder = builder.add_source(config::Environment::with_prefix("BILLING").separator("__"));

        let config = builder.build()?;
        let billing_config: BillingConfig = config.try_deserialize()?;

        Ok(billing_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BillingConfig::default();
        assert_eq!(config.account.bonuses, Decimal::ZERO);
        assert_eq!(config.account.max_overdraft, Decimal::ZERO);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[account]\nbonuses = \"200.00\"\nmax_overdraft = \"100.00\"\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = BillingConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.account.bonuses, dec!(200.00));
        assert_eq!(config.account.max_overdraft, dec!(100.00));
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(BillingConfig::load(Some("/nonexistent/billing.toml")).is_err());
    }

    #[test]
    fn test_open_account_with_invalid_terms() {
        let settings = AccountSettings {
            bonuses: dec!(10),
            max_overdraft: dec!(-1),
        };
        assert!(settings.open().is_err());

        let settings = AccountSettings {
            bonuses: dec!(10),
            max_overdraft: dec!(5),
        };
        let balance = settings.open().unwrap();
        assert_eq!(balance.spending_capacity(), dec!(15));
    }
}
