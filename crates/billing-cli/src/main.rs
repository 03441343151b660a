//! Billing CLI - replay operations against a subscription billing account
//!
//! The account is opened from configuration (or flags), the given operations
//! are applied in order and the resulting balance is printed.
//!
//! # Usage
//!
//! ```bash
//! # Spend bonuses, dip into overdraft, repay it
//! billing --bonuses 200 --max-overdraft 100 exec withdraw:250 add-funds:100
//!
//! # Replay a JSON script, continuing past rejected operations
//! billing replay ops.json --keep-going --json
//!
//! # Opening terms from the environment
//! BILLING__ACCOUNT__BONUSES=750.00 billing exec withdraw:600
//! ```

mod commands;
mod config;
mod display;
mod session;

use std::path::PathBuf;

use billing_account::amount::parse_amount;
use billing_account::{Decimal, Operation};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{BillingConfig, LoggingConfig};

/// Billing CLI - account balance with bonuses and overdraft
#[derive(Parser, Debug)]
#[command(name = "billing")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (TOML, JSON, or YAML)
    #[arg(short, long, global = true, env = "BILLING_CONFIG")]
    config: Option<String>,

    /// Initial bonuses (overrides configuration)
    #[arg(long, global = true, allow_negative_numbers = true, value_parser = parse_amount)]
    bonuses: Option<Decimal>,

    /// Overdraft ceiling (overrides configuration)
    #[arg(long, global = true, allow_negative_numbers = true, value_parser = parse_amount)]
    max_overdraft: Option<Decimal>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "BILLING_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (json, pretty)
    #[arg(long, global = true, env = "BILLING_LOG_FORMAT")]
    log_format: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply operations given as `withdraw:250`, `add-funds:100`, `add-bonuses:5`
    Exec {
        /// Operations, applied left to right
        #[arg(required = true)]
        operations: Vec<Operation>,

        /// Keep applying operations after one is rejected
        #[arg(long)]
        keep_going: bool,
    },

    /// Apply operations from a JSON script
    Replay {
        /// Script file: {"operations": [{"op": "withdraw", "amount": "250"}]}
        script: PathBuf,

        /// Keep applying operations after one is rejected
        #[arg(long)]
        keep_going: bool,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut billing_config = BillingConfig::load(cli.config.as_deref())?;

    // Override with CLI arguments
    if let Some(bonuses) = cli.bonuses {
        billing_config.account.bonuses = bonuses;
    }
    if let Some(max_overdraft) = cli.max_overdraft {
        billing_config.account.max_overdraft = max_overdraft;
    }
    if let Some(level) = cli.log_level {
        billing_config.logging.level = level;
    }
    if let Some(format) = cli.log_format {
        billing_config.logging.format = format;
    }

    init_logging(&billing_config.logging);

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        bonuses = %billing_config.account.bonuses,
        max_overdraft = %billing_config.account.max_overdraft,
        "Starting billing CLI"
    );

    match cli.command {
        Commands::Exec {
            operations,
            keep_going,
        } => commands::run_operations(&billing_config, &operations, keep_going, cli.json),
        Commands::Replay { script, keep_going } => {
            let script = session::Script::from_file(&script)?;
            commands::run_operations(&billing_config, &script.operations, keep_going, cli.json)
        }
        Commands::Config => commands::show_config(&billing_config, cli.json),
    }
}

/// Initialize tracing/logging. Logs go to stderr so `--json` output stays clean.
fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true).with_writer(std::io::stderr))
                .init();
        }
    }
}
