//! Command implementations

use anyhow::Context;
use billing_account::amount::format_amount;
use billing_account::{AccountBalance, Operation};
use colored::*;

use crate::config::BillingConfig;
use crate::display;
use crate::session::{self, Report, StepResult};

/// Open the configured account, apply `operations` and print the report.
///
/// Fails (non-zero exit) when any operation was rejected.
pub fn run_operations(
    config: &BillingConfig,
    operations: &[Operation],
    keep_going: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut balance = config
        .account
        .open()
        .context("cannot open account with the configured terms")?;

    let report = session::run(&mut balance, operations, keep_going);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &balance, operations.len());
    }

    match report.rejected() {
        0 => Ok(()),
        n => anyhow::bail!("{} of {} operation(s) rejected", n, operations.len()),
    }
}

fn print_report(report: &Report, balance: &AccountBalance, requested: usize) {
    display::section("Operations");
    for (index, step) in report.steps.iter().enumerate() {
        let line = format!("{:>2}. {}", index + 1, step.operation);
        match &step.result {
            StepResult::Applied(outcome) => {
                display::success(&line);
                println!("      {}", display::outcome(outcome).bright_black());
            }
            StepResult::Rejected(rejection) => {
                display::error(&line);
                display::kv(rejection.code, &rejection.message);
            }
        }
    }

    let skipped = requested - report.steps.len();
    if skipped > 0 {
        println!(
            "  {}",
            format!("{} operation(s) not attempted", skipped).yellow()
        );
    }

    display::section("Balance");
    display::balance(balance);
    println!();
}

/// Print the effective configuration
pub fn show_config(config: &BillingConfig, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    display::section("Configuration");
    display::labeled("Account", "");
    display::kv("bonuses", &format_amount(config.account.bonuses));
    display::kv("max_overdraft", &format_amount(config.account.max_overdraft));
    display::labeled("Logging", "");
    display::kv("level", &config.logging.level);
    display::kv("format", &config.logging.format);
    println!();

    Ok(())
}
