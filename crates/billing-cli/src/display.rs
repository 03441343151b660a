//! Display utilities for the CLI

use billing_account::amount::format_amount;
use billing_account::{AccountBalance, Decimal, Outcome};
use colored::*;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(48).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(48).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// Print a labeled value
pub fn labeled(label: &str, value: &str) {
    println!("  {}: {}", label.bright_white(), value.bright_cyan());
}

/// One-line summary of what an operation did
pub fn outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Deposited(deposit) => format!(
            "repaid {} of overdraft, credited {} to funds",
            money(deposit.overdraft_closed),
            money(deposit.funds_added)
        ),
        Outcome::BonusesAdded { amount } => format!("credited {} bonuses", money(*amount)),
        Outcome::Withdrew(withdrawal) => format!(
            "spent {} bonuses, {} funds, {} overdraft",
            money(withdrawal.from_bonuses),
            money(withdrawal.from_funds),
            money(withdrawal.from_overdraft)
        ),
    }
}

/// Print the four quantities and the derived capacity
pub fn balance(balance: &AccountBalance) {
    labeled("Funds", &money(balance.funds()));
    labeled("Bonuses", &money(balance.bonuses()));
    labeled(
        "Overdraft",
        &format!(
            "{} of {}",
            money(balance.current_overdraft()),
            money(balance.max_overdraft())
        ),
    );
    labeled("Spending capacity", &money(balance.spending_capacity()));
}

fn money(amount: Decimal) -> String {
    format_amount(amount)
}
