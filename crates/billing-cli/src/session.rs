//! Applying a sequence of operations to one account and recording each step.

use std::path::Path;

use anyhow::Context;
use billing_account::{AccountBalance, BalanceError, BalanceSnapshot, Operation, Outcome};
use serde::{Deserialize, Serialize};

/// Operations read from a JSON script file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub operations: Vec<Operation>,
}

impl Script {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid script {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// A rejected operation, as reported to the operator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    pub code: &'static str,
    pub message: String,
}

impl From<&BalanceError> for Rejection {
    fn from(err: &BalanceError) -> Self {
        Self {
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

/// What happened to one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StepResult {
    #[serde(rename = "outcome")]
    Applied(Outcome),
    #[serde(rename = "rejection")]
    Rejected(Rejection),
}

impl From<billing_account::Result<Outcome>> for StepResult {
    fn from(result: billing_account::Result<Outcome>) -> Self {
        match result {
            Ok(outcome) => StepResult::Applied(outcome),
            Err(err) => StepResult::Rejected(Rejection::from(&err)),
        }
    }
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub operation: Operation,
    #[serde(flatten)]
    pub result: StepResult,
}

impl Step {
    pub fn is_rejected(&self) -> bool {
        matches!(self.result, StepResult::Rejected(_))
    }
}

/// Everything a run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub opening: BalanceSnapshot,
    pub steps: Vec<Step>,
    pub closing: BalanceSnapshot,
}

impl Report {
    pub fn rejected(&self) -> usize {
        self.steps.iter().filter(|step| step.is_rejected()).count()
    }
}

/// Apply `operations` in order. Stops at the first rejection unless
/// `keep_going` is set; later operations are then not attempted.
pub fn run(balance: &mut AccountBalance, operations: &[Operation], keep_going: bool) -> Report {
    let opening = balance.snapshot();
    let mut steps = Vec::with_capacity(operations.len());

    for operation in operations {
        let result = balance.apply(operation);
        if let Err(err) = &result {
            tracing::info!(%operation, error = %err, "operation rejected");
        }
        let step = Step {
            operation: *operation,
            result: StepResult::from(result),
        };

        let stop = step.is_rejected() && !keep_going;
        steps.push(step);
        if stop {
            break;
        }
    }

    Report {
        opening,
        steps,
        closing: balance.snapshot(),
    }
}
