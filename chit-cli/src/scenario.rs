//! Scenario files: an ordered list of actions replayed against a ledger.
//!
//! ```toml
//! [[step]]
//! op = "action"
//! kind = "BUY"
//! amount = "10000"
//!
//! [[step]]
//! op = "action"
//! kind = "XFER"
//! amount = "4000"
//! recipient = "usr-test"
//!
//! [[step]]
//! op = "simulate_incoming"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use chit_core::{ActionKind, BalanceSet, Command, Facility, Ledger, Tab, TransactionRecord};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Action {
        kind: ActionKind,
        amount: String,
        #[serde(default)]
        recipient: Option<String>,
        #[serde(default)]
        location: Option<Facility>,
    },
    SimulateIncoming,
}

impl Step {
    fn label(&self) -> String {
        match self {
            Step::Action { kind, amount, .. } => format!("{kind} {amount}"),
            Step::SimulateIncoming => "incoming payment".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub label: String,
    pub receipt_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TabCounts {
    pub trades: usize,
    pub listed: usize,
    pub pending: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub steps: Vec<StepReport>,
    pub balances: BalanceSet,
    pub tabs: TabCounts,
    /// Newest first.
    pub records: Vec<TransactionRecord>,
}

impl Scenario {
    pub fn from_toml(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing scenario")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Run every step in order. Failed steps are reported and leave the
    /// ledger untouched; later steps still run.
    pub fn replay(&self, ledger: &mut Ledger) -> ScenarioReport {
        let steps = self
            .steps
            .iter()
            .map(|step| {
                let result = match step {
                    Step::Action {
                        kind,
                        amount,
                        recipient,
                        location,
                    } => ledger
                        .execute(*kind, amount, recipient.as_deref(), *location)
                        .map(|r| r.receipt_id),
                    Step::SimulateIncoming => ledger
                        .dispatch(Command::SimulateIncoming)
                        .map(|_| latest_receipt(ledger)),
                };
                if let Err(e) = &result {
                    tracing::warn!(step = %step.label(), error = %e, "step failed");
                }
                StepReport {
                    label: step.label(),
                    receipt_id: result.as_ref().ok().cloned(),
                    error: result.err().map(|e| e.to_string()),
                }
            })
            .collect();

        ScenarioReport {
            steps,
            balances: *ledger.balances(),
            tabs: TabCounts {
                trades: ledger.log().count(Tab::Trades.status()),
                listed: ledger.log().count(Tab::Listed.status()),
                pending: ledger.log().count(Tab::Pending.status()),
            },
            records: ledger.log().iter().cloned().collect(),
        }
    }
}

fn latest_receipt(ledger: &Ledger) -> String {
    ledger
        .log()
        .latest()
        .map(|r| r.receipt_id.clone())
        .unwrap_or_default()
}
