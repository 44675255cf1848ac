//! Action workflow state machine.
//!
//! ```text
//! Closed ──Open──▶ Input ──Submit(valid)──▶ Processing ──Settle──▶ Result ──Close──▶ Closed
//!                    │                          │
//!                 Cancel                      Abort
//!                    ▼                          ▼
//!                  Closed                     Closed
//! ```
//!
//! Invalid submits keep the workflow at `Input` with the error attached.

use rust_decimal::Decimal;
use std::fmt;
use std::time::Duration;

use crate::domain::{ActionKind, ActionRequest, Facility, TransactionRecord};

use super::validation::ValidationError;

/// Identifies one processing phase so a late timer can't settle a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettlementTicket(pub u64);

impl fmt::Display for SettlementTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Current step of the modal workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowStep {
    Closed,
    Input {
        request: ActionRequest,
        error: Option<ValidationError>,
    },
    Processing {
        request: ActionRequest,
        amount: Decimal,
        ticket: SettlementTicket,
    },
    Result {
        kind: ActionKind,
        record: TransactionRecord,
    },
}

impl WorkflowStep {
    /// 1-based step number shown in the modal; `None` when closed.
    pub fn number(&self) -> Option<u8> {
        match self {
            WorkflowStep::Closed => None,
            WorkflowStep::Input { .. } => Some(1),
            WorkflowStep::Processing { .. } => Some(2),
            WorkflowStep::Result { .. } => Some(3),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WorkflowStep::Closed => "closed",
            WorkflowStep::Input { .. } => "input",
            WorkflowStep::Processing { .. } => "processing",
            WorkflowStep::Result { .. } => "result",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, WorkflowStep::Closed)
    }

    /// Action kind of the open modal, if any.
    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            WorkflowStep::Closed => None,
            WorkflowStep::Input { request, .. } | WorkflowStep::Processing { request, .. } => {
                Some(request.kind)
            }
            WorkflowStep::Result { kind, .. } => Some(*kind),
        }
    }
}

/// Everything a user (or timer) can ask of the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(ActionKind),
    SetAmount(String),
    SetRecipient(String),
    SetLocation(Facility),
    Submit,
    Cancel,
    /// Delivered by the timer once the processing delay has elapsed.
    Settle(SettlementTicket),
    /// Leave the result screen.
    Close,
    /// Drop an in-flight processing phase without applying it.
    Abort,
    SimulateIncoming,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Open(_) => "open",
            Command::SetAmount(_) => "set_amount",
            Command::SetRecipient(_) => "set_recipient",
            Command::SetLocation(_) => "set_location",
            Command::Submit => "submit",
            Command::Cancel => "cancel",
            Command::Settle(_) => "settle",
            Command::Close => "close",
            Command::Abort => "abort",
            Command::SimulateIncoming => "simulate_incoming",
        }
    }
}

/// Side effects the owner of the ledger must carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ScheduleSettlement {
        ticket: SettlementTicket,
        delay: Duration,
    },
    CancelSettlement {
        ticket: SettlementTicket,
    },
}
