//! CHIT Desk core — mock ledger for the CHIT marketplace dashboard.
//!
//! This crate holds every piece of state the dashboard mutates:
//! - Balance set (alpha/beta funding, trading)
//! - Append-only transaction log with status tabs
//! - Action workflow state machine (input → processing → result)
//! - Command/reducer entry point (`Ledger::dispatch`)
//!
//! Nothing here touches the terminal or the clock thread; the settlement delay
//! is requested as an `Effect` and delivered back as `Command::Settle`.

pub mod config;
pub mod domain;
pub mod format;
pub mod ledger;

pub use config::{ConfigError, LedgerConfig};
/// Money type for balances and amounts.
pub use rust_decimal::Decimal;
pub use domain::{
    ActionKind, ActionRequest, BalanceSet, Facility, TransactionRecord, TxStatus,
};
pub use ledger::{
    Command, Effect, Ledger, LedgerError, SettlementTicket, Tab, TransactionLog, ValidationError,
    WorkflowStep,
};
