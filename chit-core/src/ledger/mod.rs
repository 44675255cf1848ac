//! Ledger controller: transaction log, validation, workflow, and the reducer.

pub mod controller;
pub mod log;
pub mod validation;
pub mod workflow;

pub use controller::{Ledger, LedgerError, INCOMING_COUNTERPARTIES, INCOMING_RANGE};
pub use log::{Tab, TransactionLog};
pub use validation::{parse_amount, validate, Account, ValidationError};
pub use workflow::{Command, Effect, SettlementTicket, WorkflowStep};
