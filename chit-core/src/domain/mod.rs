//! Domain types: balances, transaction records, action requests.

pub mod action;
pub mod balance;
pub mod transaction;

pub use action::{ActionKind, ActionRequest, Facility, FundingEffect, FundsCheck, Outcome};
pub use balance::BalanceSet;
pub use transaction::{display_date, ReceiptGenerator, TransactionRecord, TxStatus};
