//! Stateless widgets that take a theme reference.

pub mod transactions;

pub use transactions::TransactionsPanel;
