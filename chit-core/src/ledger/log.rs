//! Append-only transaction log with status tabs.

use std::collections::VecDeque;

use crate::domain::{TransactionRecord, TxStatus};

/// Table tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Trades,
    Listed,
    Pending,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Trades, Tab::Listed, Tab::Pending];

    pub fn status(self) -> TxStatus {
        match self {
            Tab::Trades => TxStatus::Delivered,
            Tab::Listed => TxStatus::Listed,
            Tab::Pending => TxStatus::Pending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Trades => "Trades",
            Tab::Listed => "Listed",
            Tab::Pending => "Pending",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Trades => 0,
            Tab::Listed => 1,
            Tab::Pending => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % 3]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + 2) % 3]
    }
}

/// Most-recent-first sequence of records. There is no update or delete.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    records: VecDeque<TransactionRecord>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a record.
    pub fn append(&mut self, record: TransactionRecord) {
        self.records.push_front(record);
    }

    /// Lazy view of records with `status`, newest first.
    ///
    /// The iterator is `Clone`, so a caller can walk it more than once.
    pub fn filter(
        &self,
        status: TxStatus,
    ) -> impl Iterator<Item = &TransactionRecord> + Clone + '_ {
        self.records.iter().filter(move |r| r.status == status)
    }

    pub fn tab(&self, tab: Tab) -> impl Iterator<Item = &TransactionRecord> + Clone + '_ {
        self.filter(tab.status())
    }

    /// Number of records with `status` (tab badges, reports).
    pub fn count(&self, status: TxStatus) -> usize {
        self.filter(status).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> + '_ {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&TransactionRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
