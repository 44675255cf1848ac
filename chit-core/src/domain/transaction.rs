//! Transaction records, statuses, and receipt/id generation.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Settlement status shown in the table's status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxStatus {
    Delivered,
    Pending,
    Listed,
}

impl TxStatus {
    pub fn label(self) -> &'static str {
        match self {
            TxStatus::Delivered => "Delivered",
            TxStatus::Pending => "Pending",
            TxStatus::Listed => "Listed",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the transaction table. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub date: String,
    pub receipt_id: String,
    pub from: String,
    pub to: String,
    pub asset: Decimal,
    pub status: TxStatus,
    #[serde(default)]
    pub is_note: bool,
}

/// Format a record date the way the table shows it ("Oct 29, 2024").
pub fn display_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Issues record ids and receipt ids.
///
/// Record ids are sequential and unique per session. Receipt ids are random
/// five-digit strings and may collide.
#[derive(Debug, Clone)]
pub struct ReceiptGenerator {
    rng: StdRng,
    next_seq: u64,
}

impl ReceiptGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng, next_seq: 1 }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("tx-{:06}", self.next_seq);
        self.next_seq += 1;
        id
    }

    pub fn next_receipt(&mut self) -> String {
        self.rng.gen_range(10_000u32..=99_999).to_string()
    }

    /// Shared RNG for other mock draws (simulated incoming payments).
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipts_are_five_digits() {
        let mut gen = ReceiptGenerator::new(Some(7));
        for _ in 0..500 {
            let r = gen.next_receipt();
            assert_eq!(r.len(), 5);
            assert!(r.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(r.as_bytes()[0], b'0');
        }
    }

    #[test]
    fn ids_are_sequential_and_unique() {
        let mut gen = ReceiptGenerator::new(Some(7));
        assert_eq!(gen.next_id(), "tx-000001");
        assert_eq!(gen.next_id(), "tx-000002");
    }

    #[test]
    fn seeded_receipts_repeat() {
        let mut a = ReceiptGenerator::new(Some(42));
        let mut b = ReceiptGenerator::new(Some(42));
        assert_eq!(a.next_receipt(), b.next_receipt());
    }

    #[test]
    fn date_format_matches_table() {
        let d = NaiveDate::from_ymd_opt(2024, 10, 29).unwrap();
        assert_eq!(display_date(d), "Oct 29, 2024");
    }
}
