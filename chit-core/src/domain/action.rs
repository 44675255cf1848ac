//! Action kinds, cash facilities, and the per-action outcome table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::TxStatus;

/// Recipient used for an XFER submitted with a blank recipient field.
pub const UNKNOWN_RECIPIENT: &str = "usr-unknown";

/// Destination label for wire-outs.
pub const WIRE_BANK: &str = "Bank (****6789)";

pub const FUNDING_ACCOUNTS: &str = "Funding Accounts";
pub const TRADING_VAULT: &str = "Trading Vault";
pub const ALPHA_FUND: &str = "Alpha Fund";

/// A user-triggered ledger action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Buy,
    Sell,
    Xfer,
    CashPickup,
    CashDrop,
    WireOut,
}

/// Which balance a sufficiency check is made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundsCheck {
    /// alpha + beta must cover the amount.
    Funding,
    /// trading must cover the amount.
    Trading,
    /// No check (credits from a physical vault).
    None,
}

/// Funding side of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundingEffect {
    None,
    Debit,
    CreditAlpha,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Buy,
        ActionKind::Sell,
        ActionKind::Xfer,
        ActionKind::CashPickup,
        ActionKind::CashDrop,
        ActionKind::WireOut,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Buy => "BUY",
            ActionKind::Sell => "SELL",
            ActionKind::Xfer => "XFER",
            ActionKind::CashPickup => "CASH PICKUP",
            ActionKind::CashDrop => "CASH DROP",
            ActionKind::WireOut => "WIRE OUT",
        }
    }

    pub fn requires_location(self) -> bool {
        matches!(self, ActionKind::CashPickup | ActionKind::CashDrop)
    }

    pub fn takes_recipient(self) -> bool {
        self == ActionKind::Xfer
    }

    pub fn funds_check(self) -> FundsCheck {
        match self {
            ActionKind::Buy | ActionKind::CashDrop | ActionKind::WireOut => FundsCheck::Funding,
            ActionKind::Sell | ActionKind::Xfer => FundsCheck::Trading,
            ActionKind::CashPickup => FundsCheck::None,
        }
    }

    /// Resolve the outcome row for an already-validated request.
    pub fn outcome(self, amount: Decimal, request: &ActionRequest, operator: &str) -> Outcome {
        let location = request
            .location
            .map(|f| format!("Physical Vault ({})", f.label()))
            .unwrap_or_else(|| "Physical Vault".to_string());

        match self {
            ActionKind::Buy => Outcome {
                from: FUNDING_ACCOUNTS.to_string(),
                to: TRADING_VAULT.to_string(),
                trading_delta: amount,
                funding: FundingEffect::Debit,
                status: TxStatus::Delivered,
                is_note: false,
            },
            ActionKind::Sell => Outcome {
                from: TRADING_VAULT.to_string(),
                to: ALPHA_FUND.to_string(),
                trading_delta: -amount,
                funding: FundingEffect::CreditAlpha,
                status: TxStatus::Delivered,
                is_note: false,
            },
            ActionKind::Xfer => {
                let recipient = request.recipient.trim();
                Outcome {
                    from: operator.to_string(),
                    to: if recipient.is_empty() {
                        UNKNOWN_RECIPIENT.to_string()
                    } else {
                        recipient.to_string()
                    },
                    trading_delta: -amount,
                    funding: FundingEffect::None,
                    status: TxStatus::Pending,
                    is_note: true,
                }
            }
            ActionKind::CashPickup => Outcome {
                from: location,
                to: TRADING_VAULT.to_string(),
                trading_delta: amount,
                funding: FundingEffect::None,
                status: TxStatus::Pending,
                is_note: false,
            },
            ActionKind::CashDrop => Outcome {
                from: FUNDING_ACCOUNTS.to_string(),
                to: location,
                trading_delta: Decimal::ZERO,
                funding: FundingEffect::Debit,
                status: TxStatus::Pending,
                is_note: false,
            },
            ActionKind::WireOut => Outcome {
                from: FUNDING_ACCOUNTS.to_string(),
                to: WIRE_BANK.to_string(),
                trading_delta: Decimal::ZERO,
                funding: FundingEffect::Debit,
                status: TxStatus::Delivered,
                is_note: false,
            },
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cash-in-transit facilities offered for pickup and drop-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facility {
    Phoenix,
    Tucson,
    Flagstaff,
    Yuma,
}

impl Facility {
    pub const ALL: [Facility; 4] = [
        Facility::Phoenix,
        Facility::Tucson,
        Facility::Flagstaff,
        Facility::Yuma,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Facility::Phoenix => "Phoenix CIT",
            Facility::Tucson => "Tucson CIT",
            Facility::Flagstaff => "Flagstaff CIT",
            Facility::Yuma => "Yuma CIT",
        }
    }

    fn index(self) -> usize {
        match self {
            Facility::Phoenix => 0,
            Facility::Tucson => 1,
            Facility::Flagstaff => 2,
            Facility::Yuma => 3,
        }
    }

    /// Next facility in the picker, wrapping.
    pub fn next(self) -> Facility {
        Facility::ALL[(self.index() + 1) % Facility::ALL.len()]
    }

    pub fn prev(self) -> Facility {
        let len = Facility::ALL.len();
        Facility::ALL[(self.index() + len - 1) % len]
    }
}

/// Draft held while the action modal is open. The amount is kept as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub amount: String,
    pub recipient: String,
    pub location: Option<Facility>,
}

impl ActionRequest {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            amount: String::new(),
            recipient: String::new(),
            location: None,
        }
    }
}

/// Resolved effect of a completed action.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub from: String,
    pub to: String,
    pub trading_delta: Decimal,
    pub funding: FundingEffect,
    pub status: TxStatus,
    pub is_note: bool,
}
