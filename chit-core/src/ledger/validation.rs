//! Input-step validation: amount, then location, then funds.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::{ActionRequest, BalanceSet, FundsCheck};

/// Which balance came up short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Account {
    Funding,
    Trading,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Account::Funding => f.write_str("funding"),
            Account::Trading => f.write_str("trading"),
        }
    }
}

/// The three user-visible input failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Enter a valid amount greater than zero.")]
    InvalidAmount,

    #[error("Select a facility location.")]
    MissingLocation,

    #[error("Insufficient {account} balance.")]
    InsufficientFunds {
        account: Account,
        required: Decimal,
        available: Decimal,
    },
}

/// Parse the amount field: trimmed decimal (plain or `1e4` form), strictly
/// positive.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    let value = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::InvalidAmount)?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(value)
}

/// Validate a draft against current balances. Returns the parsed amount.
///
/// Checks run in a fixed order and stop at the first failure.
pub fn validate(
    request: &ActionRequest,
    balances: &BalanceSet,
) -> Result<Decimal, ValidationError> {
    let amount = parse_amount(&request.amount)?;

    if request.kind.requires_location() && request.location.is_none() {
        return Err(ValidationError::MissingLocation);
    }

    match request.kind.funds_check() {
        FundsCheck::Funding if amount > balances.funding_total() => {
            Err(ValidationError::InsufficientFunds {
                account: Account::Funding,
                required: amount,
                available: balances.funding_total(),
            })
        }
        FundsCheck::Trading if amount > balances.trading => {
            Err(ValidationError::InsufficientFunds {
                account: Account::Trading,
                required: amount,
                available: balances.trading,
            })
        }
        _ => Ok(amount),
    }
}
