//! Display formatting for USD and CHIT amounts.

use rust_decimal::{Decimal, RoundingStrategy};

/// Most fractional digits a CHIT amount shows.
const CHIT_MAX_DECIMALS: u32 = 3;

/// Insert thousands separators into a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Group the integer part of a non-negative decimal string, keep the fraction.
fn group_decimal(plain: &str) -> String {
    match plain.split_once('.') {
        Some((whole, frac)) => format!("{}.{frac}", group_thousands(whole)),
        None => group_thousands(plain),
    }
}

/// `⌀1,234.5`: up to three decimals with trailing zeros dropped; negatives
/// render in parentheses, `⌀(34,444)`.
pub fn format_chit(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(CHIT_MAX_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let grouped = group_decimal(&rounded.abs().to_string());
    if rounded < Decimal::ZERO {
        format!("⌀({grouped})")
    } else {
        format!("⌀{grouped}")
    }
}

/// `$1,234.56`; negatives as `-$1,234.56`.
pub fn format_usd(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let grouped = group_decimal(&rounded.abs().to_string());
    if rounded < Decimal::ZERO {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
