//! Funding and trading balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::action::FundingEffect;

/// The three registers the dashboard displays.
///
/// `alpha` and `beta` are USD funding sub-accounts, `trading` is the CHIT
/// balance. Debits drain alpha first and spill the shortfall into beta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSet {
    pub alpha: Decimal,
    pub beta: Decimal,
    pub trading: Decimal,
}

impl BalanceSet {
    pub fn new(alpha: Decimal, beta: Decimal, trading: Decimal) -> Self {
        Self {
            alpha,
            beta,
            trading,
        }
    }

    /// Combined funding across both sub-accounts ("Sub Accounts" line).
    pub fn funding_total(&self) -> Decimal {
        self.alpha.saturating_add(self.beta)
    }

    /// Debit funding: alpha first, remainder from beta.
    ///
    /// Beta is not floored here. Callers that must keep beta non-negative
    /// check `funding_total()` first (the workflow's validation step does).
    pub fn debit_funding(&mut self, amount: Decimal) {
        if self.alpha >= amount {
            self.alpha -= amount;
        } else {
            let shortfall = amount - self.alpha;
            self.alpha = Decimal::ZERO;
            self.beta = self.beta.saturating_sub(shortfall);
        }
    }

    /// Credit alpha only; beta is untouched.
    pub fn credit_alpha(&mut self, amount: Decimal) {
        self.alpha = self.alpha.saturating_add(amount);
    }

    /// Apply a signed change to the trading balance.
    pub fn adjust_trading(&mut self, delta: Decimal) {
        self.trading = self.trading.saturating_add(delta);
    }

    /// Apply the funding side of an action outcome.
    pub fn apply_funding(&mut self, effect: FundingEffect, amount: Decimal) {
        match effect {
            FundingEffect::None => {}
            FundingEffect::Debit => self.debit_funding(amount),
            FundingEffect::CreditAlpha => self.credit_alpha(amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn usd(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn balances(alpha: &str, beta: &str) -> BalanceSet {
        BalanceSet::new(usd(alpha), usd(beta), Decimal::ZERO)
    }

    #[test]
    fn debit_within_alpha() {
        let mut b = balances("1000", "50");
        b.debit_funding(usd("400"));
        assert_eq!(b.alpha, usd("600"));
        assert_eq!(b.beta, usd("50"));
    }

    #[test]
    fn debit_spills_into_beta() {
        let mut b = balances("100", "500");
        b.debit_funding(usd("250"));
        assert_eq!(b.alpha, Decimal::ZERO);
        assert_eq!(b.beta, usd("350"));
    }

    #[test]
    fn debit_exactly_alpha_leaves_beta() {
        let mut b = balances("100", "500");
        b.debit_funding(usd("100"));
        assert_eq!(b.alpha, Decimal::ZERO);
        assert_eq!(b.beta, usd("500"));
    }

    #[test]
    fn debit_of_exact_cent_total_empties_both() {
        let mut b = balances("0.01", "0.12");
        b.debit_funding(usd("0.13"));
        assert_eq!(b.alpha, Decimal::ZERO);
        assert_eq!(b.beta, Decimal::ZERO);
        assert!(b.funding_total() >= Decimal::ZERO);
    }

    #[test]
    fn raw_debit_can_push_beta_negative() {
        // The routine itself is unguarded; validation is what prevents this.
        let mut b = balances("100", "0");
        b.debit_funding(usd("150"));
        assert_eq!(b.alpha, Decimal::ZERO);
        assert_eq!(b.beta, usd("-50"));
    }

    #[test]
    fn credit_alpha_leaves_beta() {
        let mut b = balances("0", "20");
        b.apply_funding(FundingEffect::CreditAlpha, usd("75.25"));
        assert_eq!(b.alpha, usd("75.25"));
        assert_eq!(b.beta, usd("20"));
    }

    proptest! {
        #[test]
        fn debit_conserves_funding_total(
            alpha_cents in 0i64..100_000_000,
            beta_cents in 0i64..100_000_000,
            frac in 0.0f64..=1.0,
        ) {
            let alpha = Decimal::new(alpha_cents, 2);
            let beta = Decimal::new(beta_cents, 2);
            let amount_cents = ((alpha_cents + beta_cents) as f64 * frac).floor() as i64;
            let amount = Decimal::new(amount_cents, 2);
            let mut b = BalanceSet::new(alpha, beta, Decimal::ZERO);
            b.debit_funding(amount);

            prop_assert!(b.alpha >= Decimal::ZERO);
            prop_assert!(b.beta >= Decimal::ZERO);
            prop_assert_eq!(b.funding_total(), alpha + beta - amount);
            if amount <= alpha {
                prop_assert_eq!(b.beta, beta);
            } else {
                prop_assert_eq!(b.alpha, Decimal::ZERO);
            }
        }
    }
}
