//! BDD tests for the mock ledger.
//!
//! These tests drive the ledger only through `dispatch` / `execute`:
//! - Balance effects of each action
//! - Validation leaves state untouched
//! - Tab filtering
//! - Cancel without submit

use chit_core::{
    ActionKind, BalanceSet, Command, Effect, Facility, Ledger, LedgerError, Tab, TxStatus,
    ValidationError, WorkflowStep,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn ledger(alpha: i64, beta: i64, trading: i64) -> Ledger {
    Ledger::with_balances(balances(alpha, beta, trading), Some(42))
}

fn balances(alpha: i64, beta: i64, trading: i64) -> BalanceSet {
    BalanceSet::new(alpha.into(), beta.into(), trading.into())
}

fn usd(raw: &str) -> Decimal {
    raw.parse().unwrap()
}

#[test]
fn bdd_scenario_buy_within_alpha() {
    // GIVEN alpha covers the purchase
    let mut l = ledger(5_000, 700, 100);

    // WHEN buying 1,200
    let record = l.execute(ActionKind::Buy, "1200", None, None).unwrap();

    // THEN alpha pays, beta untouched, trading credited
    assert_eq!(*l.balances(), balances(3_800, 700, 1_300));
    assert_eq!(record.status, TxStatus::Delivered);
    assert_eq!(record.from, "Funding Accounts");
    assert_eq!(record.to, "Trading Vault");
    assert_eq!(l.log().len(), 1);
}

#[test]
fn bdd_scenario_buy_spills_into_beta() {
    // GIVEN alpha alone is short but alpha + beta covers it
    let mut l = ledger(300, 1_000, 0);

    // WHEN buying 800
    l.execute(ActionKind::Buy, "800", None, None).unwrap();

    // THEN alpha drains to zero and beta pays the 500 shortfall
    assert_eq!(l.balances().alpha, Decimal::ZERO);
    assert_eq!(l.balances().beta, Decimal::from(500));
    assert_eq!(l.balances().trading, Decimal::from(800));
}

#[test]
fn bdd_scenario_sell_credits_alpha_only() {
    let mut l = ledger(10, 20, 500);
    l.execute(ActionKind::Sell, "200", None, None).unwrap();
    assert_eq!(*l.balances(), balances(210, 20, 300));
    assert_eq!(l.log().latest().unwrap().to, "Alpha Fund");
}

#[test]
fn bdd_scenario_xfer_leaves_funding() {
    let mut l = ledger(10, 20, 500);
    let record = l.execute(ActionKind::Xfer, "125", Some("usr-abc"), None).unwrap();
    assert_eq!(*l.balances(), balances(10, 20, 375));
    assert_eq!(record.status, TxStatus::Pending);
    assert_eq!(record.from, "Eric Miller");
    assert_eq!(record.to, "usr-abc");
}

#[test]
fn bdd_scenario_cash_and_wire_actions() {
    let mut l = ledger(1_000, 0, 0);

    // Pickup credits trading from the vault, pending.
    let pickup = l
        .execute(ActionKind::CashPickup, "50", None, Some(Facility::Phoenix))
        .unwrap();
    assert_eq!(pickup.status, TxStatus::Pending);
    assert_eq!(l.balances().trading, Decimal::from(50));

    // Drop-off debits funding, trading untouched.
    let drop = l
        .execute(ActionKind::CashDrop, "100", None, Some(Facility::Flagstaff))
        .unwrap();
    assert_eq!(drop.to, "Physical Vault (Flagstaff CIT)");
    assert_eq!(l.balances().alpha, Decimal::from(900));
    assert_eq!(l.balances().trading, Decimal::from(50));

    // Wire-out debits funding, delivered.
    let wire = l.execute(ActionKind::WireOut, "400", None, None).unwrap();
    assert_eq!(wire.status, TxStatus::Delivered);
    assert_eq!(wire.to, "Bank (****6789)");
    assert_eq!(l.balances().alpha, Decimal::from(500));
}

#[test]
fn bdd_scenario_cash_drop_without_location() {
    let mut l = ledger(1_000, 0, 0);
    let err = l.execute(ActionKind::CashDrop, "10", None, None).unwrap_err();
    assert_eq!(err, LedgerError::Validation(ValidationError::MissingLocation));
    assert_eq!(l.balances().alpha, Decimal::from(1_000));
}

#[test]
fn bdd_scenario_invalid_amounts_change_nothing() {
    let mut l = ledger(1_000, 50, 20);
    let before = *l.balances();

    for raw in ["abc", "-5", "0"] {
        // GIVEN an open BUY modal with a bad amount
        l.dispatch(Command::Open(ActionKind::Buy)).unwrap();
        l.dispatch(Command::SetAmount(raw.to_string())).unwrap();

        // WHEN submitting
        let err = l.dispatch(Command::Submit).unwrap_err();

        // THEN the amount message is shown and nothing moved
        assert_eq!(err, LedgerError::Validation(ValidationError::InvalidAmount));
        assert_eq!(
            err.to_string(),
            "Enter a valid amount greater than zero."
        );
        assert!(matches!(
            l.step(),
            WorkflowStep::Input {
                error: Some(ValidationError::InvalidAmount),
                ..
            }
        ));
        assert_eq!(*l.balances(), before);
        assert!(l.log().is_empty());

        l.dispatch(Command::Cancel).unwrap();
    }
}

#[test]
fn bdd_scenario_concrete_buy_then_xfer() {
    // GIVEN alpha=1,000,000, beta=0, trading=0
    let mut l = ledger(1_000_000, 0, 0);

    // WHEN buying 10,000
    let buy = l.execute(ActionKind::Buy, "10000", None, None).unwrap();

    // THEN
    assert_eq!(l.balances().alpha, Decimal::from(990_000));
    assert_eq!(l.balances().trading, Decimal::from(10_000));
    assert_eq!(buy.status, TxStatus::Delivered);
    assert_eq!(buy.from, "Funding Accounts");
    assert_eq!(buy.to, "Trading Vault");
    assert_eq!(buy.asset, Decimal::from(10_000));

    // WHEN transferring 4,000 to usr-test
    let xfer = l.execute(ActionKind::Xfer, "4000", Some("usr-test"), None).unwrap();

    // THEN
    assert_eq!(l.balances().trading, Decimal::from(6_000));
    assert_eq!(xfer.status, TxStatus::Pending);
    assert_eq!(xfer.from, "Eric Miller");
    assert_eq!(xfer.to, "usr-test");
    assert_eq!(xfer.asset, Decimal::from(4_000));

    // AND each tab shows its one row
    assert_eq!(l.log().count(TxStatus::Delivered), 1);
    assert_eq!(l.log().count(TxStatus::Pending), 1);
    assert_eq!(l.log().count(TxStatus::Listed), 0);
}

#[test]
fn bdd_scenario_cancel_without_submit() {
    let mut l = ledger(1_000, 0, 10);
    l.execute(ActionKind::Buy, "10", None, None).unwrap();
    let balances = *l.balances();
    let log_len = l.log().len();

    // GIVEN an open BUY modal with 500 entered
    l.dispatch(Command::Open(ActionKind::Buy)).unwrap();
    l.dispatch(Command::SetAmount("500".into())).unwrap();

    // WHEN cancelling
    l.dispatch(Command::Cancel).unwrap();

    // THEN nothing changed
    assert!(l.step().is_closed());
    assert_eq!(*l.balances(), balances);
    assert_eq!(l.log().len(), log_len);
}

#[test]
fn bdd_scenario_processing_is_exclusive() {
    let mut l = ledger(1_000, 0, 10);
    l.dispatch(Command::Open(ActionKind::Buy)).unwrap();
    l.dispatch(Command::SetAmount("10".into())).unwrap();
    let ticket = match l.dispatch(Command::Submit).unwrap() {
        Some(Effect::ScheduleSettlement { ticket, .. }) => ticket,
        other => panic!("expected schedule effect, got {other:?}"),
    };

    // No other action, edit, or cancel while processing.
    assert!(l.dispatch(Command::Open(ActionKind::Sell)).is_err());
    assert!(l.dispatch(Command::SetAmount("99".into())).is_err());
    assert!(l.dispatch(Command::Cancel).is_err());
    assert!(l.dispatch(Command::SimulateIncoming).is_err());

    l.dispatch(Command::Settle(ticket)).unwrap();
    assert_eq!(l.step().number(), Some(3));
}

#[test]
fn bdd_scenario_buy_exact_cent_funding_total() {
    // GIVEN alpha=0.01 and beta=0.12
    let mut l = Ledger::with_balances(
        BalanceSet::new(usd("0.01"), usd("0.12"), Decimal::ZERO),
        Some(42),
    );

    // WHEN buying exactly the combined 0.13
    l.execute(ActionKind::Buy, "0.13", None, None).unwrap();

    // THEN both funding registers land on zero, never below
    assert_eq!(l.balances().alpha, Decimal::ZERO);
    assert_eq!(l.balances().beta, Decimal::ZERO);
    assert_eq!(l.balances().funding_total(), Decimal::ZERO);
    assert_eq!(l.balances().trading, usd("0.13"));

    // AND one more cent is refused
    let err = l.execute(ActionKind::Buy, "0.01", None, None).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Validation(ValidationError::InsufficientFunds { .. })
    ));
    assert!(l.balances().beta >= Decimal::ZERO);
}

#[test]
fn bdd_scenario_fractional_amount_is_kept() {
    // GIVEN funding of 1,000
    let mut l = ledger(1_000, 0, 0);

    // WHEN buying 0.4
    let record = l.execute(ActionKind::Buy, "0.4", None, None).unwrap();

    // THEN the record and display keep the fraction
    assert_eq!(record.asset, usd("0.4"));
    assert_eq!(chit_core::format::format_chit(record.asset), "⌀0.4");
    assert_eq!(l.balances().alpha, usd("999.6"));
}

fn action_strategy() -> impl Strategy<Value = (ActionKind, u32)> {
    (
        prop::sample::select(ActionKind::ALL.to_vec()),
        1u32..5_000,
    )
}

proptest! {
    #[test]
    fn tabs_partition_by_status(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let mut l = ledger(100_000, 20_000, 5_000);
        for (kind, amount) in actions {
            // Rejected actions are fine; they must not leak records.
            let _ = l.execute(kind, &amount.to_string(), Some("usr-p"), Some(Facility::Yuma));
        }

        let delivered = l.log().iter().filter(|r| r.status == TxStatus::Delivered).count();
        let pending = l.log().iter().filter(|r| r.status == TxStatus::Pending).count();
        prop_assert_eq!(l.log().tab(Tab::Trades).count(), delivered);
        prop_assert_eq!(l.log().tab(Tab::Pending).count(), pending);
        prop_assert_eq!(l.log().tab(Tab::Listed).count(), 0);
        prop_assert!(l.log().tab(Tab::Trades).all(|r| r.status == TxStatus::Delivered));

        // Validated workflow keeps every register non-negative.
        prop_assert!(l.balances().alpha >= Decimal::ZERO);
        prop_assert!(l.balances().beta >= Decimal::ZERO);
        prop_assert!(l.balances().trading >= Decimal::ZERO);
    }

    #[test]
    fn non_positive_amounts_never_mutate(
        raw in prop_oneof![
            "[a-zA-Z]{1,8}",
            "-[0-9]{1,6}",
            Just("0".to_string()),
            Just("".to_string()),
        ],
        kind in prop::sample::select(ActionKind::ALL.to_vec()),
    ) {
        let mut l = ledger(1_000, 1_000, 1_000);
        let before = *l.balances();
        let err = l.execute(kind, &raw, Some("usr-p"), Some(Facility::Tucson)).unwrap_err();
        prop_assert_eq!(err, LedgerError::Validation(ValidationError::InvalidAmount));
        prop_assert_eq!(*l.balances(), before);
        prop_assert!(l.log().is_empty());
        prop_assert!(l.step().is_closed());
    }

    #[test]
    fn cent_amounts_never_overdraw_beta(
        alpha_cents in 0i64..1_000_000,
        beta_cents in 0i64..1_000_000,
        buys in prop::collection::vec(1i64..200_000, 1..20),
    ) {
        let start = BalanceSet::new(Decimal::new(alpha_cents, 2), Decimal::new(beta_cents, 2), Decimal::ZERO);
        let mut l = Ledger::with_balances(start, Some(7));
        for cents in buys {
            let _ = l.execute(ActionKind::Buy, &Decimal::new(cents, 2).to_string(), None, None);
        }
        prop_assert!(l.balances().alpha >= Decimal::ZERO);
        prop_assert!(l.balances().beta >= Decimal::ZERO);
        prop_assert_eq!(
            l.balances().funding_total() + l.balances().trading,
            start.funding_total()
        );
    }
}
