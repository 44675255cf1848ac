//! The ledger: single owner of balances, log, and workflow step.
//!
//! All mutation goes through `Ledger::dispatch`. The caller carries out any
//! returned `Effect` (scheduling or cancelling the settlement timer) and
//! later feeds `Command::Settle` back in.

use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::LedgerConfig;
use crate::domain::{
    display_date, ActionKind, ActionRequest, BalanceSet, Facility, ReceiptGenerator,
    TransactionRecord, TxStatus,
};
use crate::domain::action::TRADING_VAULT;

use super::log::TransactionLog;
use super::validation::{validate, ValidationError};
use super::workflow::{Command, Effect, SettlementTicket, WorkflowStep};

/// Counterparties drawn for simulated incoming payments.
pub const INCOMING_COUNTERPARTIES: [&str; 5] = [
    "usr-ed33c809-8eab",
    "Desert Sun Logistics",
    "Copper State Supply",
    "Saguaro Holdings",
    "Mesa Freight Co.",
];

/// Whole-CHIT range for simulated incoming payments.
pub const INCOMING_RANGE: std::ops::RangeInclusive<u32> = 500..=25_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cannot {command} while workflow is {step}")]
    InvalidTransition {
        command: &'static str,
        step: &'static str,
    },
}

#[derive(Debug)]
pub struct Ledger {
    balances: BalanceSet,
    log: TransactionLog,
    step: WorkflowStep,
    config: LedgerConfig,
    ids: ReceiptGenerator,
    next_ticket: u64,
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            balances: config.opening,
            log: TransactionLog::new(),
            step: WorkflowStep::Closed,
            ids: ReceiptGenerator::new(config.seed),
            config,
            next_ticket: 1,
        }
    }

    /// Ledger with explicit opening balances and otherwise default config.
    pub fn with_balances(opening: BalanceSet, seed: Option<u64>) -> Self {
        Self::new(LedgerConfig {
            opening,
            seed,
            ..LedgerConfig::default()
        })
    }

    pub fn balances(&self) -> &BalanceSet {
        &self.balances
    }

    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    pub fn step(&self) -> &WorkflowStep {
        &self.step
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn operator(&self) -> &str {
        &self.config.operator
    }

    /// Apply one command. Validation failures leave the workflow at `Input`
    /// with the error attached and are also returned.
    pub fn dispatch(&mut self, command: Command) -> Result<Option<Effect>, LedgerError> {
        let name = command.name();
        match command {
            Command::Open(kind) => {
                self.require_closed(name)?;
                self.step = WorkflowStep::Input {
                    request: ActionRequest::new(kind),
                    error: None,
                };
                debug!(action = %kind, "modal opened");
                Ok(None)
            }
            Command::SetAmount(text) => {
                self.edit_draft(name, |r| r.amount = text)?;
                Ok(None)
            }
            Command::SetRecipient(text) => {
                self.edit_draft(name, |r| r.recipient = text)?;
                Ok(None)
            }
            Command::SetLocation(facility) => {
                self.edit_draft(name, |r| r.location = Some(facility))?;
                Ok(None)
            }
            Command::Submit => self.submit(),
            Command::Cancel => match self.step {
                WorkflowStep::Input { .. } => {
                    self.step = WorkflowStep::Closed;
                    debug!("draft cancelled");
                    Ok(None)
                }
                _ => Err(self.invalid(name)),
            },
            Command::Settle(ticket) => {
                self.settle(ticket);
                Ok(None)
            }
            Command::Close => match self.step {
                WorkflowStep::Result { .. } => {
                    self.step = WorkflowStep::Closed;
                    Ok(None)
                }
                _ => Err(self.invalid(name)),
            },
            Command::Abort => {
                let effect = match &self.step {
                    WorkflowStep::Processing { ticket, request, .. } => {
                        info!(%ticket, action = %request.kind, "in-flight action aborted");
                        Some(Effect::CancelSettlement { ticket: *ticket })
                    }
                    _ => None,
                };
                self.step = WorkflowStep::Closed;
                Ok(effect)
            }
            Command::SimulateIncoming => {
                self.require_closed(name)?;
                self.simulate_incoming();
                Ok(None)
            }
        }
    }

    /// Run a full action headlessly: open, fill, submit, settle, close.
    ///
    /// On validation failure the draft is cancelled so the ledger stays usable.
    pub fn execute(
        &mut self,
        kind: ActionKind,
        amount: &str,
        recipient: Option<&str>,
        location: Option<Facility>,
    ) -> Result<TransactionRecord, LedgerError> {
        self.dispatch(Command::Open(kind))?;
        self.dispatch(Command::SetAmount(amount.to_string()))?;
        if let Some(r) = recipient {
            self.dispatch(Command::SetRecipient(r.to_string()))?;
        }
        if let Some(f) = location {
            self.dispatch(Command::SetLocation(f))?;
        }

        let ticket = match self.dispatch(Command::Submit) {
            Ok(Some(Effect::ScheduleSettlement { ticket, .. })) => ticket,
            Ok(_) => return Err(self.invalid("submit")),
            Err(e) => {
                self.dispatch(Command::Cancel)?;
                return Err(e);
            }
        };
        self.dispatch(Command::Settle(ticket))?;

        let record = match &self.step {
            WorkflowStep::Result { record, .. } => record.clone(),
            _ => return Err(self.invalid("settle")),
        };
        self.dispatch(Command::Close)?;
        Ok(record)
    }

    fn submit(&mut self) -> Result<Option<Effect>, LedgerError> {
        let WorkflowStep::Input { request, error } = &mut self.step else {
            return Err(self.invalid("submit"));
        };

        match validate(request, &self.balances) {
            Err(e) => {
                debug!(action = %request.kind, error = %e, "validation failed");
                *error = Some(e.clone());
                Err(LedgerError::Validation(e))
            }
            Ok(amount) => {
                let ticket = SettlementTicket(self.next_ticket);
                self.next_ticket += 1;
                let request = request.clone();
                debug!(%ticket, action = %request.kind, %amount, "origin verification started");
                self.step = WorkflowStep::Processing {
                    request,
                    amount,
                    ticket,
                };
                Ok(Some(Effect::ScheduleSettlement {
                    ticket,
                    delay: self.config.processing_delay(),
                }))
            }
        }
    }

    /// Apply the in-flight action if `ticket` matches it; otherwise ignore.
    fn settle(&mut self, ticket: SettlementTicket) {
        let (request, amount) = match &self.step {
            WorkflowStep::Processing {
                request,
                amount,
                ticket: current,
            } if *current == ticket => (request.clone(), *amount),
            _ => {
                debug!(%ticket, step = self.step.name(), "stale settlement ignored");
                return;
            }
        };

        let outcome = request
            .kind
            .outcome(amount, &request, &self.config.operator);
        self.balances.adjust_trading(outcome.trading_delta);
        self.balances.apply_funding(outcome.funding, amount);

        let record = self.new_record(outcome.from, outcome.to, amount, outcome.status);
        let record = TransactionRecord {
            is_note: outcome.is_note,
            ..record
        };
        self.log.append(record.clone());

        info!(
            %ticket,
            action = %request.kind,
            %amount,
            receipt = %record.receipt_id,
            status = %record.status,
            alpha = %self.balances.alpha,
            beta = %self.balances.beta,
            trading = %self.balances.trading,
            "action settled"
        );

        self.step = WorkflowStep::Result {
            kind: request.kind,
            record,
        };
    }

    fn simulate_incoming(&mut self) {
        let rng = self.ids.rng();
        let amount = Decimal::from(rng.gen_range(INCOMING_RANGE));
        let counterparty = INCOMING_COUNTERPARTIES[rng.gen_range(0..INCOMING_COUNTERPARTIES.len())];

        self.balances.adjust_trading(amount);
        let record = self.new_record(
            counterparty.to_string(),
            TRADING_VAULT.to_string(),
            amount,
            TxStatus::Delivered,
        );
        info!(%amount, from = counterparty, receipt = %record.receipt_id, "incoming payment simulated");
        self.log.append(record);
    }

    fn new_record(&mut self, from: String, to: String, asset: Decimal, status: TxStatus) -> TransactionRecord {
        TransactionRecord {
            id: self.ids.next_id(),
            date: display_date(chrono::Local::now().date_naive()),
            receipt_id: self.ids.next_receipt(),
            from,
            to,
            asset,
            status,
            is_note: false,
        }
    }

    fn edit_draft(
        &mut self,
        command: &'static str,
        edit: impl FnOnce(&mut ActionRequest),
    ) -> Result<(), LedgerError> {
        match &mut self.step {
            WorkflowStep::Input { request, error } => {
                edit(request);
                *error = None;
                Ok(())
            }
            _ => Err(self.invalid(command)),
        }
    }

    fn require_closed(&self, command: &'static str) -> Result<(), LedgerError> {
        if self.step.is_closed() {
            Ok(())
        } else {
            Err(self.invalid(command))
        }
    }

    fn invalid(&self, command: &'static str) -> LedgerError {
        debug!(command, step = self.step.name(), "command rejected");
        LedgerError::InvalidTransition {
            command,
            step: self.step.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn ledger(alpha: i64, beta: i64, trading: i64) -> Ledger {
        let balances = BalanceSet::new(alpha.into(), beta.into(), trading.into());
        Ledger::with_balances(balances, Some(1))
    }

    fn open_with_amount(l: &mut Ledger, kind: ActionKind, amount: &str) {
        l.dispatch(Command::Open(kind)).unwrap();
        l.dispatch(Command::SetAmount(amount.into())).unwrap();
    }

    #[test]
    fn submit_schedules_with_configured_delay() {
        let mut l = ledger(100, 0, 0);
        open_with_amount(&mut l, ActionKind::Buy, "10");
        let effect = l.dispatch(Command::Submit).unwrap();
        assert_eq!(
            effect,
            Some(Effect::ScheduleSettlement {
                ticket: SettlementTicket(1),
                delay: Duration::from_millis(2000),
            })
        );
        assert_eq!(l.step().number(), Some(2));
        // Nothing applied until settlement.
        assert_eq!(l.balances().alpha, Decimal::from(100));
        assert!(l.log().is_empty());
    }

    #[test]
    fn settle_applies_and_moves_to_result() {
        let mut l = ledger(100, 0, 0);
        open_with_amount(&mut l, ActionKind::Buy, "10");
        l.dispatch(Command::Submit).unwrap();
        l.dispatch(Command::Settle(SettlementTicket(1))).unwrap();

        assert_eq!(l.balances().alpha, Decimal::from(90));
        assert_eq!(l.balances().trading, Decimal::TEN);
        assert_eq!(l.log().len(), 1);
        match l.step() {
            WorkflowStep::Result { kind, record } => {
                assert_eq!(*kind, ActionKind::Buy);
                assert_eq!(record.asset, Decimal::TEN);
            }
            other => panic!("expected Result, got {other:?}"),
        }
        l.dispatch(Command::Close).unwrap();
        assert!(l.step().is_closed());
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut l = ledger(100, 0, 0);
        open_with_amount(&mut l, ActionKind::Buy, "10");
        l.dispatch(Command::Submit).unwrap();
        l.dispatch(Command::Settle(SettlementTicket(99))).unwrap();
        assert_eq!(l.step().number(), Some(2));
        assert!(l.log().is_empty());
    }

    #[test]
    fn validation_failure_stays_on_input_with_error() {
        let mut l = ledger(100, 0, 0);
        open_with_amount(&mut l, ActionKind::Buy, "abc");
        let err = l.dispatch(Command::Submit).unwrap_err();
        assert_eq!(err, LedgerError::Validation(ValidationError::InvalidAmount));
        match l.step() {
            WorkflowStep::Input { error, .. } => {
                assert_eq!(error.as_ref(), Some(&ValidationError::InvalidAmount));
            }
            other => panic!("expected Input, got {other:?}"),
        }

        // Editing clears the message.
        l.dispatch(Command::SetAmount("5".into())).unwrap();
        assert!(matches!(l.step(), WorkflowStep::Input { error: None, .. }));
    }

    #[test]
    fn cancel_only_from_input() {
        let mut l = ledger(100, 0, 0);
        assert!(l.dispatch(Command::Cancel).is_err());
        open_with_amount(&mut l, ActionKind::Buy, "10");
        l.dispatch(Command::Submit).unwrap();
        let err = l.dispatch(Command::Cancel).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidTransition {
                command: "cancel",
                step: "processing"
            }
        );
    }

    #[test]
    fn abort_drops_in_flight_action() {
        let mut l = ledger(100, 0, 0);
        open_with_amount(&mut l, ActionKind::Buy, "10");
        l.dispatch(Command::Submit).unwrap();
        let effect = l.dispatch(Command::Abort).unwrap();
        assert_eq!(
            effect,
            Some(Effect::CancelSettlement {
                ticket: SettlementTicket(1)
            })
        );
        // A late timer for the aborted ticket does nothing.
        l.dispatch(Command::Settle(SettlementTicket(1))).unwrap();
        assert_eq!(l.balances().alpha, Decimal::from(100));
        assert!(l.log().is_empty());
        assert!(l.step().is_closed());
    }

    #[test]
    fn one_modal_at_a_time() {
        let mut l = ledger(100, 0, 0);
        l.dispatch(Command::Open(ActionKind::Buy)).unwrap();
        assert!(l.dispatch(Command::Open(ActionKind::Sell)).is_err());
        assert!(l.dispatch(Command::SimulateIncoming).is_err());
    }

    #[test]
    fn simulate_incoming_credits_trading() {
        let mut l = ledger(0, 0, 0);
        l.dispatch(Command::SimulateIncoming).unwrap();
        let record = l.log().latest().unwrap();
        assert_eq!(record.status, TxStatus::Delivered);
        assert_eq!(record.to, TRADING_VAULT);
        assert!(INCOMING_COUNTERPARTIES.contains(&record.from.as_str()));
        assert!(record.asset.fract().is_zero());
        assert!(record.asset >= Decimal::from(*INCOMING_RANGE.start()));
        assert!(record.asset <= Decimal::from(*INCOMING_RANGE.end()));
        assert_eq!(l.balances().trading, record.asset);
        assert!(l.step().is_closed());
    }

    #[test]
    fn tickets_increase_per_submit() {
        let mut l = ledger(100, 0, 0);
        l.execute(ActionKind::Buy, "1", None, None).unwrap();
        open_with_amount(&mut l, ActionKind::Buy, "1");
        match l.dispatch(Command::Submit).unwrap() {
            Some(Effect::ScheduleSettlement { ticket, .. }) => assert_eq!(ticket, SettlementTicket(2)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn execute_cancels_on_validation_error() {
        let mut l = ledger(100, 0, 0);
        let err = l.execute(ActionKind::Sell, "5", None, None).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(ValidationError::InsufficientFunds { .. })));
        assert!(l.step().is_closed());
    }
}
