//! Application state — single-owner, main-thread only.
//!
//! The ledger lives here. The settlement timer communicates via channels.

use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use chit_core::format::format_chit;
use chit_core::{
    ActionKind, ActionRequest, Command, Effect, Ledger, LedgerError, Tab, WorkflowStep,
};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

/// Which overlay (if any) is shown on top of the dashboard.
///
/// The action modal is not listed: it is open whenever the ledger's workflow
/// is not closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Menu,
    Help,
}

/// Focusable field in the action form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Recipient,
    Location,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Amount => "Amount",
            FormField::Recipient => "Recipient",
            FormField::Location => "Location",
        }
    }
}

/// Fields shown for an action, in focus order.
pub fn form_fields(kind: ActionKind) -> Vec<FormField> {
    let mut fields = vec![FormField::Amount];
    if kind.takes_recipient() {
        fields.push(FormField::Recipient);
    }
    if kind.requires_location() {
        fields.push(FormField::Location);
    }
    fields
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub ledger: Ledger,

    // Transaction table
    pub active_tab: Tab,
    pub table_cursor: usize,

    // Modal form
    pub focus: FormField,
    pub processing_since: Option<Instant>,

    // Cross-cutting
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,
    /// Terminal width at the last draw; below `ui::MIN_COLUMNS` only quit works.
    pub viewport_width: u16,

    // Timer communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
}

impl AppState {
    pub fn new(
        ledger: Ledger,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
    ) -> Self {
        Self {
            running: true,
            ledger,
            active_tab: Tab::Trades,
            table_cursor: 0,
            focus: FormField::Amount,
            processing_since: None,
            overlay: Overlay::None,
            status_message: None,
            viewport_width: crate::ui::MIN_COLUMNS,
            worker_tx,
            worker_rx,
        }
    }

    /// Run a command through the ledger and carry out its effect.
    ///
    /// Validation errors are rendered from the workflow step, so they need no
    /// handling here. Rejected transitions are logged and dropped.
    pub fn dispatch(&mut self, command: Command) {
        match self.ledger.dispatch(command) {
            Ok(Some(effect)) => self.run_effect(effect),
            Ok(None) => {}
            Err(LedgerError::Validation(_)) => {}
            Err(e @ LedgerError::InvalidTransition { .. }) => {
                tracing::debug!(error = %e, "ignored command");
            }
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleSettlement { ticket, delay } => {
                self.processing_since = Some(Instant::now());
                let _ = self
                    .worker_tx
                    .send(WorkerCommand::Schedule { ticket, delay });
            }
            Effect::CancelSettlement { ticket } => {
                self.processing_since = None;
                let _ = self.worker_tx.send(WorkerCommand::Cancel { ticket });
            }
        }
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Elapsed { ticket } => {
                self.dispatch(Command::Settle(ticket));
                if let WorkflowStep::Result { kind, record } = self.ledger.step() {
                    let msg = format!(
                        "{kind} {} settled, receipt {}",
                        format_chit(record.asset),
                        record.receipt_id
                    );
                    self.processing_since = None;
                    self.set_status(msg);
                }
            }
        }
    }

    /// Open an action modal with focus on the amount field.
    pub fn open_action(&mut self, kind: ActionKind) {
        self.overlay = Overlay::None;
        self.focus = FormField::Amount;
        self.dispatch(Command::Open(kind));
    }

    /// The open draft, while at the input step.
    pub fn draft(&self) -> Option<&ActionRequest> {
        match self.ledger.step() {
            WorkflowStep::Input { request, .. } => Some(request),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.move_focus(-1);
    }

    fn move_focus(&mut self, direction: isize) {
        let Some(kind) = self.draft().map(|r| r.kind) else {
            return;
        };
        let fields = form_fields(kind);
        let len = fields.len() as isize;
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        self.focus = fields[((pos + direction).rem_euclid(len)) as usize];
    }

    /// Fraction of the processing delay elapsed, clamped to 0..=1.
    pub fn processing_progress(&self, now: Instant) -> f64 {
        let Some(since) = self.processing_since else {
            return 0.0;
        };
        let delay = self.ledger.config().processing_delay().as_secs_f64();
        if delay <= 0.0 {
            return 1.0;
        }
        (now.duration_since(since).as_secs_f64() / delay).clamp(0.0, 1.0)
    }

    /// Rows visible in the active tab.
    pub fn visible_rows(&self) -> usize {
        self.ledger.log().count(self.active_tab.status())
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        self.table_cursor = 0;
    }

    /// Quit, dropping any in-flight action.
    pub fn quit(&mut self) {
        self.dispatch(Command::Abort);
        self.running = false;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
