//! Settlement timer thread.
//!
//! The ledger asks for a delayed `Settle(ticket)`; this thread holds the
//! pending deadlines and sends each ticket back when it comes due. Tickets can
//! be cancelled before they fire. Communication is via `mpsc` channels.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chit_core::SettlementTicket;

/// Commands sent from the TUI to the timer.
#[derive(Debug)]
pub enum WorkerCommand {
    Schedule {
        ticket: SettlementTicket,
        delay: Duration,
    },
    Cancel {
        ticket: SettlementTicket,
    },
    Shutdown,
}

/// Responses sent from the timer back to the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    Elapsed { ticket: SettlementTicket },
}

pub fn spawn_worker(
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("settlement-timer".into())
        .spawn(move || {
            worker_loop(rx, tx);
        })
}

fn worker_loop(rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    let mut pending: Vec<(Instant, SettlementTicket)> = Vec::new();

    loop {
        let next_due = pending.iter().map(|(due, _)| *due).min();
        let msg = match next_due {
            Some(due) => rx.recv_timeout(due.saturating_duration_since(Instant::now())),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match msg {
            Ok(WorkerCommand::Schedule { ticket, delay }) => {
                tracing::debug!(%ticket, ?delay, "settlement scheduled");
                pending.push((Instant::now() + delay, ticket));
            }
            Ok(WorkerCommand::Cancel { ticket }) => {
                tracing::debug!(%ticket, "settlement cancelled");
                pending.retain(|(_, t)| *t != ticket);
            }
            Ok(WorkerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        let now = Instant::now();
        let (due, waiting): (Vec<_>, Vec<_>) =
            pending.into_iter().partition(|(deadline, _)| *deadline <= now);
        pending = waiting;
        for (_, ticket) in due {
            if tx.send(WorkerResponse::Elapsed { ticket }).is_err() {
                return;
            }
        }
    }
}
