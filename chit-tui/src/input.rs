//! Keyboard input dispatch — action modal → overlays → dashboard keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use chit_core::{ActionKind, Command, Facility, Tab, WorkflowStep};

use crate::app::{AppState, FormField, Overlay};
use crate::ui::MIN_COLUMNS;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // The "Desktop required" notice is up; nothing else is reachable.
    if app.viewport_width < MIN_COLUMNS {
        if key.code == KeyCode::Char('q') {
            app.quit();
        }
        return;
    }

    // 1. The action modal is exclusive while open.
    match app.ledger.step() {
        WorkflowStep::Closed => {}
        WorkflowStep::Input { .. } => {
            handle_input_step(app, key);
            return;
        }
        WorkflowStep::Processing { .. } => {
            // Origin verification can't be interrupted from the keyboard.
            return;
        }
        WorkflowStep::Result { .. } => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.dispatch(Command::Close);
            }
            return;
        }
    }

    // 2. Overlays.
    match app.overlay {
        Overlay::Menu => {
            handle_menu(app, key);
            return;
        }
        Overlay::Help => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::None => {}
    }

    // 3. Dashboard keys.
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('b') => app.open_action(ActionKind::Buy),
        KeyCode::Char('s') => app.open_action(ActionKind::Sell),
        KeyCode::Char('x') => app.open_action(ActionKind::Xfer),
        KeyCode::Char('m') => app.overlay = Overlay::Menu,
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('1') => app.select_tab(Tab::Trades),
        KeyCode::Char('2') => app.select_tab(Tab::Listed),
        KeyCode::Char('3') => app.select_tab(Tab::Pending),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
            app.select_tab(app.active_tab.next());
        }
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
            app.select_tab(app.active_tab.prev());
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let rows = app.visible_rows();
            if rows > 0 && app.table_cursor + 1 < rows {
                app.table_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.table_cursor = app.table_cursor.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_menu(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('p') => app.open_action(ActionKind::CashPickup),
        KeyCode::Char('d') => app.open_action(ActionKind::CashDrop),
        KeyCode::Char('w') => app.open_action(ActionKind::WireOut),
        KeyCode::Char('i') => {
            app.overlay = Overlay::None;
            app.dispatch(Command::SimulateIncoming);
            if let Some(record) = app.ledger.log().latest() {
                let msg = format!(
                    "Incoming payment from {} ({})",
                    record.from, record.receipt_id
                );
                app.set_status(msg);
            }
        }
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => app.overlay = Overlay::None,
        _ => {}
    }
}

fn handle_input_step(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.dispatch(Command::Cancel),
        KeyCode::Enter => app.dispatch(Command::Submit),
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Left if app.focus == FormField::Location => cycle_location(app, -1),
        KeyCode::Right | KeyCode::Char(' ') if app.focus == FormField::Location => {
            cycle_location(app, 1)
        }
        KeyCode::Backspace => edit_text(app, |s| {
            s.pop();
        }),
        KeyCode::Char(c) => edit_text(app, |s| s.push(c)),
        _ => {}
    }
}

/// Apply an edit to the focused text field.
fn edit_text(app: &mut AppState, edit: impl FnOnce(&mut String)) {
    let Some(request) = app.draft() else {
        return;
    };
    let command = match app.focus {
        FormField::Amount => {
            let mut text = request.amount.clone();
            edit(&mut text);
            Command::SetAmount(text)
        }
        FormField::Recipient => {
            let mut text = request.recipient.clone();
            edit(&mut text);
            Command::SetRecipient(text)
        }
        FormField::Location => return,
    };
    app.dispatch(command);
}

fn cycle_location(app: &mut AppState, direction: i32) {
    let Some(request) = app.draft() else {
        return;
    };
    let facility = match (request.location, direction > 0) {
        (None, true) => Facility::ALL[0],
        (None, false) => Facility::ALL[Facility::ALL.len() - 1],
        (Some(f), true) => f.next(),
        (Some(f), false) => f.prev(),
    };
    app.dispatch(Command::SetLocation(facility));
}
