//! Overlay widgets — action modal, overflow menu, keyboard help.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Padding, Paragraph, Wrap};

use chit_core::format::format_chit;
use rust_decimal::Decimal;
use chit_core::{ActionRequest, TransactionRecord, ValidationError, WorkflowStep};

use crate::app::{form_fields, AppState, FormField};
use crate::theme;
use crate::ui::{centered_rect, kv_line};

/// The 3-step action modal. Draws nothing when the workflow is closed.
pub fn render_action_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let step = app.ledger.step();
    let (Some(kind), Some(number)) = (step.kind(), step.number()) else {
        return;
    };

    let popup = centered_rect(50, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" Execute {kind} "))
        .title_style(theme::accent_bold())
        .title_bottom(Line::from(Span::styled(
            format!(" Step {number}/3 "),
            theme::muted(),
        )))
        .style(theme::text().bg(theme::SURFACE))
        .padding(Padding::new(2, 2, 1, 0));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    match step {
        WorkflowStep::Closed => {}
        WorkflowStep::Input { request, error } => {
            render_input_step(f, inner, request, error.as_ref(), app.focus)
        }
        WorkflowStep::Processing { amount, .. } => {
            render_processing_step(f, inner, *amount, app.processing_progress(Instant::now()))
        }
        WorkflowStep::Result { record, .. } => render_result_step(f, inner, record),
    }
}

fn render_input_step(
    f: &mut Frame,
    area: Rect,
    request: &ActionRequest,
    error: Option<&ValidationError>,
    focus: FormField,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Deep Authentication",
            theme::title(),
        )),
        Line::from(Span::styled(
            "Geolocation verified. Device bound to this session.",
            theme::muted(),
        )),
        Line::from(""),
    ];

    for field in form_fields(request.kind) {
        let focused = field == focus;
        let label_style = if focused {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        let value = match field {
            FormField::Amount => format!("{}_", request.amount),
            FormField::Recipient => {
                if request.recipient.is_empty() && !focused {
                    "usr-…".to_string()
                } else {
                    format!("{}_", request.recipient)
                }
            }
            FormField::Location => match request.location {
                Some(facility) => format!("< {} >", facility.label()),
                None => "< Select… >".to_string(),
            },
        };
        let value_style = if focused { theme::text() } else { theme::muted() };
        let marker = if focused { "› " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(format!("{:<10}", field.label()), label_style),
            Span::styled(value, value_style),
        ]));
    }

    lines.push(Line::from(""));
    if let Some(err) = error {
        lines.push(Line::from(Span::styled(err.to_string(), theme::negative())));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::styled(" Enter ", theme::button()),
        Span::styled(" submit  ", theme::muted()),
        Span::styled(" Esc ", theme::button()),
        Span::styled(" cancel  ", theme::muted()),
        Span::styled(" Tab ", theme::button()),
        Span::styled(" next field", theme::muted()),
    ]));

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn render_processing_step(f: &mut Frame, area: Rect, amount: Decimal, progress: f64) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let text = vec![
        Line::from(Span::styled(
            "Origin verification…",
            theme::warning().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Amount  ", theme::muted()),
            Span::styled(format_chit(amount), theme::title()),
        ]),
    ];
    f.render_widget(Paragraph::new(text), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(theme::accent().bg(theme::BORDER))
        .ratio(progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", progress * 100.0));
    f.render_widget(gauge, rows[1]);
}

fn render_result_step(f: &mut Frame, area: Rect, record: &TransactionRecord) {
    let width = area.width;
    let mut lines = vec![
        Line::from(Span::styled("✔ Transaction complete", theme::accent_bold())),
        Line::from(""),
        kv_line("Receipt ID", &record.receipt_id, width, theme::title()),
        kv_line("Date", &record.date, width, theme::text()),
        kv_line("From", &record.from, width, theme::text()),
        kv_line("To", &record.to, width, theme::text()),
        kv_line("Asset", &format_chit(record.asset), width, theme::title()),
    ];
    let mut status = vec![
        Span::styled("Status  ", theme::muted()),
        Span::styled(format!(" {} ", record.status), theme::badge()),
    ];
    if record.is_note {
        status.push(Span::raw(" "));
        status.push(Span::styled(" Note ", theme::badge()));
    }
    lines.push(Line::from(status));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press Enter to close", theme::muted())));

    f.render_widget(Paragraph::new(lines), area);
}

/// Overflow actions menu (`m`).
pub fn render_menu(f: &mut Frame, area: Rect) {
    let popup = centered_rect(40, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" More Actions [Esc]close ")
        .title_style(theme::accent_bold())
        .style(theme::text().bg(theme::SURFACE))
        .padding(Padding::uniform(1));

    let entry = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(format!(" {key} "), theme::button()),
            Span::raw("  "),
            Span::styled(label, theme::text()),
        ])
    };

    let text = vec![
        entry("p", "Cash Pickup"),
        Line::from(""),
        entry("d", "Cash Drop"),
        Line::from(""),
        entry("w", "Wire Out"),
        Line::from(""),
        entry("i", "Simulate Incoming Payment"),
    ];

    let para = Paragraph::new(text).block(block);
    f.render_widget(para, popup);
}

/// Keyboard reference (`?`).
pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keyboard Shortcuts ")
        .title_style(theme::accent_bold())
        .style(theme::text().bg(theme::SURFACE))
        .padding(Padding::uniform(1));

    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<14}"), theme::accent()),
            Span::styled(desc, theme::muted()),
        ])
    };

    let text = vec![
        Line::from(Span::styled("Dashboard", theme::accent_bold())),
        key_line("b / s / x", "Buy / Sell / Transfer"),
        key_line("m", "More actions (cash, wire, incoming)"),
        key_line("1 / 2 / 3", "Trades / Listed / Pending"),
        key_line("Tab / h / l", "Cycle tabs"),
        key_line("j / k", "Move through rows"),
        key_line("q / Ctrl-C", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Action form", theme::accent_bold())),
        key_line("Tab / ↑ / ↓", "Switch field"),
        key_line("← / →", "Pick facility"),
        key_line("Enter", "Submit / close result"),
        key_line("Esc", "Cancel"),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::muted())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}
