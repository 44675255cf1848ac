//! Bottom status bar — key hints, workflow step, last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    let hints = if app.ledger.step().is_closed() {
        " b:Buy s:Sell x:Xfer m:More 1-3:Tabs ?:Help q:Quit"
    } else {
        " Enter:Submit Esc:Cancel Tab:Field"
    };
    spans.push(Span::styled(hints, theme::muted()));

    if let Some(n) = app.ledger.step().number() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} {n}/3", app.ledger.step().name()),
            theme::warning(),
        ));
    }

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}
