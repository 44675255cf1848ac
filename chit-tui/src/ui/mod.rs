//! Top-level UI layout — sidebar, trading dashboard, status bar, overlays.

pub mod dashboard;
pub mod overlays;
pub mod sidebar;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::app::{AppState, Overlay};
use crate::theme;

/// Narrowest terminal the dashboard renders in.
pub const MIN_COLUMNS: u16 = 100;

const SIDEBAR_WIDTH: u16 = 38;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let area = f.area();
    f.render_widget(Block::default().style(theme::text().bg(theme::BACKGROUND)), area);

    if area.width < MIN_COLUMNS {
        render_desktop_required(f, area);
        return;
    }

    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let main_area = chunks[0];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(main_area);

    sidebar::render(f, columns[0], app);
    dashboard::render(f, columns[1], app);
    status_bar::render(f, chunks[1], app);

    // Overlays on top; the action modal wins over everything else.
    if !app.ledger.step().is_closed() {
        overlays::render_action_modal(f, main_area, app);
        return;
    }
    match app.overlay {
        Overlay::Menu => overlays::render_menu(f, main_area),
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::None => {}
    }
}

/// Replaces the dashboard when the terminal is too narrow.
fn render_desktop_required(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Desktop required", theme::title())),
        Line::from(""),
        Line::from(Span::styled(
            format!("Widen the terminal to at least {MIN_COLUMNS} columns."),
            theme::muted(),
        )),
        Line::from(Span::styled("Press q to quit.", theme::muted())),
    ];
    let para = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(para, centered_rect(90, 50, area));
}

/// Left label, right-aligned value, padded to `width`.
pub fn kv_line<'a>(label: &str, value: &str, width: u16, value_style: ratatui::style::Style) -> Line<'a> {
    let used = label.chars().count() + value.chars().count();
    let pad = (width as usize).saturating_sub(used).max(1);
    Line::from(vec![
        Span::styled(label.to_string(), theme::muted()),
        Span::raw(" ".repeat(pad)),
        Span::styled(value.to_string(), value_style),
    ])
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
