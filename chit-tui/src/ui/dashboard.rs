//! Right panel — header, stat cards, sparkline cards, transaction table.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Sparkline};

use crate::app::AppState;
use crate::mock_market::{chart_series, sparkline_data, StatCard, CHART_WINDOW, STAT_CARDS};
use crate::panels::transactions::TransactionsPanel;
use crate::theme::{self, Theme};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let area = Block::default().padding(Padding::new(2, 2, 1, 0)).inner(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // header
            Constraint::Length(4), // stat cards
            Constraint::Length(6), // sparklines
            Constraint::Min(6),    // table
        ])
        .split(area);

    render_header(f, rows[0], app);
    render_stat_cards(f, rows[1]);
    render_chart_cards(f, rows[2]);

    let theme = Theme::default();
    let panel = TransactionsPanel::new(app.ledger.log(), app.active_tab, app.table_cursor, &theme);
    f.render_widget(panel, rows[3]);
}

fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(40)])
        .split(area);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled("Trade", theme::title()))),
        cols[0],
    );

    let badges = Line::from(vec![
        Span::styled(" ◉ Full Access ", theme::badge()),
        Span::raw("  "),
        Span::styled(format!(" {} ", app.ledger.operator()), theme::button()),
        Span::raw("  "),
        Span::styled(" ? ", theme::button()),
    ])
    .right_aligned();
    f.render_widget(Paragraph::new(badges), cols[1]);
}

fn three_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .spacing(2)
        .split(area)
}

fn render_stat_cards(f: &mut Frame, area: Rect) {
    let cols = three_columns(area);
    for (card, col) in STAT_CARDS.iter().zip(cols.iter()) {
        render_stat_card(f, *col, card);
    }
}

fn render_stat_card(f: &mut Frame, area: Rect, card: &StatCard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border())
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(card.title, theme::muted())),
        Line::from(vec![
            Span::styled(card.volume, theme::title()),
            Span::raw(" "),
            Span::styled(format!(" {} ", card.count), theme::badge()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_chart_cards(f: &mut Frame, area: Rect) {
    let cols = three_columns(area);
    for (series, col) in chart_series().iter().zip(cols.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .style(Style::default().bg(theme::BORDER))
            .title(Line::from(vec![
                Span::styled(format!(" {} ", series.title), theme::title()),
                Span::styled(format!("{CHART_WINDOW} "), theme::muted()),
            ]));
        let data = sparkline_data(&series.points);
        let spark = Sparkline::default()
            .block(block)
            .data(&data)
            .style(theme::text());
        f.render_widget(spark, *col);
    }
}
