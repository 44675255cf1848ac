//! Transaction table - tab strip plus the filtered rows
//!
//! Displays:
//! - Trades / Listed / Pending tabs
//! - Date, receipt id, from, to, asset, status (+ Note badge)

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Widget},
};

use chit_core::format::format_chit;
use chit_core::{Tab, TransactionLog, TransactionRecord};

use crate::theme::Theme;

/// Tabbed transaction table widget
pub struct TransactionsPanel<'a> {
    log: &'a TransactionLog,
    tab: Tab,
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> TransactionsPanel<'a> {
    pub fn new(log: &'a TransactionLog, tab: Tab, cursor: usize, theme: &'a Theme) -> Self {
        Self {
            log,
            tab,
            cursor,
            theme,
        }
    }

    fn status_cell(&self, record: &TransactionRecord) -> Cell<'static> {
        let mut spans = vec![Span::styled(
            format!(" {} ", record.status.label()),
            self.theme.badge(),
        )];
        if record.is_note {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(" Note ", self.theme.badge()));
        }
        Cell::from(Line::from(spans))
    }

    /// First row to draw so the cursor stays on screen.
    fn scroll_offset(&self, visible: usize) -> usize {
        if visible == 0 {
            return 0;
        }
        self.cursor.saturating_sub(visible - 1)
    }
}

impl<'a> Widget for TransactionsPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(area);

        let titles: Vec<Line> = Tab::ALL
            .iter()
            .map(|t| {
                Line::from(format!(
                    " {} ({}) ",
                    t.label(),
                    self.log.count(t.status())
                ))
            })
            .collect();
        Tabs::new(titles)
            .select(self.tab.index())
            .style(Style::default().fg(self.theme.muted))
            .highlight_style(
                Style::default()
                    .fg(self.theme.surface)
                    .bg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .divider(" ")
            .render(chunks[0], buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.surface));

        let rows_total = self.log.count(self.tab.status());
        if rows_total == 0 {
            let inner = block.inner(chunks[1]);
            block.render(chunks[1], buf);
            Paragraph::new(Span::styled(
                format!("No {} transactions.", self.tab.label().to_lowercase()),
                Style::default().fg(self.theme.muted),
            ))
            .render(inner, buf);
            return;
        }

        let header_cells = ["Date", "Receipt ID", "From", "To", "Asset", "Status"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(self.theme.muted)));
        let header = Row::new(header_cells).height(1).bottom_margin(1);

        // Borders (2) + header (1) + header margin (1).
        let visible = chunks[1].height.saturating_sub(4) as usize;
        let offset = self.scroll_offset(visible);

        let rows = self
            .log
            .tab(self.tab)
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, record)| {
                let style = if i == self.cursor {
                    Style::default()
                        .bg(self.theme.border)
                        .fg(self.theme.text)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.text)
                };

                let asset = Cell::from(format_chit(record.asset))
                    .style(Style::default().fg(self.theme.amount_color(record.asset)));

                Row::new(vec![
                    Cell::from(record.date.clone()),
                    Cell::from(record.receipt_id.clone()),
                    Cell::from(record.from.clone()),
                    Cell::from(record.to.clone()),
                    asset,
                    self.status_cell(record),
                ])
                .style(style)
                .height(1)
            });

        let widths = [
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Length(14),
            Constraint::Length(18),
        ];

        Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chit_core::{ActionKind, BalanceSet, Ledger};
    use rust_decimal::Decimal;

    fn empty_ledger() -> Ledger {
        Ledger::with_balances(BalanceSet::new(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO), Some(1))
    }

    fn render_text(panel: TransactionsPanel, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn ledger_with_rows() -> Ledger {
        let mut ledger = Ledger::with_balances(
            BalanceSet::new(Decimal::from(100_000), Decimal::ZERO, Decimal::ZERO),
            Some(11),
        );
        ledger.execute(ActionKind::Buy, "5000", None, None).unwrap();
        ledger
            .execute(ActionKind::Xfer, "1200", Some("usr-4410"), None)
            .unwrap();
        ledger
    }

    #[test]
    fn empty_tab_shows_placeholder() {
        let ledger = empty_ledger();
        let theme = Theme::default();
        let panel = TransactionsPanel::new(ledger.log(), Tab::Listed, 0, &theme);
        let text = render_text(panel, 100, 10);
        assert!(text.contains("No listed transactions."));
        assert!(text.contains("Trades (0)"));
    }

    #[test]
    fn trades_tab_lists_delivered_rows() {
        let ledger = ledger_with_rows();
        let theme = Theme::default();
        let panel = TransactionsPanel::new(ledger.log(), Tab::Trades, 0, &theme);
        let text = render_text(panel, 110, 12);
        assert!(text.contains("Receipt ID"));
        assert!(text.contains("⌀5,000"));
        assert!(text.contains("Delivered"));
        assert!(!text.contains("usr-4410"));
    }

    #[test]
    fn pending_tab_shows_note_badge() {
        let ledger = ledger_with_rows();
        let theme = Theme::default();
        let panel = TransactionsPanel::new(ledger.log(), Tab::Pending, 0, &theme);
        let text = render_text(panel, 110, 12);
        assert!(text.contains("usr-4410"));
        assert!(text.contains("Note"));
        assert!(text.contains("Pending (1)"));
    }

    #[test]
    fn scroll_keeps_cursor_visible() {
        let ledger = empty_ledger();
        let theme = Theme::default();
        let panel = TransactionsPanel::new(ledger.log(), Tab::Trades, 9, &theme);
        assert_eq!(panel.scroll_offset(4), 6);
        assert_eq!(panel.scroll_offset(20), 0);
        assert_eq!(panel.scroll_offset(0), 0);
    }

    #[test]
    fn fractional_asset_keeps_decimals() {
        let mut ledger = ledger_with_rows();
        ledger.execute(ActionKind::Buy, "1234.5", None, None).unwrap();
        let theme = Theme::default();
        let panel = TransactionsPanel::new(ledger.log(), Tab::Trades, 0, &theme);
        let text = render_text(panel, 110, 12);
        assert!(text.contains("⌀1,234.5"));
        assert!(text.contains("Trades (2)"));
    }
}
