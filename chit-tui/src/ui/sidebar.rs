//! Left panel — market summary, action triggers, pricing, and the live
//! funding / trading balances.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use chit_core::format::{format_chit, format_usd};
use rust_decimal::Decimal;

use crate::app::AppState;
use crate::mock_market::{MARKET_SUMMARY, PRICING};
use crate::theme;
use crate::ui::kv_line;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme::border())
        .style(theme::text().bg(theme::SURFACE))
        .padding(Padding::horizontal(2));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width;
    let balances = app.ledger.balances();
    let mut lines: Vec<Line> = Vec::new();

    // Logo
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("AZ.Cash", theme::title())));
    lines.push(Line::from(Span::styled("chit marketplace", theme::muted())));
    lines.push(Line::from(""));

    section(&mut lines, "Market Summary");
    for fig in &MARKET_SUMMARY {
        lines.push(kv_line(fig.label, fig.value, width, theme::text()));
    }
    lines.push(Line::from(""));

    // Action triggers
    lines.push(Line::from(vec![
        Span::styled(" BUY ", theme::button()),
        Span::styled(" b  ", theme::muted()),
        Span::styled(" SELL ", theme::button()),
        Span::styled(" s  ", theme::muted()),
        Span::styled(" XFER ", theme::button()),
        Span::styled(" x", theme::muted()),
    ]));
    lines.push(Line::from(Span::styled("More actions: m", theme::muted())));
    lines.push(Line::from(""));

    section(&mut lines, "Pricing");
    for fig in &PRICING {
        lines.push(kv_line(fig.label, fig.value, width, theme::text()));
    }
    lines.push(Line::from(""));

    // Funding account
    lines.push(kv_line("Funding Account", "USD", width, theme::muted()));
    lines.push(kv_line(
        "Alpha",
        &format_usd(balances.alpha),
        width,
        theme::muted(),
    ));
    let beta_style = if balances.beta < Decimal::ZERO {
        theme::negative()
    } else {
        theme::muted()
    };
    lines.push(kv_line("Beta", &format_usd(balances.beta), width, beta_style));
    lines.push(kv_line(
        "Sub Accounts",
        &format_usd(balances.funding_total()),
        width,
        theme::title(),
    ));
    lines.push(Line::from(""));

    // Trading account
    lines.push(kv_line("Trading Account", "CHIT", width, theme::muted()));
    lines.push(Line::from(Span::styled(
        format_chit(balances.trading),
        theme::title().add_modifier(Modifier::UNDERLINED),
    )));
    lines.push(kv_line("Desktop Vault", "Micro Commodity", width, theme::text()));

    let para = Paragraph::new(lines);
    f.render_widget(para, inner);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::muted().add_modifier(Modifier::BOLD))));
}
