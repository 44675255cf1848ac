//! AZ.Cash dark theme for the CHIT Desk TUI.
//!
//! # Color Palette
//! - **Background**: #161616 (main area), #222222 (sidebar, modal surface)
//! - **Border**: #333333
//! - **Text**: #e5e7eb primary, #9ca3af muted
//! - **Badge**: dark green on mint (#166534 on #bbf7d0) for statuses
//! - **Accent**: #4ade80 (focus, selection)
//! - **Negative**: #f87171 (validation errors, negative figures)
//! - **Warning**: #fbbf24 (processing, notices)

use ratatui::style::{Color, Modifier, Style};
use rust_decimal::Decimal;

pub const BACKGROUND: Color = Color::Rgb(22, 22, 22);
pub const SURFACE: Color = Color::Rgb(34, 34, 34);
pub const BORDER: Color = Color::Rgb(51, 51, 51);
pub const TEXT: Color = Color::Rgb(229, 231, 235);
pub const MUTED: Color = Color::Rgb(156, 163, 175);
pub const BADGE_BG: Color = Color::Rgb(187, 247, 208);
pub const BADGE_FG: Color = Color::Rgb(22, 101, 52);
pub const ACCENT: Color = Color::Rgb(74, 222, 128);
pub const NEGATIVE: Color = Color::Rgb(248, 113, 113);
pub const WARNING: Color = Color::Rgb(251, 191, 36);

/// Palette bundle for widgets that take a theme reference.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub badge_bg: Color,
    pub badge_fg: Color,
    pub accent: Color,
    pub negative: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::az_cash()
    }
}

impl Theme {
    pub fn az_cash() -> Self {
        Self {
            surface: SURFACE,
            border: BORDER,
            text: TEXT,
            muted: MUTED,
            badge_bg: BADGE_BG,
            badge_fg: BADGE_FG,
            accent: ACCENT,
            negative: NEGATIVE,
        }
    }

    /// Text color for a signed amount.
    pub fn amount_color(&self, value: Decimal) -> Color {
        if value < Decimal::ZERO {
            self.negative
        } else {
            self.text
        }
    }

    /// Status badge style: every status shares the mint badge.
    pub fn badge(&self) -> Style {
        Style::default()
            .fg(self.badge_fg)
            .bg(self.badge_bg)
            .add_modifier(Modifier::BOLD)
    }
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn title() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

pub fn badge() -> Style {
    Theme::default().badge()
}

/// White pill used for the BUY/SELL/XFER triggers.
pub fn button() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD)
}
