//! Teal & Coral color theme for the wizard TUI.
//!
//! All color constants are RGB truecolor. The wizard view imports from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Teal: active step, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x00, 0x80, 0x80);
/// Light teal: completed steps.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x00, 0x96, 0x88);

/// Coral: titles and the default button.
pub const ACCENT: Color = Color::Rgb(0xFF, 0x7F, 0x50);

/// Charcoal: base background.
pub const BG_BASE: Color = Color::Rgb(0x0A, 0x19, 0x19);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
/// Dim text: disabled buttons, faint hints.
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Wizard title.
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Page heading.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn body() -> Style {
    Style::default().fg(TEXT)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Key hint style (e.g., "Esc:cancel").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Button whose gate is open.
pub fn button_enabled(primary: bool) -> Style {
    if primary {
        Style::default()
            .fg(BG_BASE)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
    }
}

/// Button whose gate is closed.
pub fn button_disabled() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::DIM)
}

/// Step indicator entry by position relative to the active step.
pub fn step(index: usize, current: usize) -> Style {
    match index.cmp(&current) {
        std::cmp::Ordering::Less => Style::default().fg(PRIMARY_LIGHT),
        std::cmp::Ordering::Equal => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        std::cmp::Ordering::Greater => Style::default().fg(TEXT_DIM),
    }
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}
