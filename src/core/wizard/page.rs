//! Wizard Page Contract
//!
//! Every step of a wizard implements [`WizardPage`] over the wizard's shared
//! context type `C`. The controller holds pages as trait objects in an
//! index-addressed `Vec` and only ever talks to the active one.
//!
//! Gates (`allow_*`) are polled continuously by the host and must be pure.
//! Hooks (`on_*`) run once per user action and are the only place a page may
//! write into the context.

use super::error::HookResult;

/// Host-agnostic input routed to the active page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInput {
    Up,
    Down,
    Left,
    Right,
    /// Toggle or pick the highlighted item.
    Select,
    Char(char),
    Backspace,
}

/// One step of a wizard.
pub trait WizardPage<C> {
    /// Title shown above the page body.
    fn title(&self) -> &str;

    /// Whether Next is currently permitted.
    fn allow_next(&self, ctx: &C) -> bool;

    /// Whether Back is currently permitted.
    fn allow_back(&self, _ctx: &C) -> bool {
        true
    }

    /// Whether Finish is currently permitted. Only terminal pages return `true`.
    fn allow_finish(&self, _ctx: &C) -> bool {
        false
    }

    /// Called every time the page becomes the active step.
    ///
    /// Must be idempotent: re-entering a page after Back calls this again on
    /// the same instance.
    fn on_shown(&mut self, ctx: &C);

    /// Called when the user goes back. `Ok(false)` vetoes the transition.
    /// Must not commit edits into the context.
    fn on_back(&mut self, _ctx: &C) -> HookResult {
        Ok(true)
    }

    /// Called when the user advances. On `Ok(true)` the page has committed
    /// its validated edits into `ctx`.
    fn on_next(&mut self, ctx: &mut C) -> HookResult;

    /// Called on the terminal page when the user finishes.
    fn on_finish(&mut self, _ctx: &mut C) -> HookResult {
        Ok(true)
    }

    /// Lines describing the page's current edit state, for the host to draw.
    fn body(&self, _ctx: &C) -> Vec<String> {
        Vec::new()
    }

    /// Apply an input event to the page's local edit state.
    /// Returns `true` if the page consumed it.
    fn handle_input(&mut self, _input: PageInput, _ctx: &C) -> bool {
        false
    }
}

/// Move a list cursor by one, clamped to `0..len`.
pub(crate) fn step_cursor(cursor: usize, len: usize, input: PageInput) -> usize {
    match input {
        PageInput::Up => cursor.saturating_sub(1),
        PageInput::Down => (cursor + 1).min(len.saturating_sub(1)),
        _ => cursor,
    }
}

/// Marker prefix for list rows.
pub(crate) fn row_marker(highlighted: bool, checked: Option<bool>) -> String {
    let pointer = if highlighted { ">" } else { " " };
    match checked {
        Some(true) => format!("{pointer} [x] "),
        Some(false) => format!("{pointer} [ ] "),
        None => format!("{pointer} "),
    }
}
