//! Terminal host for wizard runs.
//!
//! Draws the active page with ratatui and turns crossterm key presses into
//! [`HostEvent`]s. When no key arrives within the tick interval the host
//! reports [`HostEvent::Tick`] so the controller re-polls the page's gates.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use super::theme;
use crate::core::wizard::{
    GateState, HostEvent, PageInput, WizardAction, WizardError, WizardHost, WizardView,
};

/// A [`WizardHost`] that owns the terminal for the duration of a run.
pub struct TerminalHost {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    /// Gates from the last presented view, used to route Enter
    gates: GateState,
    active: bool,
}

impl TerminalHost {
    /// Switch the terminal to raw alternate-screen mode.
    pub fn enter(tick_rate: Duration) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        tracing::debug!(tick_ms = tick_rate.as_millis() as u64, "Terminal host entered");

        Ok(Self {
            terminal,
            tick_rate,
            gates: GateState::default(),
            active: true,
        })
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            tracing::error!("Failed to restore terminal: {e}");
        }
    }
}

impl WizardHost for TerminalHost {
    fn present(&mut self, view: &WizardView<'_>) -> Result<(), WizardError> {
        self.gates = view.gates;
        self.terminal.draw(|frame| render(frame, view))?;
        Ok(())
    }

    fn poll_event(&mut self) -> Result<HostEvent, WizardError> {
        if !event::poll(self.tick_rate)? {
            return Ok(HostEvent::Tick);
        }
        let event = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                map_key(key, self.gates).unwrap_or(HostEvent::Tick)
            }
            _ => HostEvent::Tick,
        };
        Ok(event)
    }
}

/// Map a key press to a host event.
///
/// Enter advances, or finishes when only Finish is enabled.
pub fn map_key(key: KeyEvent, gates: GateState) -> Option<HostEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let event = match key.code {
        KeyCode::Esc => HostEvent::Action(WizardAction::Cancel),
        KeyCode::Char('c') if ctrl => HostEvent::Action(WizardAction::Cancel),
        KeyCode::Char('f') if ctrl => HostEvent::Action(WizardAction::Finish),
        KeyCode::Enter if !gates.next && gates.finish => HostEvent::Action(WizardAction::Finish),
        KeyCode::Enter => HostEvent::Action(WizardAction::Next),
        KeyCode::BackTab => HostEvent::Action(WizardAction::Back),
        KeyCode::Up => HostEvent::Input(PageInput::Up),
        KeyCode::Down => HostEvent::Input(PageInput::Down),
        KeyCode::Left => HostEvent::Input(PageInput::Left),
        KeyCode::Right => HostEvent::Input(PageInput::Right),
        KeyCode::Char(' ') => HostEvent::Input(PageInput::Select),
        KeyCode::Backspace => HostEvent::Input(PageInput::Backspace),
        KeyCode::Char(c) if !ctrl => HostEvent::Input(PageInput::Char(c)),
        _ => return None,
    };
    Some(event)
}

// ── Rendering ───────────────────────────────────────────────────────────────

/// Render a wizard view into the full frame.
pub fn render(frame: &mut Frame, view: &WizardView<'_>) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(3),    // Page body
        Constraint::Length(3), // Buttons
        Constraint::Length(1), // Hint line
    ])
    .split(frame.area());

    render_header(frame, chunks[0], view);
    render_body(frame, chunks[1], view);
    render_buttons(frame, chunks[2], view.gates);
    render_hint(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect, view: &WizardView<'_>) {
    let mut spans = vec![
        Span::styled(format!(" {} ", view.title), theme::title()),
        Span::styled(
            format!(" Step {} of {}  ", view.index + 1, view.page_count),
            theme::muted(),
        ),
    ];
    for i in 0..view.page_count {
        spans.push(Span::styled(
            if i == view.index { "●" } else { "○" },
            theme::step(i, view.index),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, area: Rect, view: &WizardView<'_>) {
    let block = theme::block_focused(view.page_title).title_style(theme::heading());
    let lines: Vec<Line> = view
        .body
        .iter()
        .map(|l| Line::from(Span::styled(l.as_str(), theme::body())))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn render_buttons(frame: &mut Frame, area: Rect, gates: GateState) {
    let mut spans = Vec::new();
    for action in [
        WizardAction::Back,
        WizardAction::Next,
        WizardAction::Finish,
        WizardAction::Cancel,
    ] {
        let primary = match action {
            WizardAction::Next => gates.next,
            WizardAction::Finish => !gates.next && gates.finish,
            _ => false,
        };
        let style = if gates.allows(action) {
            theme::button_enabled(primary)
        } else {
            theme::button_disabled()
        };
        spans.push(Span::styled(format!(" {} ", action.label()), style));
        spans.push(Span::raw("  "));
    }

    let buttons = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(buttons, area);
}

fn render_hint(frame: &mut Frame, area: Rect) {
    let hint = Line::from(vec![
        Span::styled(" Enter", theme::key_hint()),
        Span::styled(":next ", theme::muted()),
        Span::styled("Shift+Tab", theme::key_hint()),
        Span::styled(":back ", theme::muted()),
        Span::styled("Ctrl+F", theme::key_hint()),
        Span::styled(":finish ", theme::muted()),
        Span::styled("Space", theme::key_hint()),
        Span::styled(":toggle ", theme::muted()),
        Span::styled("Esc", theme::key_hint()),
        Span::styled(":cancel", theme::muted()),
    ]);
    frame.render_widget(Paragraph::new(hint), area);
}
