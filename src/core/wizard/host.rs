//! Host boundary for wizard runs.
//!
//! A host draws the active page and turns user activity into [`HostEvent`]s.
//! The engine never touches a terminal or window itself, so the same
//! definition runs under the terminal host or a scripted test host.

use super::controller::WizardView;
use super::error::WizardError;
use super::page::PageInput;

/// The four user actions a wizard understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardAction {
    Next,
    Back,
    Finish,
    Cancel,
}

impl WizardAction {
    pub fn label(self) -> &'static str {
        match self {
            WizardAction::Next => "Next",
            WizardAction::Back => "Back",
            WizardAction::Finish => "Finish",
            WizardAction::Cancel => "Cancel",
        }
    }
}

/// Events produced by a host between two presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Periodic tick: the controller re-polls the active page's gates.
    Tick,
    /// A navigation action.
    Action(WizardAction),
    /// Input for the active page.
    Input(PageInput),
}

/// Something that can present a wizard and feed it events.
pub trait WizardHost {
    /// Draw the current state of the run.
    fn present(&mut self, view: &WizardView<'_>) -> Result<(), WizardError>;

    /// Block until the next event. Returning [`HostEvent::Tick`] when nothing
    /// happened within the host's tick interval keeps gates live.
    fn poll_event(&mut self) -> Result<HostEvent, WizardError>;
}
