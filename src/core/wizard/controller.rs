//! Navigation Controller
//!
//! Drives a single wizard run: tracks the active page, polls gates, invokes
//! page hooks and resolves transitions through the definition's overrides,
//! falling back to the default sequential order.
//!
//! There is no history stack. Back targets are recomputed from the current
//! index and context each time, so the path back from a page may differ from
//! the path that reached it if the context changed in between.

use std::fmt;

use tracing::{debug, info, trace, warn};

use super::definition::WizardDefinition;
use super::error::{PageError, WizardError};
use super::host::{HostEvent, WizardAction, WizardHost};
use super::page::PageInput;

// ============================================================================
// State Types
// ============================================================================

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Pending,
    Finished,
    Cancelled,
}

/// Navigation direction of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Back,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Next => write!(f, "next"),
            Direction::Back => write!(f, "back"),
        }
    }
}

/// Controller-owned navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current_index: usize,
    pub outcome: Outcome,
}

/// Last polled gate values of the active page. Cancel is always enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateState {
    pub next: bool,
    pub back: bool,
    pub finish: bool,
}

impl GateState {
    pub fn allows(&self, action: WizardAction) -> bool {
        match action {
            WizardAction::Next => self.next,
            WizardAction::Back => self.back,
            WizardAction::Finish => self.finish,
            WizardAction::Cancel => true,
        }
    }
}

/// What a dispatched action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The gate was closed; nothing happened.
    Ignored,
    /// The page hook returned `false`.
    Vetoed,
    /// The hook accepted but no target page exists; the page stays active.
    Stayed,
    Moved { from: usize, to: usize },
    Finished,
    Cancelled,
}

/// How out-of-range override targets are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationPolicy {
    /// Fail with [`WizardError::TransitionOutOfRange`] instead of falling
    /// back to the sequential index.
    pub strict_transitions: bool,
}

impl Default for NavigationPolicy {
    fn default() -> Self {
        Self {
            strict_transitions: cfg!(debug_assertions),
        }
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub enum Completion<C> {
    /// The run finished; carries the committed context.
    Finished(C),
    /// The run was cancelled; the context was discarded.
    Cancelled,
}

impl<C> Completion<C> {
    pub fn outcome(&self) -> Outcome {
        match self {
            Completion::Finished(_) => Outcome::Finished,
            Completion::Cancelled => Outcome::Cancelled,
        }
    }

    pub fn into_context(self) -> Option<C> {
        match self {
            Completion::Finished(ctx) => Some(ctx),
            Completion::Cancelled => None,
        }
    }
}

/// Borrowed snapshot of a run for a host to draw.
#[derive(Debug, Clone)]
pub struct WizardView<'a> {
    pub title: &'a str,
    pub page_title: &'a str,
    pub index: usize,
    pub page_count: usize,
    pub body: Vec<String>,
    pub gates: GateState,
    pub outcome: Outcome,
}

// ============================================================================
// NavigationController
// ============================================================================

/// Drives one wizard run over a [`WizardDefinition`].
pub struct NavigationController<C> {
    definition: WizardDefinition<C>,
    state: NavigationState,
    gates: GateState,
    policy: NavigationPolicy,
}

impl<C> NavigationController<C> {
    /// Start a run with the default policy, activating the first page.
    pub fn start(definition: WizardDefinition<C>) -> Result<Self, WizardError> {
        Self::start_with_policy(definition, NavigationPolicy::default())
    }

    /// Start a run with an explicit policy, activating the first page.
    pub fn start_with_policy(
        mut definition: WizardDefinition<C>,
        policy: NavigationPolicy,
    ) -> Result<Self, WizardError> {
        if definition.pages.is_empty() {
            return Err(WizardError::NoPages(definition.title));
        }

        debug!(
            wizard = %definition.title,
            pages = definition.pages.len(),
            strict = policy.strict_transitions,
            "Starting wizard run"
        );

        definition.pages[0].on_shown(&definition.context);

        let mut controller = Self {
            definition,
            state: NavigationState::default(),
            gates: GateState::default(),
            policy,
        };
        controller.refresh_gates();
        Ok(controller)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn title(&self) -> &str {
        &self.definition.title
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn page_count(&self) -> usize {
        self.definition.pages.len()
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn is_running(&self) -> bool {
        self.state.outcome == Outcome::Pending
    }

    pub fn policy(&self) -> NavigationPolicy {
        self.policy
    }

    /// Gate values as of the last [`refresh_gates`](Self::refresh_gates).
    pub fn gates(&self) -> GateState {
        self.gates
    }

    pub fn context(&self) -> &C {
        &self.definition.context
    }

    pub fn current_page_title(&self) -> &str {
        self.definition.pages[self.state.current_index].title()
    }

    /// Snapshot of the run for presentation.
    pub fn view(&self) -> WizardView<'_> {
        let page = &self.definition.pages[self.state.current_index];
        WizardView {
            title: &self.definition.title,
            page_title: page.title(),
            index: self.state.current_index,
            page_count: self.definition.pages.len(),
            body: page.body(&self.definition.context),
            gates: self.gates,
            outcome: self.state.outcome,
        }
    }

    /// Consume the controller, yielding the context only if the run finished.
    pub fn into_context(self) -> Option<C> {
        match self.state.outcome {
            Outcome::Finished => Some(self.definition.context),
            Outcome::Pending | Outcome::Cancelled => None,
        }
    }

    /// Consume an ended controller. Returns `None` while the run is pending.
    pub fn into_completion(self) -> Option<Completion<C>> {
        match self.state.outcome {
            Outcome::Pending => None,
            Outcome::Finished => Some(Completion::Finished(self.definition.context)),
            Outcome::Cancelled => Some(Completion::Cancelled),
        }
    }

    // =========================================================================
    // Gate Polling
    // =========================================================================

    /// Re-poll the active page's gates. Hosts call this on every tick.
    pub fn refresh_gates(&mut self) -> GateState {
        let gates = if self.is_running() {
            let def = &self.definition;
            let page = &def.pages[self.state.current_index];
            GateState {
                next: page.allow_next(&def.context),
                back: page.allow_back(&def.context) && self.has_back_target(),
                finish: page.allow_finish(&def.context),
            }
        } else {
            GateState::default()
        };

        if gates != self.gates {
            trace!(
                page = self.state.current_index,
                next = gates.next,
                back = gates.back,
                finish = gates.finish,
                "Gates changed"
            );
        }
        self.gates = gates;
        gates
    }

    /// Route input to the active page. Returns whether the page consumed it.
    pub fn handle_input(&mut self, input: PageInput) -> bool {
        if !self.is_running() {
            return false;
        }
        let def = &mut self.definition;
        def.pages[self.state.current_index].handle_input(input, &def.context)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub fn dispatch(&mut self, action: WizardAction) -> Result<StepResult, WizardError> {
        match action {
            WizardAction::Next => self.next(),
            WizardAction::Back => self.back(),
            WizardAction::Finish => self.finish(),
            WizardAction::Cancel => self.cancel(),
        }
    }

    /// Advance, if the active page allows it and its `on_next` accepts.
    pub fn next(&mut self) -> Result<StepResult, WizardError> {
        self.ensure_running()?;
        let from = self.state.current_index;

        let def = &mut self.definition;
        let page = &mut def.pages[from];
        if !page.allow_next(&def.context) {
            trace!(page = from, "Next ignored: gate closed");
            return Ok(StepResult::Ignored);
        }

        let accepted = page
            .on_next(&mut def.context)
            .map_err(|e| page_error(page.title(), "on_next", e))?;
        if !accepted {
            debug!(page = from, "Next vetoed by page");
            self.refresh_gates();
            return Ok(StepResult::Vetoed);
        }

        self.move_to(Direction::Next)
    }

    /// Go back, if the active page allows it and its `on_back` accepts.
    pub fn back(&mut self) -> Result<StepResult, WizardError> {
        self.ensure_running()?;
        let from = self.state.current_index;

        if !self.has_back_target() {
            trace!(page = from, "Back ignored: no previous page");
            return Ok(StepResult::Ignored);
        }

        let def = &mut self.definition;
        let page = &mut def.pages[from];
        if !page.allow_back(&def.context) {
            trace!(page = from, "Back ignored: gate closed");
            return Ok(StepResult::Ignored);
        }

        let accepted = page
            .on_back(&def.context)
            .map_err(|e| page_error(page.title(), "on_back", e))?;
        if !accepted {
            debug!(page = from, "Back vetoed by page");
            return Ok(StepResult::Vetoed);
        }

        self.move_to(Direction::Back)
    }

    /// Finish the run from the active page.
    pub fn finish(&mut self) -> Result<StepResult, WizardError> {
        self.ensure_running()?;
        let index = self.state.current_index;

        let def = &mut self.definition;
        let page = &mut def.pages[index];
        if !page.allow_finish(&def.context) {
            trace!(page = index, "Finish ignored: gate closed");
            return Ok(StepResult::Ignored);
        }

        let accepted = page
            .on_finish(&mut def.context)
            .map_err(|e| page_error(page.title(), "on_finish", e))?;
        if !accepted {
            debug!(page = index, "Finish vetoed by page");
            self.refresh_gates();
            return Ok(StepResult::Vetoed);
        }

        if let Some(callback) = def.on_finish.as_mut() {
            callback(&mut def.context);
        }
        self.state.outcome = Outcome::Finished;
        self.gates = GateState::default();
        info!(wizard = %self.definition.title, page = index, "Wizard finished");
        Ok(StepResult::Finished)
    }

    /// Cancel the run. Always permitted; no page hook runs.
    pub fn cancel(&mut self) -> Result<StepResult, WizardError> {
        self.ensure_running()?;

        let def = &mut self.definition;
        if let Some(callback) = def.on_cancel.as_mut() {
            callback(&def.context);
        }
        self.state.outcome = Outcome::Cancelled;
        self.gates = GateState::default();
        info!(
            wizard = %self.definition.title,
            page = self.state.current_index,
            "Wizard cancelled"
        );
        Ok(StepResult::Cancelled)
    }

    // =========================================================================
    // Transition Resolution
    // =========================================================================

    /// Resolve the target of a transition from the active page.
    ///
    /// Returns `Ok(None)` when neither the override nor the default rule
    /// yields a page.
    pub fn resolve(&self, direction: Direction) -> Result<Option<usize>, WizardError> {
        let from = self.state.current_index;
        let len = self.definition.pages.len();
        let default = default_target(direction, from, len);

        match self.override_target(direction) {
            Some(target) if target < len => Ok(Some(target)),
            Some(target) => {
                if self.policy.strict_transitions {
                    return Err(WizardError::TransitionOutOfRange {
                        direction,
                        from,
                        target,
                        len,
                    });
                }
                warn!(
                    wizard = %self.definition.title,
                    %direction,
                    from,
                    target,
                    len,
                    fallback = ?default,
                    "Transition override out of range, using default"
                );
                Ok(default)
            }
            None => Ok(default),
        }
    }

    fn override_target(&self, direction: Direction) -> Option<usize> {
        let def = &self.definition;
        let transition = match direction {
            Direction::Next => def.next.as_ref(),
            Direction::Back => def.back.as_ref(),
        };
        transition.and_then(|f| f(self.state.current_index, &def.context))
    }

    /// Whether Back has anywhere to go. `on_back` never commits, so this is
    /// exact before the hook runs.
    fn has_back_target(&self) -> bool {
        self.override_target(Direction::Back).is_some()
            || default_target(Direction::Back, self.state.current_index, self.page_count())
                .is_some()
    }

    fn move_to(&mut self, direction: Direction) -> Result<StepResult, WizardError> {
        let from = self.state.current_index;
        let Some(to) = self.resolve(direction)? else {
            warn!(
                wizard = %self.definition.title,
                %direction,
                from,
                "No target page, staying on current page"
            );
            self.refresh_gates();
            return Ok(StepResult::Stayed);
        };

        self.state.current_index = to;
        let def = &mut self.definition;
        def.pages[to].on_shown(&def.context);
        debug!(
            wizard = %def.title,
            %direction,
            from,
            to,
            page = def.pages[to].title(),
            "Page shown"
        );
        self.refresh_gates();
        Ok(StepResult::Moved { from, to })
    }

    fn ensure_running(&self) -> Result<(), WizardError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(WizardError::AlreadyEnded(self.state.outcome))
        }
    }
}

impl<C> fmt::Debug for NavigationController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationController")
            .field("title", &self.definition.title)
            .field("state", &self.state)
            .field("gates", &self.gates)
            .field("policy", &self.policy)
            .finish()
    }
}

fn default_target(direction: Direction, from: usize, len: usize) -> Option<usize> {
    match direction {
        Direction::Next => from.checked_add(1),
        Direction::Back => from.checked_sub(1),
    }
    .filter(|&target| target < len)
}

fn page_error(page: &str, hook: &'static str, source: PageError) -> WizardError {
    WizardError::Page {
        page: page.to_string(),
        hook,
        source,
    }
}

// ============================================================================
// Run Loop
// ============================================================================

/// Run a wizard against a host with the default policy.
pub fn run<C, H>(
    definition: WizardDefinition<C>,
    host: &mut H,
) -> Result<Completion<C>, WizardError>
where
    H: WizardHost + ?Sized,
{
    run_with_policy(definition, host, NavigationPolicy::default())
}

/// Run a wizard against a host until it finishes or is cancelled.
///
/// Re-entrant: a page hook may call this with its own host to drive a nested
/// modal wizard before returning.
pub fn run_with_policy<C, H>(
    definition: WizardDefinition<C>,
    host: &mut H,
    policy: NavigationPolicy,
) -> Result<Completion<C>, WizardError>
where
    H: WizardHost + ?Sized,
{
    let mut controller = NavigationController::start_with_policy(definition, policy)?;

    while controller.is_running() {
        host.present(&controller.view())?;

        match host.poll_event()? {
            HostEvent::Tick => {
                controller.refresh_gates();
            }
            HostEvent::Input(input) => {
                controller.handle_input(input);
            }
            HostEvent::Action(action) => {
                let result = controller.dispatch(action)?;
                trace!(action = action.label(), ?result, "Action dispatched");
            }
        }
    }

    Ok(match controller.into_context() {
        Some(ctx) => Completion::Finished(ctx),
        None => Completion::Cancelled,
    })
}
