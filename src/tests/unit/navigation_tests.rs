//! Navigation Controller Tests
//!
//! Gate handling, hook vetoes, terminal actions, transition resolution and
//! the host-driven run loop, exercised through recording probe pages.

use rstest::rstest;

use crate::core::wizard::{
    run, run_with_policy, Completion, Direction, GateState, HookResult, HostEvent,
    NavigationController, NavigationPolicy, Outcome, PageError, PageInput, StepResult,
    WizardAction, WizardDefinition, WizardError, WizardHost, WizardPage, WizardView,
};
use crate::tests::common::{probe_wizard, set_knobs, ProbeContext, ScriptedHost};

const STRICT: NavigationPolicy = NavigationPolicy {
    strict_transitions: true,
};
const LENIENT: NavigationPolicy = NavigationPolicy {
    strict_transitions: false,
};

fn entries(log: &crate::tests::common::CallLog) -> Vec<String> {
    log.borrow().clone()
}

// ============================================================================
// Start
// ============================================================================

#[test]
fn test_start_shows_first_page() {
    let probe = probe_wizard(3);
    let controller = NavigationController::start(probe.definition).unwrap();

    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.outcome(), Outcome::Pending);
    assert_eq!(entries(&probe.log), vec!["p0:on_shown"]);
    // No page precedes the first one
    assert_eq!(
        controller.gates(),
        GateState {
            next: true,
            back: false,
            finish: false
        }
    );
}

#[test]
fn test_start_without_pages_fails() {
    let definition = WizardDefinition::new("Empty", ProbeContext::default());
    let err = NavigationController::start(definition).unwrap_err();
    assert!(matches!(err, WizardError::NoPages(title) if title == "Empty"));
}

// ============================================================================
// Next / Back
// ============================================================================

#[test]
fn test_next_commits_then_shows_target() {
    let probe = probe_wizard(3);
    let mut controller = NavigationController::start(probe.definition).unwrap();

    assert_eq!(
        controller.next().unwrap(),
        StepResult::Moved { from: 0, to: 1 }
    );
    assert_eq!(
        entries(&probe.log),
        vec!["p0:on_shown", "p0:on_next", "p1:on_shown"]
    );
    assert_eq!(controller.context().commits, vec!["p0"]);
    assert!(controller.gates().back);
}

#[test]
fn test_closed_next_gate_runs_no_hook() {
    let probe = probe_wizard(3);
    set_knobs(&probe.knobs[0], |k| k.allow_next = false);
    let mut controller = NavigationController::start(probe.definition).unwrap();

    assert_eq!(controller.next().unwrap(), StepResult::Ignored);
    assert_eq!(controller.current_index(), 0);
    assert_eq!(entries(&probe.log), vec!["p0:on_shown"]);
    assert!(controller.context().commits.is_empty());
}

#[test]
fn test_vetoed_next_stays_on_page() {
    let probe = probe_wizard(3);
    set_knobs(&probe.knobs[0], |k| k.accept_next = false);
    let mut controller = NavigationController::start(probe.definition).unwrap();

    assert_eq!(controller.next().unwrap(), StepResult::Vetoed);
    assert_eq!(controller.current_index(), 0);
    assert_eq!(entries(&probe.log), vec!["p0:on_shown", "p0:on_next"]);
}

#[test]
fn test_back_returns_to_previous_page() {
    let probe = probe_wizard(3);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    controller.next().unwrap();

    assert_eq!(
        controller.back().unwrap(),
        StepResult::Moved { from: 1, to: 0 }
    );
    assert_eq!(
        entries(&probe.log),
        vec![
            "p0:on_shown",
            "p0:on_next",
            "p1:on_shown",
            "p1:on_back",
            "p0:on_shown"
        ]
    );
    // on_back never commits
    assert_eq!(controller.context().commits, vec!["p0"]);
}

#[test]
fn test_back_on_first_page_is_ignored() {
    let probe = probe_wizard(2);
    let mut controller = NavigationController::start(probe.definition).unwrap();

    assert_eq!(controller.back().unwrap(), StepResult::Ignored);
    assert_eq!(entries(&probe.log), vec!["p0:on_shown"]);
}

#[test]
fn test_closed_back_gate_and_veto() {
    let probe = probe_wizard(3);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    controller.next().unwrap();

    set_knobs(&probe.knobs[1], |k| k.allow_back = false);
    assert_eq!(controller.back().unwrap(), StepResult::Ignored);

    set_knobs(&probe.knobs[1], |k| {
        k.allow_back = true;
        k.accept_back = false;
    });
    assert_eq!(controller.back().unwrap(), StepResult::Vetoed);
    assert_eq!(controller.current_index(), 1);
}

#[test]
fn test_reshown_page_gets_on_shown_again() {
    let probe = probe_wizard(3);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    controller.next().unwrap();
    controller.back().unwrap();
    controller.next().unwrap();

    let shows = entries(&probe.log)
        .iter()
        .filter(|e| e.as_str() == "p1:on_shown")
        .count();
    assert_eq!(shows, 2);
}

#[test]
fn test_accepted_next_without_target_stays() {
    let probe = probe_wizard(2);
    set_knobs(&probe.knobs[1], |k| k.allow_next = true);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    controller.next().unwrap();

    assert_eq!(controller.next().unwrap(), StepResult::Stayed);
    assert_eq!(controller.current_index(), 1);
    assert!(controller.is_running());
}

// ============================================================================
// Finish / Cancel
// ============================================================================

#[test]
fn test_finish_runs_hook_then_callback() {
    let probe = probe_wizard(2);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    controller.next().unwrap();

    assert_eq!(controller.finish().unwrap(), StepResult::Finished);
    assert_eq!(controller.outcome(), Outcome::Finished);
    assert!(probe.finished.get());
    assert!(!probe.cancelled.get());
    assert_eq!(controller.gates(), GateState::default());

    let ctx = controller.into_context().unwrap();
    assert_eq!(ctx.commits, vec!["p0", "p1:finish"]);
}

#[test]
fn test_finish_with_closed_gate_changes_nothing() {
    let probe = probe_wizard(3);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    let before = controller.state();

    assert_eq!(controller.finish().unwrap(), StepResult::Ignored);
    assert_eq!(controller.state(), before);
    assert!(controller.context().commits.is_empty());
    assert!(!probe.finished.get());
    assert_eq!(entries(&probe.log), vec!["p0:on_shown"]);
}

#[test]
fn test_vetoed_finish_keeps_running() {
    let probe = probe_wizard(1);
    set_knobs(&probe.knobs[0], |k| k.accept_finish = false);
    let mut controller = NavigationController::start(probe.definition).unwrap();

    assert_eq!(controller.finish().unwrap(), StepResult::Vetoed);
    assert!(controller.is_running());
    assert!(!probe.finished.get());
}

#[test]
fn test_finish_from_middle_page() {
    let probe = probe_wizard(4);
    set_knobs(&probe.knobs[1], |k| k.allow_finish = true);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    controller.next().unwrap();

    assert_eq!(controller.finish().unwrap(), StepResult::Finished);
    assert!(probe.finished.get());
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
fn test_cancel_from_any_page(#[case] steps: usize) {
    let probe = probe_wizard(3);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    for _ in 0..steps {
        controller.next().unwrap();
    }
    // Cancel ignores every gate
    for knobs in &probe.knobs {
        set_knobs(knobs, |k| {
            k.allow_next = false;
            k.allow_back = false;
            k.allow_finish = false;
        });
    }
    let hooks_before = entries(&probe.log).len();

    assert_eq!(controller.cancel().unwrap(), StepResult::Cancelled);
    assert_eq!(controller.outcome(), Outcome::Cancelled);
    assert!(probe.cancelled.get());
    assert!(!probe.finished.get());
    assert_eq!(entries(&probe.log).len(), hooks_before);
    assert!(controller.into_context().is_none());
}

#[test]
fn test_actions_after_end_fail() {
    let probe = probe_wizard(2);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    controller.cancel().unwrap();

    for action in [
        WizardAction::Next,
        WizardAction::Back,
        WizardAction::Finish,
        WizardAction::Cancel,
    ] {
        let err = controller.dispatch(action).unwrap_err();
        assert!(matches!(err, WizardError::AlreadyEnded(Outcome::Cancelled)));
    }
    assert!(!controller.handle_input(PageInput::Select));
}

// ============================================================================
// Hook Errors
// ============================================================================

#[test]
fn test_hook_error_names_page_and_hook() {
    let probe = probe_wizard(3);
    set_knobs(&probe.knobs[0], |k| k.fail_next = true);
    let mut controller = NavigationController::start(probe.definition).unwrap();

    let err = controller.next().unwrap_err();
    match err {
        WizardError::Page { page, hook, source } => {
            assert_eq!(page, "p0");
            assert_eq!(hook, "on_next");
            assert!(matches!(source, PageError::Validation(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(controller.current_index(), 0);
    assert!(controller.is_running());
}

// ============================================================================
// Transition Resolution
// ============================================================================

fn overridden(target: usize, policy: NavigationPolicy) -> NavigationController<ProbeContext> {
    let probe = probe_wizard(3);
    let definition = probe
        .definition
        .with_next(move |index, _| (index == 0).then_some(target));
    NavigationController::start_with_policy(definition, policy).unwrap()
}

#[test]
fn test_override_wins_over_default() {
    let mut controller = overridden(2, STRICT);
    assert_eq!(controller.resolve(Direction::Next).unwrap(), Some(2));
    assert_eq!(
        controller.next().unwrap(),
        StepResult::Moved { from: 0, to: 2 }
    );
}

#[test]
fn test_strict_out_of_range_override_fails() {
    let mut controller = overridden(7, STRICT);
    let err = controller.next().unwrap_err();
    assert!(matches!(
        err,
        WizardError::TransitionOutOfRange {
            direction: Direction::Next,
            from: 0,
            target: 7,
            len: 3
        }
    ));
    assert_eq!(controller.current_index(), 0);
}

#[test]
fn test_lenient_out_of_range_override_uses_default() {
    let mut controller = overridden(7, LENIENT);
    assert_eq!(
        controller.next().unwrap(),
        StepResult::Moved { from: 0, to: 1 }
    );
}

#[test]
fn test_lenient_out_of_range_without_default_stays() {
    let probe = probe_wizard(1);
    set_knobs(&probe.knobs[0], |k| k.allow_next = true);
    let definition = probe.definition.with_next(|_, _| Some(99));
    let mut controller = NavigationController::start_with_policy(definition, LENIENT).unwrap();

    assert_eq!(controller.next().unwrap(), StepResult::Stayed);
}

#[test]
fn test_back_override_enables_back_gate() {
    let probe = probe_wizard(3);
    let definition = probe.definition.with_back(|index, _| (index == 2).then_some(0));
    let mut controller = NavigationController::start_with_policy(definition, STRICT).unwrap();
    controller.next().unwrap();
    controller.next().unwrap();

    assert!(controller.gates().back);
    assert_eq!(
        controller.back().unwrap(),
        StepResult::Moved { from: 2, to: 0 }
    );
}

// ============================================================================
// Gate Polling
// ============================================================================

#[test]
fn test_gates_update_on_refresh() {
    let probe = probe_wizard(2);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    assert!(controller.gates().next);

    set_knobs(&probe.knobs[0], |k| k.allow_next = false);
    // Cached until the next poll
    assert!(controller.gates().next);
    assert!(!controller.refresh_gates().next);
    assert!(!controller.gates().next);
}

#[test]
fn test_view_reflects_active_page() {
    let probe = probe_wizard(3);
    let mut controller = NavigationController::start(probe.definition).unwrap();
    controller.next().unwrap();

    let view = controller.view();
    assert_eq!(view.title, "Probe");
    assert_eq!(view.page_title, "p1");
    assert_eq!(view.index, 1);
    assert_eq!(view.page_count, 3);
    assert_eq!(view.body, vec!["probe p1"]);
    assert_eq!(view.outcome, Outcome::Pending);
}

// ============================================================================
// Run Loop
// ============================================================================

#[test]
fn test_run_finishes_with_context() {
    let probe = probe_wizard(3);
    let mut host = ScriptedHost::actions([
        WizardAction::Next,
        WizardAction::Next,
        WizardAction::Finish,
    ]);

    let completion = run_with_policy(probe.definition, &mut host, STRICT).unwrap();

    assert_eq!(completion.outcome(), Outcome::Finished);
    let ctx = completion.into_context().unwrap();
    assert_eq!(ctx.commits, vec!["p0", "p1", "p2:finish"]);
    let indices: Vec<usize> = host.presented.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_run_cancel_discards_context() {
    let probe = probe_wizard(3);
    let mut host = ScriptedHost::actions([WizardAction::Next, WizardAction::Cancel]);

    let completion = run(probe.definition, &mut host).unwrap();

    assert!(matches!(completion, Completion::Cancelled));
    assert!(probe.cancelled.get());
    assert!(!probe.finished.get());
}

/// Host that opens the first page's Next gate between two polls.
struct GateFlipHost {
    knobs: crate::tests::common::Knobs,
    presented: Vec<GateState>,
}

impl WizardHost for GateFlipHost {
    fn present(&mut self, view: &WizardView<'_>) -> Result<(), WizardError> {
        self.presented.push(view.gates);
        Ok(())
    }

    fn poll_event(&mut self) -> Result<HostEvent, WizardError> {
        if self.presented.len() == 1 {
            set_knobs(&self.knobs, |k| k.allow_next = true);
            return Ok(HostEvent::Tick);
        }
        Ok(HostEvent::Action(WizardAction::Cancel))
    }
}

#[test]
fn test_run_tick_repolls_gates() {
    let probe = probe_wizard(2);
    set_knobs(&probe.knobs[0], |k| k.allow_next = false);
    let mut host = GateFlipHost {
        knobs: probe.knobs[0].clone(),
        presented: Vec::new(),
    };

    run_with_policy(probe.definition, &mut host, STRICT).unwrap();

    assert_eq!(host.presented.len(), 2);
    assert!(!host.presented[0].next);
    assert!(host.presented[1].next);
}

#[test]
fn test_run_routes_input_to_page() {
    let probe = probe_wizard(2);
    let mut host = ScriptedHost::new([
        HostEvent::Input(PageInput::Down),
        HostEvent::Action(WizardAction::Next),
    ]);

    run_with_policy(probe.definition, &mut host, STRICT).unwrap();

    // Input is not an action; only Next moved the run
    let indices: Vec<usize> = host.presented.iter().map(|p| p.index).collect();
    assert_eq!(indices, vec![0, 0, 1]);
}

#[test]
fn test_run_propagates_hook_error() {
    let probe = probe_wizard(2);
    set_knobs(&probe.knobs[0], |k| k.fail_next = true);
    let mut host = ScriptedHost::actions([WizardAction::Next]);

    let err = run_with_policy(probe.definition, &mut host, STRICT).unwrap_err();
    assert!(matches!(err, WizardError::Page { hook: "on_next", .. }));
}

// ============================================================================
// Nested Wizards
// ============================================================================

/// Page whose `on_next` runs a whole inner wizard before committing.
struct NestingPage {
    inner_pages: usize,
    inner_actions: Vec<WizardAction>,
}

impl WizardPage<ProbeContext> for NestingPage {
    fn title(&self) -> &str {
        "outer"
    }

    fn allow_next(&self, _ctx: &ProbeContext) -> bool {
        true
    }

    fn on_shown(&mut self, _ctx: &ProbeContext) {}

    fn on_next(&mut self, ctx: &mut ProbeContext) -> HookResult {
        let inner = probe_wizard(self.inner_pages);
        let mut host = ScriptedHost::actions(self.inner_actions.clone());
        match run_with_policy(inner.definition, &mut host, STRICT)? {
            Completion::Finished(inner_ctx) => {
                ctx.commits.extend(inner_ctx.commits);
                Ok(true)
            }
            // Dismissing the modal keeps the outer page active
            Completion::Cancelled => Ok(false),
        }
    }
}

fn nested_wizard(
    inner_pages: usize,
    inner_actions: Vec<WizardAction>,
) -> WizardDefinition<ProbeContext> {
    let probe = probe_wizard(1);
    WizardDefinition::new("Outer", ProbeContext::default())
        .with_page(NestingPage {
            inner_pages,
            inner_actions,
        })
        .with_boxed_page(
            probe
                .definition
                .pages
                .into_iter()
                .next()
                .expect("probe page"),
        )
}

#[test]
fn test_nested_wizard_commits_into_outer_context() {
    let definition = nested_wizard(2, vec![WizardAction::Next, WizardAction::Finish]);
    let mut controller = NavigationController::start_with_policy(definition, STRICT).unwrap();

    assert_eq!(
        controller.next().unwrap(),
        StepResult::Moved { from: 0, to: 1 }
    );
    assert_eq!(controller.context().commits, vec!["p0", "p1:finish"]);
}

#[test]
fn test_cancelled_nested_wizard_vetoes_outer_step() {
    let definition = nested_wizard(2, vec![WizardAction::Cancel]);
    let mut controller = NavigationController::start_with_policy(definition, STRICT).unwrap();

    assert_eq!(controller.next().unwrap(), StepResult::Vetoed);
    assert!(controller.context().commits.is_empty());
}

#[test]
fn test_nested_wizard_error_surfaces_as_page_error() {
    let definition = nested_wizard(0, Vec::new());
    let mut controller = NavigationController::start_with_policy(definition, STRICT).unwrap();

    let err = controller.next().unwrap_err();
    match err {
        WizardError::Page { page, hook, source } => {
            assert_eq!(page, "outer");
            assert_eq!(hook, "on_next");
            assert!(matches!(
                source,
                PageError::Nested(inner) if matches!(*inner, WizardError::NoPages(_))
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(controller.current_index(), 0);
}
