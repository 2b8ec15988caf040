//! Simulation observer trait for debug overlays, logging and tests.

use foe_brain::{AgentController, Directive, Transition};
use foe_core::Tick;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: state-change printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl SimObserver for Printer {
///     fn on_transition(&mut self, tick: Tick, t: &Transition) {
///         println!("{tick}: agent {} {} -> {}", t.agent, t.from, t.to);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any agent runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per state change, in the order they happened.
    fn on_transition(&mut self, _tick: Tick, _transition: &Transition) {}

    /// Called once per coordinator directive, after it was applied.
    fn on_directive(&mut self, _tick: Tick, _directive: &Directive) {}

    /// Called at the end of each tick with read-only access to every agent
    /// (for `AgentController::view`).
    fn on_tick_end(&mut self, _tick: Tick, _agents: &[AgentController]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Records every transition and directive with the tick it happened on.
#[derive(Clone, Debug, Default)]
pub struct SimLog {
    pub transitions: Vec<(Tick, Transition)>,
    pub directives:  Vec<(Tick, Directive)>,
}

impl SimLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimObserver for SimLog {
    fn on_transition(&mut self, tick: Tick, transition: &Transition) {
        self.transitions.push((tick, *transition));
    }

    fn on_directive(&mut self, tick: Tick, directive: &Directive) {
        self.directives.push((tick, *directive));
    }
}
