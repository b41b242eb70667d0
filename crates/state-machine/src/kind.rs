//! Tag enums and the per-kind transition policy.

use core::fmt::Debug;
use core::hash::Hash;

/// Closed set of state tags for one kind of entity.
///
/// Besides naming the states, the tag type carries the policy the engine
/// applies to that kind: whether the current state may be re-entered through
/// [`StateMachine::change_state`](crate::StateMachine::change_state), which tag
/// is a sentinel that can never be entered, and which tags are terminal.
pub trait StateKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Action type that can trigger a request (player input). Kinds without
    /// input use `()`.
    type Trigger: Copy + Debug;

    /// State the default [`State::on_state_complete`](crate::State::on_state_complete)
    /// returns to.
    const NEUTRAL: Self;

    /// Whether `change_state(current)` re-enters the current state.
    fn allows_reentry() -> bool {
        true
    }

    /// Placeholder tags ("none") that must never become the current state.
    fn is_sentinel(self) -> bool {
        false
    }

    /// Once a terminal tag is current, no further transition is accepted.
    fn is_terminal(self) -> bool {
        false
    }
}

/// Context types expose the simulation clock the engine measures state time
/// against.
pub trait Clocked {
    /// Current simulation time in seconds.
    fn now(&self) -> f32;
}
