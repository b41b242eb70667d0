//! Transition requests returned by states.

/// What a state asks the engine to do once its own code for this call is done.
///
/// The engine applies the request after `execute`/`on_state_complete` returns,
/// so a state never observes a half-finished transition in the middle of its
/// own tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<K> {
    /// Keep running the current state.
    Stay,
    /// Unconditional change (`change_state`).
    Change(K),
    /// Guarded change (`try_change_state`), subject to `can_transition_to`.
    Try(K),
    /// Interrupting change (`force_interrupt`).
    Interrupt(K),
    /// Full Exit→Enter of the current state, regardless of the reentry policy.
    Restart,
}

impl<K> Transition<K> {
    /// Returns `true` if this request leaves the machine untouched.
    #[inline]
    pub fn is_stay(&self) -> bool {
        matches!(self, Transition::Stay)
    }
}

impl<K> Default for Transition<K> {
    fn default() -> Self {
        Transition::Stay
    }
}
