//! State lifecycle contract.
//!
//! This module defines the [`State`] trait, the closed capability interface
//! every concrete behavior implements. The trait is generic over the owner's
//! context type `C` and the tag type `K`, so one engine serves every kind of
//! entity while each kind keeps its own context.

use crate::{StateKind, StateTiming, Transition};

/// A single behavior of an entity, dispatched by [`StateMachine`](crate::StateMachine).
///
/// Owner references are not cached on a shared base: a state copies what it
/// needs from the context in [`initialize`](State::initialize) and receives the
/// context mutably on every lifecycle call.
pub trait State<C, K: StateKind> {
    /// Tag this state is registered under.
    fn kind(&self) -> K;

    /// Declared duration in seconds; `0.0` means the state runs until it
    /// requests a transition itself.
    fn duration(&self) -> f32 {
        0.0
    }

    /// Whether [`on_interrupted`](State::on_interrupted) runs when the state is
    /// force-interrupted. Interruptibility never blocks the landing transition.
    fn can_be_interrupted(&self) -> bool {
        true
    }

    /// Called once when the machine is bound to its owner.
    fn initialize(&mut self, _ctx: &C) {}

    /// Called when the state becomes current. `from` is the previous tag, or
    /// `None` when the machine starts.
    fn enter(&mut self, ctx: &mut C, from: Option<K>);

    /// Frame-rate-variable logic. Runs before the engine's auto-completion
    /// check; a non-[`Stay`](Transition::Stay) request suppresses that check
    /// for this tick.
    fn execute(&mut self, _ctx: &mut C, _timing: &StateTiming) -> Transition<K> {
        Transition::Stay
    }

    /// Fixed-rate logic, called once per physics step.
    fn physics_execute(&mut self, _ctx: &mut C, _timing: &StateTiming) {}

    /// Called when the state stops being current.
    fn exit(&mut self, _ctx: &mut C) {}

    /// Called before exit when the state is force-interrupted while
    /// interruptible.
    fn on_interrupted(&mut self, _ctx: &mut C) {}

    /// Guard consulted by `try_change_state`. Permissive by default.
    fn can_transition_to(&self, _target: K, _timing: &StateTiming) -> bool {
        true
    }

    /// Guard keyed by the action that caused the request. Falls back to
    /// [`can_transition_to`](State::can_transition_to).
    fn can_transition_with(&self, target: K, _trigger: K::Trigger, timing: &StateTiming) -> bool {
        self.can_transition_to(target, timing)
    }

    /// Called when a bounded state reaches its duration. Returns to the
    /// neutral state unless overridden.
    fn on_state_complete(&mut self, _ctx: &mut C) -> Transition<K> {
        Transition::Change(K::NEUTRAL)
    }
}
