//! Per-entity state machine.
//!
//! The [`StateMachine`] owns one instance of every registered state of its
//! kind and drives the current one. It never holds a reference to its owner:
//! the owner's context is passed into every call that can run state code.

use std::collections::HashMap;

use tracing::{debug, error, trace, warn};

use crate::{Clocked, State, StateCatalog, StateKind, StateSet, StateTiming, Transition};

type TransitionListener<K> = Box<dyn FnMut(Option<K>, K)>;

/// Registry plus dispatcher for the states of one entity.
pub struct StateMachine<C, K: StateKind> {
    owner: String,
    states: HashMap<K, Box<dyn State<C, K>>>,
    current: Option<K>,
    previous: Option<K>,
    entered_at: f32,
    now: f32,
    bound: bool,
    transitions: u64,
    listeners: Vec<TransitionListener<K>>,
}

impl<C: Clocked + 'static, K: StateSet<C>> StateMachine<C, K> {
    /// Builds a machine for `owner` from the catalog's factory table for `K`.
    ///
    /// Each factory runs once for this machine. Factories that fail are logged
    /// and skipped; the remaining states still register.
    pub fn from_catalog(catalog: &StateCatalog, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        let table = catalog.factories::<C, K>();
        let mut states: HashMap<K, Box<dyn State<C, K>>> = HashMap::with_capacity(table.len());

        for (kind, factory) in table.iter() {
            match factory() {
                Ok(state) => {
                    if state.kind() != *kind {
                        warn!(
                            target: "state_machine",
                            owner = %owner,
                            registered = ?kind,
                            reported = ?state.kind(),
                            "state reports a different tag than it was registered under"
                        );
                    }
                    states.insert(*kind, state);
                }
                Err(err) => {
                    error!(
                        target: "state_machine",
                        owner = %owner,
                        state = ?kind,
                        error = %err,
                        "failed to build state, skipping"
                    );
                }
            }
        }

        Self::with_states(owner, states)
    }
}

impl<C: Clocked, K: StateKind> StateMachine<C, K> {
    fn with_states(owner: String, states: HashMap<K, Box<dyn State<C, K>>>) -> Self {
        Self {
            owner,
            states,
            current: None,
            previous: None,
            entered_at: 0.0,
            now: 0.0,
            bound: false,
            transitions: 0,
            listeners: Vec::new(),
        }
    }

    /// Builds a machine from already constructed states. Later duplicates of a
    /// tag are dropped.
    pub fn from_states(
        owner: impl Into<String>,
        states: impl IntoIterator<Item = Box<dyn State<C, K>>>,
    ) -> Self {
        let mut map: HashMap<K, Box<dyn State<C, K>>> = HashMap::new();
        for state in states {
            map.entry(state.kind()).or_insert(state);
        }
        Self::with_states(owner.into(), map)
    }

    /// Binds the machine to its owner and lets every state capture what it
    /// needs from the context. Must be called before [`start`](Self::start).
    pub fn initialize(&mut self, ctx: &C) {
        self.now = ctx.now();
        for state in self.states.values_mut() {
            state.initialize(ctx);
        }
        self.bound = true;
        debug!(
            target: "state_machine",
            owner = %self.owner,
            states = self.states.len(),
            "machine initialized"
        );
    }

    /// Enters `initial`. Returns `false` (and logs) if the machine is not
    /// initialized, already running, or `initial` is unregistered.
    pub fn start(&mut self, initial: K, ctx: &mut C) -> bool {
        if !self.bound {
            warn!(
                target: "state_machine",
                owner = %self.owner,
                state = ?initial,
                "start called before initialize"
            );
            return false;
        }
        if self.current.is_some() {
            warn!(
                target: "state_machine",
                owner = %self.owner,
                state = ?initial,
                "machine already started"
            );
            return false;
        }
        if !self.is_enterable(initial) {
            return false;
        }
        self.now = ctx.now();
        self.enter(initial, ctx);
        true
    }

    /// Exits the current state and enters `target` without consulting the
    /// current state's guard.
    ///
    /// Returns `false` if `target` is unregistered or a sentinel, the current
    /// state is terminal, or `target` is current and the kind forbids reentry.
    pub fn change_state(&mut self, target: K, ctx: &mut C) -> bool {
        self.now = ctx.now();
        if !self.is_ready(target) || !self.is_enterable(target) {
            return false;
        }
        if self.current == Some(target) && !K::allows_reentry() {
            trace!(
                target: "state_machine",
                owner = %self.owner,
                state = ?target,
                "self transition rejected"
            );
            return false;
        }
        self.switch_to(target, ctx);
        true
    }

    /// Changes state only if the current state's
    /// [`can_transition_to`](State::can_transition_to) accepts `target`.
    pub fn try_change_state(&mut self, target: K, ctx: &mut C) -> bool {
        self.now = ctx.now();
        if !self.guard_allows(target, |state, timing| state.can_transition_to(target, timing)) {
            return false;
        }
        self.change_state(target, ctx)
    }

    /// Changes state only if the current state accepts `target` for the given
    /// trigger.
    pub fn try_change_state_with(&mut self, target: K, trigger: K::Trigger, ctx: &mut C) -> bool {
        self.now = ctx.now();
        if !self.guard_allows(target, |state, timing| {
            state.can_transition_with(target, trigger, timing)
        }) {
            return false;
        }
        self.change_state(target, ctx)
    }

    /// Interrupts the current state and lands in `target`.
    ///
    /// The interrupt hook runs only if the current state is interruptible; the
    /// landing transition happens either way, re-entering `target` if it is
    /// already current. Only a terminal current state or an unusable target
    /// can stop it.
    pub fn force_interrupt(&mut self, target: K, ctx: &mut C) -> bool {
        self.now = ctx.now();
        if !self.is_ready(target) || !self.is_enterable(target) {
            return false;
        }
        if let Some(current) = self.current {
            if let Some(state) = self.states.get_mut(&current) {
                if state.can_be_interrupted() {
                    state.on_interrupted(ctx);
                } else {
                    trace!(
                        target: "state_machine",
                        owner = %self.owner,
                        state = ?current,
                        "interrupt hook skipped for uninterruptible state"
                    );
                }
            }
        }
        self.switch_to(target, ctx);
        true
    }

    /// Frame tick: runs the current state's `execute`, then the
    /// auto-completion check, then applies whatever was requested.
    pub fn tick(&mut self, ctx: &mut C, dt: f32) {
        self.now = ctx.now();
        let Some(kind) = self.current else {
            return;
        };
        let Some(state) = self.states.get_mut(&kind) else {
            return;
        };

        let timing = StateTiming::new(self.now, dt, self.entered_at, state.duration());
        let mut request = state.execute(ctx, &timing);
        if request.is_stay() {
            // Duration is read after execute: a state may settle it during its
            // first tick.
            let duration = state.duration();
            if timing.is_complete(duration) {
                request = state.on_state_complete(ctx);
            }
        }

        self.apply(request, ctx);
    }

    /// Physics tick: runs the current state's `physics_execute`.
    pub fn physics_tick(&mut self, ctx: &mut C, dt: f32) {
        self.now = ctx.now();
        let Some(kind) = self.current else {
            return;
        };
        let entered_at = self.entered_at;
        let now = self.now;
        if let Some(state) = self.states.get_mut(&kind) {
            let timing = StateTiming::new(now, dt, entered_at, state.duration());
            state.physics_execute(ctx, &timing);
        }
    }

    /// Applies a transition request on behalf of a state or an owner.
    pub fn apply(&mut self, request: Transition<K>, ctx: &mut C) -> bool {
        match request {
            Transition::Stay => false,
            Transition::Change(target) => self.change_state(target, ctx),
            Transition::Try(target) => self.try_change_state(target, ctx),
            Transition::Interrupt(target) => self.force_interrupt(target, ctx),
            Transition::Restart => self.restart(ctx),
        }
    }

    /// Re-enters the current state with a full Exit→Enter, ignoring the
    /// reentry policy. Refused for terminal states.
    pub fn restart(&mut self, ctx: &mut C) -> bool {
        self.now = ctx.now();
        let Some(current) = self.current else {
            return false;
        };
        if current.is_terminal() {
            debug!(
                target: "state_machine",
                owner = %self.owner,
                state = ?current,
                "terminal state cannot restart"
            );
            return false;
        }
        self.switch_to(current, ctx);
        true
    }

    /// Adds a callback fired after every completed transition with
    /// `(previous, new)`.
    pub fn on_transition(&mut self, listener: impl FnMut(Option<K>, K) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Current state tag.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// State that was current before the last transition.
    pub fn previous(&self) -> Option<K> {
        self.previous
    }

    /// Returns true if `kind` is current.
    pub fn is_in(&self, kind: K) -> bool {
        self.current == Some(kind)
    }

    /// Returns true if a state instance exists for `kind`.
    pub fn is_registered(&self, kind: K) -> bool {
        self.states.contains_key(&kind)
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Returns true once [`initialize`](Self::initialize) ran.
    pub fn is_initialized(&self) -> bool {
        self.bound
    }

    /// Returns true while a terminal state is current.
    pub fn is_terminal(&self) -> bool {
        self.current.is_some_and(StateKind::is_terminal)
    }

    /// Whether the current state's interrupt hook would run.
    pub fn is_interruptible(&self) -> bool {
        self.current
            .and_then(|kind| self.states.get(&kind))
            .is_none_or(|state| state.can_be_interrupted())
    }

    /// Total number of completed transitions (including restarts).
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    /// Simulation time at which the current state was entered.
    pub fn entered_at(&self) -> f32 {
        self.entered_at
    }

    /// Seconds spent in the current state as of the last call.
    pub fn state_time(&self) -> f32 {
        (self.now - self.entered_at).max(0.0)
    }

    /// Current state's declared duration (0 when unbounded or stopped).
    pub fn state_duration(&self) -> f32 {
        self.current
            .and_then(|kind| self.states.get(&kind))
            .map_or(0.0, |state| state.duration())
    }

    /// `state_time / duration` clamped to `[0, 1]`, or 0 for unbounded states.
    pub fn normalized_time(&self) -> f32 {
        crate::timing::normalize(self.state_time(), self.state_duration())
    }

    /// Timing snapshot of the current state as of the last call.
    pub fn timing(&self) -> StateTiming {
        StateTiming::new(self.now, 0.0, self.entered_at, self.state_duration())
    }

    /// Owner label used in logs.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    fn guard_allows(
        &self,
        target: K,
        guard: impl FnOnce(&dyn State<C, K>, &StateTiming) -> bool,
    ) -> bool {
        let Some(current) = self.current else {
            return true;
        };
        let Some(state) = self.states.get(&current) else {
            return true;
        };
        let timing = StateTiming::new(self.now, 0.0, self.entered_at, state.duration());
        let allowed = guard(state.as_ref(), &timing);
        if !allowed {
            trace!(
                target: "state_machine",
                owner = %self.owner,
                from = ?current,
                to = ?target,
                normalized = timing.normalized_time,
                "transition denied"
            );
        }
        allowed
    }

    /// Rejects every request while a terminal state is current.
    fn is_ready(&self, target: K) -> bool {
        match self.current {
            Some(current) if current.is_terminal() => {
                debug!(
                    target: "state_machine",
                    owner = %self.owner,
                    from = ?current,
                    to = ?target,
                    "terminal state rejects transition"
                );
                false
            }
            _ => {
                if !self.bound {
                    warn!(
                        target: "state_machine",
                        owner = %self.owner,
                        to = ?target,
                        "transition requested before initialize"
                    );
                    return false;
                }
                true
            }
        }
    }

    fn is_enterable(&self, target: K) -> bool {
        if target.is_sentinel() {
            warn!(
                target: "state_machine",
                owner = %self.owner,
                state = ?target,
                "sentinel state cannot be entered"
            );
            return false;
        }
        if !self.states.contains_key(&target) {
            warn!(
                target: "state_machine",
                owner = %self.owner,
                state = ?target,
                "state not registered"
            );
            return false;
        }
        true
    }

    fn switch_to(&mut self, target: K, ctx: &mut C) {
        let previous = self.current;
        if let Some(state) = previous.and_then(|kind| self.states.get_mut(&kind)) {
            state.exit(ctx);
        }
        self.enter_from(target, previous, ctx);
    }

    fn enter(&mut self, target: K, ctx: &mut C) {
        self.enter_from(target, None, ctx);
    }

    fn enter_from(&mut self, target: K, previous: Option<K>, ctx: &mut C) {
        self.previous = previous;
        self.current = Some(target);
        self.entered_at = self.now;
        self.transitions += 1;

        if let Some(state) = self.states.get_mut(&target) {
            state.enter(ctx, previous);
        }

        debug!(
            target: "state_machine",
            owner = %self.owner,
            from = ?previous,
            to = ?target,
            at = self.now,
            "state changed"
        );
        for listener in &mut self.listeners {
            listener(previous, target);
        }
    }
}

impl<C, K: StateKind> core::fmt::Debug for StateMachine<C, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateMachine")
            .field("owner", &self.owner)
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("entered_at", &self.entered_at)
            .field("states", &self.states.len())
            .finish()
    }
}
