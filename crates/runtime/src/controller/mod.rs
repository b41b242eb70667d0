//! Entity controllers.
//!
//! A [`Controller`] owns one combatant: its context (runtime data and
//! collaborators) and its state machine. It is the only place that turns a
//! [`HitResolution`] into transitions and notifications, and the only place
//! allowed to force death past an uninterruptible state.

mod combatant;

pub use combatant::Combatant;

use std::sync::Arc;

use combat_core::{
    CombatantId, DamageInfo, HitContext, HitResolution, StaggerSeverity, resolve_hit,
};
use state_machine::{StateCatalog, StateMachine};
use tracing::{debug, info};

use crate::context::{ActiveSwing, CombatContext, CombatKind, CombatantCore};
use crate::error::{Result, RuntimeError};
use crate::events::CombatEvent;
use crate::states::enemy::{EnemyArchetype, EnemyContext};
use crate::states::player::{InputSnapshot, PlayerContext};

pub type EnemyController = Controller<EnemyContext>;
pub type PlayerController = Controller<PlayerContext>;

/// Drives one combatant.
pub struct Controller<C: CombatContext> {
    machine: StateMachine<C, C::Kind>,
    ctx: C,
}

impl<C: CombatContext> Controller<C> {
    /// Builds the combatant's states from `catalog` and starts it in
    /// [`CombatContext::INITIAL`].
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::StartFailed`] if the initial state could not be
    /// entered (not registered for this kind).
    pub fn new(catalog: &StateCatalog, mut ctx: C) -> Result<Self> {
        let core = ctx.core();
        let id = core.id;
        let events = core.events.clone();
        let mut machine = StateMachine::from_catalog(catalog, format!("{}{}", core.name, id));

        machine.on_transition(move |from: Option<C::Kind>, to: C::Kind| {
            events.publish(CombatEvent::StateChanged {
                entity: id,
                from: from.map(CombatKind::label),
                to: to.label(),
            });
        });
        machine.initialize(&ctx);

        if !machine.start(C::INITIAL, &mut ctx) {
            return Err(RuntimeError::StartFailed {
                name: ctx.core().name.clone(),
                state: C::INITIAL.label(),
            });
        }

        info!(
            target: "combat_runtime::controller",
            entity = %id,
            name = %ctx.core().name,
            state = C::INITIAL.label(),
            "combatant spawned"
        );
        Ok(Self { machine, ctx })
    }

    /// Frame tick: advances the clock, regenerates resources, routes input,
    /// then runs the current state.
    pub fn tick(&mut self, dt: f32) {
        let core = self.ctx.core_mut();
        core.advance(dt);
        if core.is_alive() {
            let now = core.now();
            core.runtime.regenerate(&core.stats, now, dt);
        }

        C::before_tick(&mut self.machine, &mut self.ctx);
        self.machine.tick(&mut self.ctx, dt);
    }

    /// Physics tick: runs the current state's fixed-rate logic, steps
    /// locomotion and publishes the new position to the registry.
    pub fn physics_tick(&mut self, dt: f32) {
        self.machine.physics_tick(&mut self.ctx, dt);

        let core = self.ctx.core_mut();
        core.locomotion.step(dt);
        if core.is_alive() {
            core.registry.update_position(core.id, core.position());
        }
    }

    /// Resolves an incoming hit and applies its consequences.
    ///
    /// Lethal hits force death regardless of the current state; a poise break
    /// forces a stagger (resolution already withholds it from uninterruptible
    /// states).
    pub fn receive_hit(&mut self, hit: &DamageInfo) -> HitResolution {
        let interruptible = self.machine.is_interruptible();
        let core = self.ctx.core_mut();
        let context = HitContext {
            defense: core.defense,
            interruptible,
            now: core.now(),
        };
        let stats = Arc::clone(&core.stats);
        let config = Arc::clone(&core.config);
        let resolution = resolve_hit(&mut core.runtime, &stats, &config, hit, context);

        debug!(
            target: "combat_runtime::controller",
            entity = %core.id,
            source = %hit.source,
            outcome = %resolution.outcome,
            damage = resolution.result.final_damage,
            health = core.runtime.health(),
            poise = core.runtime.poise(),
            "hit resolved"
        );

        if resolution.outcome.notifies() {
            core.emit(CombatEvent::Damaged {
                entity: core.id,
                source: hit.source,
                result: resolution.result,
            });
            core.emit(CombatEvent::HealthChanged {
                entity: core.id,
                health: core.runtime.health(),
                max: core.runtime.max_health(),
            });
            if core.target.is_none() && hit.source != core.id {
                core.target = Some(hit.source);
            }
        }

        if resolution.is_lethal() {
            self.kill(Some(hit.source));
        } else if let Some(severity) = resolution.defender_stagger {
            let core = self.ctx.core();
            core.emit(CombatEvent::PoiseBroken {
                entity: core.id,
                severity,
            });
            self.stagger(severity, Some(hit.source));
        }
        resolution
    }

    /// Forces the combatant into its stagger state. `source` is what it is
    /// knocked away from. Returns false once dead.
    pub fn stagger(&mut self, severity: StaggerSeverity, source: Option<CombatantId>) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.ctx.core_mut().queue_stagger(severity, source);
        self.machine
            .force_interrupt(<C::Kind as CombatKind>::STAGGER, &mut self.ctx)
    }

    /// Restores up to `amount` health. Returns what was restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let core = self.ctx.core_mut();
        let restored = core.runtime.heal(amount);
        if restored > 0.0 {
            core.emit(CombatEvent::HealthChanged {
                entity: core.id,
                health: core.runtime.health(),
                max: core.runtime.max_health(),
            });
        }
        restored
    }

    fn kill(&mut self, killer: Option<CombatantId>) {
        if self
            .machine
            .change_state(<C::Kind as CombatKind>::DEATH, &mut self.ctx)
        {
            let core = self.ctx.core();
            info!(
                target: "combat_runtime::controller",
                entity = %core.id,
                killer = ?killer,
                "combatant died"
            );
            core.emit(CombatEvent::Died {
                entity: core.id,
                killer,
            });
        }
    }

    pub fn change_state(&mut self, target: C::Kind) -> bool {
        self.machine.change_state(target, &mut self.ctx)
    }

    pub fn try_change_state(&mut self, target: C::Kind) -> bool {
        self.machine.try_change_state(target, &mut self.ctx)
    }

    pub fn force_interrupt(&mut self, target: C::Kind) -> bool {
        self.machine.force_interrupt(target, &mut self.ctx)
    }

    /// Sets the combatant's opponent (host-side target selection).
    pub fn set_target(&mut self, target: Option<CombatantId>) {
        let core = self.ctx.core_mut();
        core.target = target;
        core.face_target();
    }

    /// Hitbox currently live, if any.
    pub fn active_swing(&self) -> Option<&ActiveSwing> {
        self.ctx.core().swing.as_ref()
    }

    /// Damage the live hitbox deals, if any.
    pub fn outgoing_hit(&self) -> Option<DamageInfo> {
        let core = self.ctx.core();
        let swing = core.swing.as_ref()?;
        let attack = core.attacks.get(swing.attack)?;
        Some(attack.damage_info(core.id, &core.stats))
    }

    /// Marks `defender` as hit by the live hitbox.
    pub fn record_hit(&mut self, defender: CombatantId) {
        if let Some(swing) = self.ctx.core_mut().swing.as_mut()
            && !swing.has_struck(defender)
        {
            swing.struck.push(defender);
        }
    }

    pub fn id(&self) -> CombatantId {
        self.ctx.core().id
    }

    pub fn is_alive(&self) -> bool {
        self.ctx.core().is_alive()
    }

    pub fn current(&self) -> Option<C::Kind> {
        self.machine.current()
    }

    pub fn is_in(&self, kind: C::Kind) -> bool {
        self.machine.is_in(kind)
    }

    pub fn core(&self) -> &CombatantCore {
        self.ctx.core()
    }

    pub fn core_mut(&mut self) -> &mut CombatantCore {
        self.ctx.core_mut()
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn machine(&self) -> &StateMachine<C, C::Kind> {
        &self.machine
    }
}

impl Controller<PlayerContext> {
    /// Replaces the continuous input for the coming frames.
    pub fn set_input(&mut self, snapshot: InputSnapshot) {
        self.ctx.snapshot = snapshot;
    }

    pub fn input(&self) -> InputSnapshot {
        self.ctx.snapshot
    }
}

impl Controller<EnemyContext> {
    pub fn archetype(&self) -> EnemyArchetype {
        self.ctx.archetype
    }
}

impl<C: CombatContext + std::fmt::Debug> std::fmt::Debug for Controller<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("machine", &self.machine)
            .field("ctx", &self.ctx)
            .finish()
    }
}
