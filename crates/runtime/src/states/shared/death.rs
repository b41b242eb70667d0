//! Death: terminal.

use std::marker::PhantomData;

use state_machine::{State, StateTiming};
use tracing::debug;

use crate::context::{CombatContext, CombatKind};

/// Terminal state shared by every kind.
///
/// Entering disables movement, turns hurtboxes off, unregisters the combatant
/// and schedules its removal. Nothing leaves this state.
#[derive(Debug)]
pub struct DeathState<K> {
    _kind: PhantomData<K>,
}

impl<K> Default for DeathState<K> {
    fn default() -> Self {
        Self { _kind: PhantomData }
    }
}

impl<C: CombatContext, K: CombatKind> State<C, K> for DeathState<K> {
    fn kind(&self) -> K {
        K::DEATH
    }

    fn can_be_interrupted(&self) -> bool {
        false
    }

    fn enter(&mut self, ctx: &mut C, _from: Option<K>) {
        let core = ctx.core_mut();
        core.locomotion.stop();
        core.locomotion.set_enabled(false);
        core.hitbox.deactivate_hurtboxes();
        core.defense = combat_core::DefenseState::Open;
        core.target = None;
        core.animation.set_trigger("death");
        core.registry.unregister(core.id);
        if let Some(delay) = core.config.corpse_removal_delay {
            core.registry.schedule_removal(core.id, delay);
        }
        debug!(target: "combat_runtime::states", entity = %core.id, "died");
    }

    fn can_transition_to(&self, _target: K, _timing: &StateTiming) -> bool {
        false
    }
}
