//! Stagger: knocked back and unable to act.

use std::marker::PhantomData;

use combat_core::{StaggerSeverity, Vec3};
use state_machine::{State, StateTiming, Transition};

use super::progress_delta;
use crate::context::{CombatContext, CombatKind};
use crate::events::CombatEvent;

/// Severity-gated stagger shared by every kind.
///
/// The severity (and the source to be knocked away from) is queued on the
/// core before the transition; see
/// [`CombatantCore::queue_stagger`](crate::CombatantCore::queue_stagger).
#[derive(Debug)]
pub struct StaggerState<K> {
    severity: StaggerSeverity,
    duration: f32,
    knockback: f32,
    direction: Vec3,
    applied: f32,
    _kind: PhantomData<K>,
}

impl<K> Default for StaggerState<K> {
    fn default() -> Self {
        Self {
            severity: StaggerSeverity::Light,
            duration: 0.0,
            knockback: 0.0,
            direction: Vec3::ZERO,
            applied: 0.0,
            _kind: PhantomData,
        }
    }
}

impl<K> StaggerState<K> {
    pub fn severity(&self) -> StaggerSeverity {
        self.severity
    }
}

impl<C: CombatContext, K: CombatKind> State<C, K> for StaggerState<K> {
    fn kind(&self) -> K {
        K::STAGGER
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn enter(&mut self, ctx: &mut C, _from: Option<K>) {
        let core = ctx.core_mut();
        let pending = core.pending_stagger.take();
        self.severity = pending.map_or(StaggerSeverity::Light, |p| p.severity);
        self.duration = core.config.stagger_duration(self.severity);
        self.knockback = core.config.knockback(self.severity);
        self.applied = 0.0;

        let here = core.position();
        let away = pending
            .and_then(|p| p.source)
            .and_then(|source| core.registry.position_of(source))
            .map(|from| Vec3::new(here.x - from.x, 0.0, here.z - from.z))
            .and_then(Vec3::try_normalize);
        self.direction = away.unwrap_or(-core.locomotion.facing());

        if self.severity.is_heavy() {
            core.runtime.reset_poise();
        }
        core.locomotion.stop();
        core.animation.set_trigger("stagger");
        core.animation.set_bool("heavy_stagger", self.severity.is_heavy());
        core.emit(CombatEvent::Staggered {
            entity: core.id,
            severity: self.severity,
        });
    }

    fn execute(&mut self, ctx: &mut C, timing: &StateTiming) -> Transition<K> {
        let core = ctx.core_mut();
        let fraction = core.config.knockback_fraction;
        let delta = progress_delta(timing.normalized_time, fraction, &mut self.applied);
        if delta > 0.0 {
            core.locomotion.displace(self.direction * self.knockback * delta);
        }
        Transition::Stay
    }

    fn exit(&mut self, ctx: &mut C) {
        ctx.core_mut().animation.set_bool("heavy_stagger", false);
    }

    fn can_transition_to(&self, target: K, _timing: &StateTiming) -> bool {
        target == K::STAGGER || target == K::DEATH
    }

    fn on_state_complete(&mut self, ctx: &mut C) -> Transition<K> {
        Transition::Change(K::after_stagger(ctx.core()))
    }
}
