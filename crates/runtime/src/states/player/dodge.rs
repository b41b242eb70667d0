use combat_core::{DefenseState, Vec3};
use state_machine::{State, StateTiming, Transition};
use tracing::debug;

use crate::states::shared::progress_delta;

use super::{PlayerContext, PlayerStateKind};

/// Evasive roll.
///
/// Invulnerable for the stats' invulnerability duration from entry, moving
/// `dodge_distance` along the input direction (backwards without input)
/// during that window, then recovering.
#[derive(Debug, Default)]
pub struct DodgeState {
    invulnerability: f32,
    recovery: f32,
    distance: f32,
    direction: Vec3,
    travelled: f32,
    aborted: bool,
}

impl State<PlayerContext, PlayerStateKind> for DodgeState {
    fn kind(&self) -> PlayerStateKind {
        PlayerStateKind::Dodge
    }

    fn duration(&self) -> f32 {
        self.invulnerability + self.recovery
    }

    fn initialize(&mut self, ctx: &PlayerContext) {
        self.invulnerability = ctx.core.stats.invulnerability_duration;
        self.recovery = ctx.core.config.dodge_recovery;
        self.distance = ctx.core.config.dodge_distance;
    }

    fn enter(&mut self, ctx: &mut PlayerContext, _from: Option<PlayerStateKind>) {
        let core = &mut ctx.core;
        let now = core.now();
        self.aborted = !core.runtime.try_consume(core.stats.dodge_cost, now);
        if self.aborted {
            debug!(target: "combat_runtime::states", entity = %core.id, "dodge unaffordable");
            return;
        }

        let mut input = ctx.snapshot.movement;
        input.y = 0.0;
        self.direction = input
            .try_normalize()
            .unwrap_or_else(|| -core.locomotion.facing());
        self.travelled = 0.0;

        core.locomotion.stop();
        core.defense = DefenseState::Invulnerable;
        core.animation.set_trigger("dodge");
    }

    fn execute(
        &mut self,
        ctx: &mut PlayerContext,
        timing: &StateTiming,
    ) -> Transition<PlayerStateKind> {
        if self.aborted {
            return Transition::Change(PlayerStateKind::Neutral);
        }

        let core = &mut ctx.core;
        let window = if self.duration() > 0.0 {
            self.invulnerability / self.duration()
        } else {
            1.0
        };
        let delta = progress_delta(timing.normalized_time, window, &mut self.travelled);
        if delta > 0.0 {
            core.locomotion
                .displace(self.direction * self.distance * delta);
        }

        if timing.state_time >= self.invulnerability && core.defense == DefenseState::Invulnerable
        {
            core.defense = DefenseState::Open;
        }
        Transition::Stay
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        if ctx.core.defense == DefenseState::Invulnerable {
            ctx.core.defense = DefenseState::Open;
        }
    }

    fn can_transition_to(&self, target: PlayerStateKind, timing: &StateTiming) -> bool {
        match target {
            PlayerStateKind::Stagger | PlayerStateKind::Death => true,
            _ => timing.state_time >= self.invulnerability,
        }
    }
}
