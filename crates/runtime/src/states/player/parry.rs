use combat_core::{DefenseState, ParryTiming};
use state_machine::{State, StateTiming, Transition};
use tracing::{debug, warn};

use super::{PlayerContext, PlayerStateKind};

/// Parry stance.
///
/// Opens a [`ParryTiming`] window on entry. Hits landing in its first
/// `perfect_parry_window` seconds are perfect parries, the rest of the window
/// mitigates; the state then recovers for `parry_recovery` seconds.
#[derive(Debug, Default)]
pub struct ParryState {
    window: f32,
    perfect: f32,
    recovery: f32,
    aborted: bool,
}

impl State<PlayerContext, PlayerStateKind> for ParryState {
    fn kind(&self) -> PlayerStateKind {
        PlayerStateKind::Parry
    }

    fn duration(&self) -> f32 {
        self.window + self.recovery
    }

    fn initialize(&mut self, ctx: &PlayerContext) {
        self.window = ctx.core.stats.parry_window;
        self.perfect = ctx.core.stats.perfect_parry_window;
        self.recovery = ctx.core.config.parry_recovery;
    }

    fn enter(&mut self, ctx: &mut PlayerContext, _from: Option<PlayerStateKind>) {
        let core = &mut ctx.core;
        let now = core.now();
        let timing = match ParryTiming::new(now, self.window, self.perfect) {
            Ok(timing) => timing,
            Err(err) => {
                warn!(
                    target: "combat_runtime::states",
                    entity = %core.id,
                    error = %err,
                    "invalid parry window"
                );
                self.aborted = true;
                return;
            }
        };
        self.aborted = !core.runtime.try_consume(core.stats.parry_cost, now);
        if self.aborted {
            debug!(target: "combat_runtime::states", entity = %core.id, "parry unaffordable");
            return;
        }

        core.locomotion.stop();
        core.defense = DefenseState::Parrying(timing);
        core.animation.set_trigger("parry");
    }

    fn execute(
        &mut self,
        ctx: &mut PlayerContext,
        timing: &StateTiming,
    ) -> Transition<PlayerStateKind> {
        if self.aborted {
            return Transition::Change(PlayerStateKind::Neutral);
        }
        if let DefenseState::Parrying(parry) = ctx.core.defense
            && !parry.is_active(timing.now)
        {
            ctx.core.defense = DefenseState::Open;
        }
        Transition::Stay
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        if matches!(ctx.core.defense, DefenseState::Parrying(_)) {
            ctx.core.defense = DefenseState::Open;
        }
    }

    fn can_transition_to(&self, target: PlayerStateKind, timing: &StateTiming) -> bool {
        match target {
            PlayerStateKind::Stagger | PlayerStateKind::Death => true,
            _ => timing.state_time >= self.window,
        }
    }
}
