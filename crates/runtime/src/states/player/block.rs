use combat_core::DefenseState;
use state_machine::{State, StateTiming, Transition};
use tracing::debug;

use super::{PlayerContext, PlayerStateKind};

/// Raised guard, held while the block input is held.
#[derive(Debug, Default)]
pub struct BlockState {
    aborted: bool,
}

impl State<PlayerContext, PlayerStateKind> for BlockState {
    fn kind(&self) -> PlayerStateKind {
        PlayerStateKind::Block
    }

    fn enter(&mut self, ctx: &mut PlayerContext, _from: Option<PlayerStateKind>) {
        let core = &mut ctx.core;
        let now = core.now();
        self.aborted = !core.runtime.try_consume(core.stats.block_cost, now);
        if self.aborted {
            debug!(target: "combat_runtime::states", entity = %core.id, "block unaffordable");
            return;
        }
        core.locomotion.stop();
        core.defense = DefenseState::Blocking;
        core.animation.set_bool("blocking", true);
    }

    fn execute(
        &mut self,
        ctx: &mut PlayerContext,
        _timing: &StateTiming,
    ) -> Transition<PlayerStateKind> {
        if self.aborted || !ctx.snapshot.block_held {
            return Transition::Change(PlayerStateKind::Neutral);
        }
        Transition::Stay
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        if ctx.core.defense == DefenseState::Blocking {
            ctx.core.defense = DefenseState::Open;
        }
        ctx.core.animation.set_bool("blocking", false);
    }

    fn can_transition_to(&self, target: PlayerStateKind, _timing: &StateTiming) -> bool {
        target != PlayerStateKind::Block
    }
}
