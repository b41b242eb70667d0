use state_machine::{State, StateTiming, Transition};

use super::{PlayerContext, PlayerStateKind};

/// Free movement.
#[derive(Debug, Default)]
pub struct NeutralState {
    moving: bool,
}

impl State<PlayerContext, PlayerStateKind> for NeutralState {
    fn kind(&self) -> PlayerStateKind {
        PlayerStateKind::Neutral
    }

    fn enter(&mut self, ctx: &mut PlayerContext, _from: Option<PlayerStateKind>) {
        self.moving = false;
        ctx.core.animation.set_bool("moving", false);
    }

    fn execute(
        &mut self,
        ctx: &mut PlayerContext,
        timing: &StateTiming,
    ) -> Transition<PlayerStateKind> {
        let mut direction = ctx.snapshot.movement;
        direction.y = 0.0;
        let direction = direction.normalize_or_zero();
        let moving = direction != combat_core::Vec3::ZERO;

        if moving {
            let step = direction * ctx.core.stats.move_speed * timing.dt;
            let here = ctx.core.position();
            ctx.core.locomotion.face(here + direction);
            ctx.core.locomotion.displace(step);
        }
        if moving != self.moving {
            self.moving = moving;
            ctx.core.animation.set_bool("moving", moving);
        }
        Transition::Stay
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        if self.moving {
            ctx.core.animation.set_bool("moving", false);
        }
    }
}
