use state_machine::{State, StateTiming, Transition};

use super::{EnemyContext, EnemyStateKind};

/// Walks to where the target was last seen and looks around.
#[derive(Debug, Default)]
pub struct InvestigateState {
    duration: f32,
}

impl State<EnemyContext, EnemyStateKind> for InvestigateState {
    fn kind(&self) -> EnemyStateKind {
        EnemyStateKind::Investigate
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn initialize(&mut self, ctx: &EnemyContext) {
        self.duration = ctx.core.config.investigate_duration;
    }

    fn enter(&mut self, ctx: &mut EnemyContext, _from: Option<EnemyStateKind>) {
        match ctx.last_seen {
            Some(point) => {
                let speed = ctx.core.stats.move_speed;
                ctx.core.locomotion.move_to(point, speed);
                ctx.core.locomotion.face(point);
                ctx.core.animation.set_bool("moving", true);
            }
            None => ctx.core.locomotion.stop(),
        }
    }

    fn execute(
        &mut self,
        ctx: &mut EnemyContext,
        _timing: &StateTiming,
    ) -> Transition<EnemyStateKind> {
        if ctx.core.target_in_sight() && ctx.core.has_valid_target() {
            return Transition::Change(EnemyStateKind::Chase);
        }
        if ctx.core.locomotion.remaining_distance() <= 0.0 {
            ctx.core.animation.set_bool("moving", false);
        }
        Transition::Stay
    }

    fn exit(&mut self, ctx: &mut EnemyContext) {
        ctx.core.locomotion.stop();
        ctx.core.animation.set_bool("moving", false);
    }

    fn on_state_complete(&mut self, ctx: &mut EnemyContext) -> Transition<EnemyStateKind> {
        ctx.core.target = None;
        ctx.last_seen = None;
        Transition::Change(EnemyStateKind::Idle)
    }
}
