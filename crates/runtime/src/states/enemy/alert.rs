use state_machine::{State, StateTiming, Transition};

use super::{EnemyContext, EnemyStateKind};

/// Turns to face a freshly detected target before committing to a chase.
#[derive(Debug, Default)]
pub struct AlertState {
    duration: f32,
}

impl State<EnemyContext, EnemyStateKind> for AlertState {
    fn kind(&self) -> EnemyStateKind {
        EnemyStateKind::Alert
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn initialize(&mut self, ctx: &EnemyContext) {
        self.duration = ctx.core.config.alert_duration;
    }

    fn enter(&mut self, ctx: &mut EnemyContext, _from: Option<EnemyStateKind>) {
        ctx.core.locomotion.stop();
        ctx.core.face_target();
        ctx.core.animation.set_trigger("alert");
    }

    fn execute(
        &mut self,
        ctx: &mut EnemyContext,
        _timing: &StateTiming,
    ) -> Transition<EnemyStateKind> {
        ctx.core.face_target();
        Transition::Stay
    }

    fn on_state_complete(&mut self, ctx: &mut EnemyContext) -> Transition<EnemyStateKind> {
        Transition::Change(ctx.disengage())
    }
}
