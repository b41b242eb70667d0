use state_machine::{State, StateTiming, Transition};
use tracing::debug;

use super::{EnemyContext, EnemyStateKind};

/// Stands still and polls for hostiles on a fixed interval.
#[derive(Debug, Default)]
pub struct IdleState {
    scan_interval: f32,
    next_scan: f32,
}

impl State<EnemyContext, EnemyStateKind> for IdleState {
    fn kind(&self) -> EnemyStateKind {
        EnemyStateKind::Idle
    }

    fn initialize(&mut self, ctx: &EnemyContext) {
        self.scan_interval = ctx.core.config.idle_scan_interval;
    }

    fn enter(&mut self, ctx: &mut EnemyContext, _from: Option<EnemyStateKind>) {
        ctx.core.locomotion.stop();
        ctx.core.animation.set_bool("moving", false);
        self.next_scan = ctx.core.now();
    }

    fn execute(
        &mut self,
        ctx: &mut EnemyContext,
        timing: &StateTiming,
    ) -> Transition<EnemyStateKind> {
        // A target adopted from an incoming hit skips the scan.
        if ctx.core.target.is_some() {
            if ctx.core.has_valid_target() {
                return Transition::Change(EnemyStateKind::Alert);
            }
            ctx.core.target = None;
        }

        if timing.now < self.next_scan {
            return Transition::Stay;
        }
        self.next_scan = timing.now + self.scan_interval;

        match ctx.core.scan_for_hostile() {
            Some(found) => {
                debug!(
                    target: "combat_runtime::states",
                    entity = %ctx.core.id,
                    target_id = %found,
                    "hostile detected"
                );
                ctx.core.target = Some(found);
                Transition::Change(EnemyStateKind::Alert)
            }
            None => Transition::Stay,
        }
    }
}
