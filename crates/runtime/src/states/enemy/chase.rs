use state_machine::{State, StateTiming, Transition};
use tracing::{debug, trace};

use super::{EnemyContext, EnemyStateKind};

/// Closes in on the target until an attack can be thrown.
///
/// Sight is re-checked every tick. The chase survives a break in line of
/// sight shorter than the grace period; past it the enemy investigates the
/// last seen position.
#[derive(Debug, Default)]
pub struct ChaseState {
    lost_since: Option<f32>,
}

impl State<EnemyContext, EnemyStateKind> for ChaseState {
    fn kind(&self) -> EnemyStateKind {
        EnemyStateKind::Chase
    }

    fn enter(&mut self, ctx: &mut EnemyContext, _from: Option<EnemyStateKind>) {
        self.lost_since = None;
        ctx.core.animation.set_bool("moving", true);
    }

    fn execute(
        &mut self,
        ctx: &mut EnemyContext,
        timing: &StateTiming,
    ) -> Transition<EnemyStateKind> {
        let Some(target_pos) = ctx.core.target_position() else {
            ctx.core.target = None;
            return Transition::Change(EnemyStateKind::Idle);
        };

        let distance = ctx.core.position().distance(target_pos);
        if distance > ctx.core.stats.max_chase_range {
            debug!(
                target: "combat_runtime::states",
                entity = %ctx.core.id,
                distance,
                "target out of chase range"
            );
            ctx.core.target = None;
            return Transition::Change(EnemyStateKind::Idle);
        }

        let in_sight = ctx.core.target_in_sight();
        if in_sight {
            self.lost_since = None;
            ctx.last_seen = Some(target_pos);
        } else {
            let since = *self.lost_since.get_or_insert(timing.now);
            if timing.now - since > ctx.core.config.lose_sight_grace {
                return Transition::Change(EnemyStateKind::Investigate);
            }
        }

        if in_sight && distance <= ctx.core.stats.attack_range && ctx.core.cooldown_ready() {
            match ctx.select_attack() {
                Some(index) => {
                    ctx.next_attack = Some(index);
                    return Transition::Change(EnemyStateKind::Attack);
                }
                None => trace!(
                    target: "combat_runtime::states",
                    entity = %ctx.core.id,
                    stamina = ctx.core.runtime.stamina(),
                    "no usable attack"
                ),
            }
        }

        let destination = if in_sight {
            target_pos
        } else {
            ctx.last_seen.unwrap_or(target_pos)
        };
        let speed = ctx.core.stats.move_speed;
        ctx.core.locomotion.move_to(destination, speed);
        ctx.core.locomotion.face(destination);
        Transition::Stay
    }

    fn exit(&mut self, ctx: &mut EnemyContext) {
        ctx.core.locomotion.stop();
        ctx.core.animation.set_bool("moving", false);
    }
}
