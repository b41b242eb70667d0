use std::sync::Arc;

use state_machine::{State, StateTiming, Transition};
use tracing::debug;

use super::{EnemyContext, EnemyStateKind};
use crate::states::shared::SwingTracker;

/// Plays one attack descriptor, then chains or disengages.
///
/// Leaving before `attack_exit_threshold` is only possible through stagger or
/// death. A chainable attack whose successor is affordable and still reaches
/// the target restarts this state with the successor.
#[derive(Debug, Default)]
pub struct AttackState {
    exit_threshold: f32,
    duration: f32,
    super_armor: bool,
    aborted: bool,
    swing: SwingTracker,
}

impl State<EnemyContext, EnemyStateKind> for AttackState {
    fn kind(&self) -> EnemyStateKind {
        EnemyStateKind::Attack
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn can_be_interrupted(&self) -> bool {
        !self.super_armor
    }

    fn initialize(&mut self, ctx: &EnemyContext) {
        self.exit_threshold = ctx.core.config.attack_exit_threshold;
    }

    fn enter(&mut self, ctx: &mut EnemyContext, _from: Option<EnemyStateKind>) {
        let index = ctx.next_attack.take().or_else(|| ctx.select_attack());
        let started = index.and_then(|index| self.swing.begin(&mut ctx.core, index));

        self.super_armor = index
            .and_then(|index| ctx.core.attacks.get(index))
            .is_some_and(|attack| attack.has_super_armor());
        self.aborted = started.is_none();
        self.duration = started.unwrap_or(0.0);
    }

    fn execute(
        &mut self,
        ctx: &mut EnemyContext,
        timing: &StateTiming,
    ) -> Transition<EnemyStateKind> {
        if self.aborted {
            return Transition::Change(ctx.disengage());
        }
        self.swing.update(&mut ctx.core, timing);
        Transition::Stay
    }

    fn exit(&mut self, ctx: &mut EnemyContext) {
        self.swing.end(&mut ctx.core);
        self.super_armor = false;
    }

    fn can_transition_to(&self, target: EnemyStateKind, timing: &StateTiming) -> bool {
        match target {
            EnemyStateKind::Stagger | EnemyStateKind::Death => true,
            _ => timing.normalized_time >= self.exit_threshold,
        }
    }

    fn on_state_complete(&mut self, ctx: &mut EnemyContext) -> Transition<EnemyStateKind> {
        ctx.core.last_attack_end = Some(ctx.core.now());

        let attacks = Arc::clone(&ctx.core.attacks);
        let chained = self
            .swing
            .attack()
            .and_then(|current| attacks.successor(current))
            .filter(|&next| {
                attacks.get(next).is_some_and(|attack| {
                    ctx.core.runtime.can_afford(attack.cost)
                        && ctx
                            .core
                            .distance_to_target()
                            .is_some_and(|distance| distance <= attack.hitbox.range)
                })
            });

        match chained {
            Some(next) => {
                debug!(
                    target: "combat_runtime::states",
                    entity = %ctx.core.id,
                    next,
                    "chaining attack"
                );
                ctx.next_attack = Some(next);
                Transition::Restart
            }
            None => Transition::Change(ctx.disengage()),
        }
    }
}
