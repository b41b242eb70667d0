use combat_core::NormalizedWindow;
use state_machine::{State, StateTiming, Transition, timing::normalize};

use super::{PlayerAction, PlayerContext, PlayerStateKind};
use crate::states::shared::SwingTracker;

/// Plays the player's light-attack chain.
///
/// A light attack pressed inside the current descriptor's combo window
/// re-enters this state with the next attack of the chain. A dodge can cancel
/// the recovery once the hitbox window has closed.
#[derive(Debug)]
pub struct AttackState {
    exit_threshold: f32,
    swing: SwingTracker,
    entered_at: f32,
    duration: f32,
    activation: NormalizedWindow,
    combo: NormalizedWindow,
    can_chain: bool,
    super_armor: bool,
    aborted: bool,
}

impl Default for AttackState {
    fn default() -> Self {
        Self {
            exit_threshold: 1.0,
            swing: SwingTracker::default(),
            entered_at: 0.0,
            duration: 0.0,
            activation: NormalizedWindow::NEVER,
            combo: NormalizedWindow::NEVER,
            can_chain: false,
            super_armor: false,
            aborted: false,
        }
    }
}

impl AttackState {
    fn progress(&self, now: f32) -> f32 {
        normalize(now - self.entered_at, self.duration)
    }
}

impl State<PlayerContext, PlayerStateKind> for AttackState {
    fn kind(&self) -> PlayerStateKind {
        PlayerStateKind::Attack
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn can_be_interrupted(&self) -> bool {
        !self.super_armor
    }

    fn initialize(&mut self, ctx: &PlayerContext) {
        self.exit_threshold = ctx.core.config.attack_exit_threshold;
    }

    fn enter(&mut self, ctx: &mut PlayerContext, from: Option<PlayerStateKind>) {
        let index = match from {
            Some(PlayerStateKind::Attack) => ctx
                .combo_from
                .and_then(|previous| ctx.core.attacks.successor(previous))
                .unwrap_or(0),
            _ => 0,
        };
        ctx.combo_from = None;
        self.entered_at = ctx.core.now();

        match self.swing.begin(&mut ctx.core, index) {
            Some(duration) => {
                let attack = ctx.core.attacks.get(index);
                self.duration = duration;
                self.activation = attack.map_or(NormalizedWindow::NEVER, |a| a.activation);
                self.combo = attack.map_or(NormalizedWindow::NEVER, |a| a.combo.window);
                self.super_armor = attack.is_some_and(|a| a.has_super_armor());
                self.can_chain = ctx.core.attacks.successor(index).is_some();
                self.aborted = false;
                ctx.current_attack = Some(index);
            }
            None => {
                self.duration = 0.0;
                self.can_chain = false;
                self.super_armor = false;
                self.aborted = true;
            }
        }
    }

    fn execute(
        &mut self,
        ctx: &mut PlayerContext,
        timing: &StateTiming,
    ) -> Transition<PlayerStateKind> {
        if self.aborted {
            return Transition::Change(PlayerStateKind::Neutral);
        }
        self.swing.update(&mut ctx.core, timing);
        Transition::Stay
    }

    fn exit(&mut self, ctx: &mut PlayerContext) {
        if self.can_chain && self.combo.contains(self.progress(ctx.core.now())) {
            ctx.combo_from = self.swing.attack();
        }
        ctx.current_attack = None;
        self.swing.end(&mut ctx.core);
    }

    fn can_transition_to(&self, target: PlayerStateKind, timing: &StateTiming) -> bool {
        match target {
            PlayerStateKind::Stagger | PlayerStateKind::Death => true,
            _ => timing.normalized_time >= self.exit_threshold,
        }
    }

    fn can_transition_with(
        &self,
        target: PlayerStateKind,
        trigger: PlayerAction,
        timing: &StateTiming,
    ) -> bool {
        match (target, trigger) {
            (PlayerStateKind::Attack, PlayerAction::LightAttack) => {
                self.can_chain && self.combo.contains(timing.normalized_time)
            }
            (PlayerStateKind::Dodge, PlayerAction::Dodge) => {
                self.activation.has_closed(timing.normalized_time)
            }
            _ => self.can_transition_to(target, timing),
        }
    }
}
