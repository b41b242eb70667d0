//! Attack playback shared by enemy and player attack states.

use std::sync::Arc;

use combat_core::Vec3;
use state_machine::StateTiming;
use tracing::debug;

use super::progress_delta;
use crate::context::{ActiveSwing, CombatantCore};
use crate::events::CombatEvent;

/// Drives one attack descriptor through its lifecycle.
///
/// The hitbox is toggled only on the rising and falling edges of the
/// activation window, so every activation is matched by exactly one
/// deactivation, including when the state is left early. A window that one
/// tick steps over entirely is opened for that tick and closed on the next.
#[derive(Debug, Default)]
pub struct SwingTracker {
    attack: Option<usize>,
    active: bool,
    last_t: Option<f32>,
    lunge_done: f32,
    lunge_dir: Vec3,
}

impl SwingTracker {
    /// Pays the attack's cost and cues it. Returns its duration, or `None` if
    /// the attack is unknown or unaffordable.
    pub fn begin(&mut self, core: &mut CombatantCore, index: usize) -> Option<f32> {
        let attacks = Arc::clone(&core.attacks);
        let attack = attacks.get(index)?;
        let now = core.now();
        if !core.runtime.try_consume(attack.cost, now) {
            debug!(
                target: "combat_runtime::states",
                entity = %core.id,
                attack = %attack.name,
                stamina = core.runtime.stamina(),
                "attack unaffordable"
            );
            return None;
        }

        self.attack = Some(index);
        self.active = false;
        self.last_t = None;
        self.lunge_done = 0.0;
        self.lunge_dir = core.locomotion.facing();

        core.locomotion.stop();
        core.animation.set_trigger(&attack.animation);
        if let Some(clip) = core.animation.clip_length(&attack.animation) {
            core.animation.set_float("attack_speed", clip / attack.duration);
        }
        core.emit(CombatEvent::AttackStarted {
            entity: core.id,
            attack: attack.name.clone(),
        });
        Some(attack.duration)
    }

    /// Per-tick playback: lunge delta, tracking, hitbox edges.
    pub fn update(&mut self, core: &mut CombatantCore, timing: &StateTiming) {
        let Some(index) = self.attack else {
            return;
        };
        let attacks = Arc::clone(&core.attacks);
        let Some(attack) = attacks.get(index) else {
            return;
        };
        let t = timing.normalized_time;

        if t < attack.track_until {
            core.face_target();
            self.lunge_dir = core.locomotion.facing();
        }

        if attack.lunge_distance > 0.0 {
            let delta = progress_delta(t, core.config.lunge_fraction, &mut self.lunge_done);
            if delta > 0.0 {
                core.locomotion
                    .displace(self.lunge_dir * attack.lunge_distance * delta);
            }
        }

        let window = attack.activation;
        let stepped_over = window.width() > 0.0
            && window.has_closed(t)
            && self.last_t.is_none_or(|prev| prev < window.start);
        self.last_t = Some(t);

        let live = window.contains(t);
        if (live || stepped_over) && !self.active {
            core.hitbox.activate(attack);
            core.swing = Some(ActiveSwing::new(index, &attack.hitbox));
            self.active = true;
        } else if !live && self.active {
            self.deactivate(core);
        }
    }

    /// Ends playback; deactivates the hitbox if it is still live.
    pub fn end(&mut self, core: &mut CombatantCore) {
        if self.active {
            self.deactivate(core);
        }
        self.attack = None;
    }

    /// Index of the attack being played.
    pub fn attack(&self) -> Option<usize> {
        self.attack
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self, core: &mut CombatantCore) {
        core.hitbox.deactivate();
        core.swing = None;
        self.active = false;
    }
}
