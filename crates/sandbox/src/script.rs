//! Scripted player input.
use std::collections::HashMap;

use combat_core::{CombatantId, Vec3};
use combat_runtime::{
    Arena, EnemyStateKind, InputQueue, InputSnapshot, PlayerAction, PlayerStateKind,
};

/// Presses buttons for the player based on what the arena shows.
pub struct Script {
    input: InputQueue,
    parry_at: Option<f32>,
    /// Transition count of the enemy attack already parried, per enemy.
    parried: HashMap<CombatantId, u64>,
    parries: usize,
}

impl Script {
    pub fn new(input: InputQueue, parry_at: Option<f32>) -> Self {
        Self {
            input,
            parry_at,
            parried: HashMap::new(),
            parries: 0,
        }
    }

    /// Parries requested so far.
    pub fn parries(&self) -> usize {
        self.parries
    }

    /// Queues this frame's input.
    pub fn drive(&mut self, arena: &mut Arena) {
        let now = arena.now();
        if let Some(parry_at) = self.parry_at {
            for enemy in arena.enemies() {
                let machine = enemy.machine();
                if !enemy.is_in(EnemyStateKind::Attack) || machine.state_time() < parry_at {
                    continue;
                }
                let swing = machine.transition_count();
                if self.parried.get(&enemy.id()) != Some(&swing) {
                    self.parried.insert(enemy.id(), swing);
                    self.input.press(PlayerAction::Parry, now);
                    self.parries += 1;
                }
            }
        }

        let Some(target) = nearest_enemy(arena) else {
            return;
        };
        let Some(player) = arena.player_mut() else {
            return;
        };
        if !player.is_alive() {
            return;
        }

        let reach = player.core().attacks.max_range();
        let mut offset = target.1 - player.core().position();
        offset.y = 0.0;
        let in_reach = offset.length() <= reach * 0.8;

        player.set_target(Some(target.0));
        player.set_input(InputSnapshot {
            movement: if in_reach { Vec3::ZERO } else { offset },
            block_held: false,
        });
        if in_reach && player.is_in(PlayerStateKind::Neutral) && self.input.is_empty() {
            self.input.press(PlayerAction::LightAttack, now);
        }
    }
}

fn nearest_enemy(arena: &Arena) -> Option<(CombatantId, Vec3)> {
    let here = arena.player()?.core().position();
    arena
        .enemies()
        .filter(|enemy| enemy.is_alive())
        .map(|enemy| (enemy.id(), enemy.core().position()))
        .min_by(|a, b| a.1.distance(here).total_cmp(&b.1.distance(here)))
}
