//! Services the engine consumes but does not implement.
//!
//! Movement, animation playback, physical hit registration, the registry of
//! active combatants and the player's input buffer all live outside the
//! engine. States talk to them only through these traits, so a host can plug
//! in its own physics or animation layer. The submodules provide in-memory
//! implementations used by the [`Arena`](crate::Arena), the sandbox and tests.
//!
//! Per-entity services are owned (`Box<dyn …>`); the registry is shared
//! between every controller of a simulation (`Rc<dyn CombatantRegistry>`)
//! and therefore takes `&self`.

mod input;
mod kinematic;
mod recorder;
mod roster;

pub use input::InputQueue;
pub use kinematic::Kinematic;
pub use recorder::{AnimationCall, AnimationLog, HitboxCall, HitboxLog};
pub use roster::Roster;

use combat_core::{AttackDescriptor, CombatantId, Faction, Vec3};

use crate::states::player::PlayerAction;

/// Physical movement of one combatant.
pub trait Locomotion {
    fn position(&self) -> Vec3;

    /// Unit vector the combatant faces.
    fn facing(&self) -> Vec3;

    /// Starts moving toward `target` at `speed` units per second.
    fn move_to(&mut self, target: Vec3, speed: f32);

    fn stop(&mut self);

    /// Turns toward `point`.
    fn face(&mut self, point: Vec3);

    /// Applies an immediate offset (lunge, knockback, dodge).
    fn displace(&mut self, offset: Vec3);

    /// Distance left to the current destination; 0 when idle.
    fn remaining_distance(&self) -> f32;

    /// A disabled body ignores every movement request.
    fn set_enabled(&mut self, enabled: bool);

    /// Advances movement by one physics step. Hosts that move bodies
    /// themselves leave this empty.
    fn step(&mut self, _dt: f32) {}
}

/// Animation playback of one combatant.
///
/// Used only to cue visuals. Timing windows never read clip progress.
pub trait AnimationSink {
    fn set_trigger(&mut self, name: &str);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_float(&mut self, name: &str, value: f32);

    /// Normalized progress of the clip currently playing.
    fn clip_progress(&self) -> f32;

    /// Authored length of `clip` in seconds, if known.
    fn clip_length(&self, _clip: &str) -> Option<f32> {
        None
    }
}

/// Named hitbox group of one combatant.
pub trait HitboxGroup {
    fn activate(&mut self, attack: &AttackDescriptor);
    fn deactivate(&mut self);
    /// Stops the combatant from being hit at all (death).
    fn deactivate_hurtboxes(&mut self);
}

/// Registry of active combatants shared by one simulation.
pub trait CombatantRegistry {
    /// Active combatants hostile to `faction`.
    fn query_hostiles(&self, faction: Faction) -> Vec<CombatantId>;

    /// Position of an active combatant; `None` once it is gone or unregistered.
    fn position_of(&self, id: CombatantId) -> Option<Vec3>;

    fn line_of_sight(&self, from: CombatantId, to: CombatantId) -> bool;

    fn update_position(&self, id: CombatantId, position: Vec3);

    /// Removes `id` from queries (death).
    fn unregister(&self, id: CombatantId);

    /// Asks the host to remove `id` from the world after `delay` seconds.
    fn schedule_removal(&self, id: CombatantId, delay: f32);
}

/// Buffered player actions.
///
/// States never push into the buffer; only the controller reads it.
pub trait ActionBuffer {
    fn has_buffered(&self, action: PlayerAction) -> bool;

    /// Removes one buffered `action`. Returns false if none was buffered.
    fn consume_buffered(&mut self, action: PlayerAction) -> bool;

    /// Drops entries older than the buffer window.
    fn expire(&mut self, _now: f32) {}
}
