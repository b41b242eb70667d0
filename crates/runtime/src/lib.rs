//! Real-time combat behavior runtime.
//!
//! This crate wires the generic [`state_machine`] engine and the pure rules of
//! [`combat_core`] into playable combatants. Consumers embed an [`Arena`] (or
//! drive [`Controller`]s directly), plug in their own collaborators, and
//! subscribe to notifications through the [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`collaborators`] declares the services the engine consumes (movement,
//!   animation, hitboxes, registry, input) plus in-memory implementations
//! - [`context`] holds per-combatant data shared by every state
//! - [`states`] hosts the concrete behaviors of each combatant kind
//! - [`controller`] turns hit resolutions into transitions and notifications
//! - [`arena`] owns an encounter and performs hit registration
//! - [`events`] provides the topic-based notification bus
pub mod arena;
pub mod collaborators;
pub mod context;
pub mod controller;
pub mod error;
pub mod events;
pub mod states;

pub use arena::{Arena, Sinks};
pub use collaborators::{
    ActionBuffer, AnimationCall, AnimationLog, AnimationSink, CombatantRegistry, HitboxCall,
    HitboxGroup, HitboxLog, InputQueue, Kinematic, Locomotion, Roster,
};
pub use context::{
    ActiveSwing, CombatContext, CombatKind, CombatantCore, Loadout, PendingStagger, Services,
};
pub use controller::{Combatant, Controller, EnemyController, PlayerController};
pub use error::{Result, RuntimeError};
pub use events::{CombatEvent, EventBus, SubscriptionId, Topic};
pub use states::enemy::{EnemyArchetype, EnemyContext, EnemyStateKind};
pub use states::player::{InputSnapshot, PlayerAction, PlayerContext, PlayerStateKind};
