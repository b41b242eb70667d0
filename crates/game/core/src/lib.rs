//! Deterministic combat rules and data types shared by every combatant.
//!
//! `combat-core` defines the canonical rules (stats, attacks, parry timing,
//! hit resolution) and exposes pure APIs that the runtime and offline tools
//! reuse. Nothing here logs, reads a clock or owns a collaborator: every
//! timestamp is passed in, and every reaction is returned as data.
pub mod attack;
pub mod combat;
pub mod config;
pub mod error;
pub mod identity;
pub mod stats;
pub mod timing;

pub use attack::{AttackDescriptor, AttackFlags, AttackSet, ComboInfo, Hitbox, HitboxShape};
pub use combat::{
    DamageInfo, DamageResult, DefenseState, HitContext, HitOutcome, HitResolution,
    StaggerSeverity, resolve_hit, stagger_severity,
};
pub use config::CombatConfig;
pub use error::{CoreError, DescriptorError, StatsError};
pub use identity::{CombatantId, Faction};
pub use stats::{CombatStats, RuntimeData};
pub use timing::{NormalizedWindow, ParryClass, ParryTiming};

pub use glam::Vec3;
