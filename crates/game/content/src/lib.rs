//! Data-driven combat content and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Combat tuning (`CombatConfig`, TOML)
//! - Stat presets (named `CombatStats` blocks, RON)
//! - Attack sets (named ordered attack lists, RON)
//! - Encounter rosters (who spawns where, with which presets, RON)
//!
//! The game still decides which preset a spawn uses; loading is a convenience
//! layer over combat-core types deserialized with serde.

pub mod spawn;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use spawn::{ResolvedSpawn, SpawnSpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    AttackSetLoader, ConfigLoader, ContentFactory, LoadResult, RosterLoader, StatsLoader,
};
