//! Combat resolution system.
//!
//! This module provides pure functions for resolving a single hit against a
//! defender. Resolution is deterministic and touches only the defender's
//! [`RuntimeData`](crate::RuntimeData); everything else it wants to happen
//! (staggers, notifications) is returned as data for the caller to apply.
//!
//! # Architecture
//!
//! - **Pure Functions**: no clocks, no logging, no collaborators
//! - **Used by Controllers**: the runtime turns a [`HitResolution`] into
//!   state transitions and events
//! - **Stats-based**: mitigation and thresholds come from [`CombatStats`](crate::CombatStats)
//!
//! # Core Functions
//!
//! - `resolve_hit`: complete hit resolution (dodge, parry, block, damage, poise)
//! - `stagger_severity`: heavy/light classification of a poise break

pub mod damage;
pub mod poise;
pub mod resolution;

pub use damage::{DamageInfo, DamageResult};
pub use poise::{StaggerSeverity, stagger_severity};
pub use resolution::{DefenseState, HitContext, HitOutcome, HitResolution, resolve_hit};
