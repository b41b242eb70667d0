//! Combatant stats.
//!
//! # Architecture
//!
//! ```text
//! [ CombatStats ]   immutable, assigned at spawn, shared behind an Arc
//!      ↓ from_stats
//! [ RuntimeData ]   mutable counters, owned by exactly one controller
//! ```
//!
//! ## Invariants
//!
//! 1. `0 ≤ health ≤ max_health`, `0 ≤ poise ≤ max_poise`, `0 ≤ stamina ≤ max_stamina`
//! 2. `health == 0` is terminal: damage and healing become no-ops
//! 3. Spawn values: health and stamina at max, poise at 0
//! 4. `RuntimeData` is never cloned; each entity owns its own counters

pub mod base;
pub mod runtime;

pub use base::CombatStats;
pub use runtime::RuntimeData;
