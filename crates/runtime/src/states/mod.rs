//! Concrete behavior states.
//!
//! - [`shared`]: stagger, death and the swing tracker, generic over any
//!   [`CombatContext`](crate::CombatContext) and [`CombatKind`](crate::CombatKind)
//! - [`enemy`]: AI kind (idle, alert, chase, investigate, attack)
//! - [`player`]: input-driven kind (neutral, attack, block, dodge, parry)

pub mod enemy;
pub mod player;
pub mod shared;
