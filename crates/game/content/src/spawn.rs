//! Encounter roster entries.

use combat_core::{AttackSet, CombatStats, Faction, Vec3};

/// One combatant to spawn, referencing presets by name.
///
/// RON example:
/// ```ron
/// (
///     name: "gate_guard",
///     faction: Hostile,
///     archetype: Some("brute"),
///     stats: "brute",
///     attacks: "greataxe",
///     position: (4.0, 0.0, 0.0),
/// )
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnSpec {
    pub name: String,
    pub faction: Faction,
    /// Enemy archetype name; `None` spawns a player-controlled combatant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub archetype: Option<String>,
    /// Key into the stat presets.
    pub stats: String,
    /// Key into the attack sets.
    pub attacks: String,
    pub position: Vec3,
}

impl SpawnSpec {
    pub fn is_player(&self) -> bool {
        self.archetype.is_none()
    }
}

/// A [`SpawnSpec`] with its presets looked up.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSpawn {
    pub spec: SpawnSpec,
    pub stats: CombatStats,
    pub attacks: AttackSet,
}
