//! Combatant identity and allegiance.

/// Identifier shared by a combatant's controller and every collaborator that
/// refers to it (registry, hit registration, notifications).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// Conventional id of the local player.
    pub const PLAYER: Self = Self(0);
}

impl core::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Combatant allegiance.
///
/// Faction decides who an AI considers a viable target when scanning the
/// registry. Parsed case-insensitively from data files.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    /// Unaligned; attacks nobody and is attacked by nobody.
    #[default]
    Neutral,
    /// The player and allies.
    Player,
    /// Hostile to the player.
    Hostile,
    /// Wild creatures, hostile to everyone else.
    Wildlife,
}

impl Faction {
    /// Check if this faction is hostile to another faction.
    pub fn is_hostile_to(&self, other: &Faction) -> bool {
        match (self, other) {
            (Faction::Neutral, _) | (_, Faction::Neutral) => false,
            (Faction::Player, Faction::Hostile) | (Faction::Hostile, Faction::Player) => true,
            (Faction::Wildlife, other) | (other, Faction::Wildlife) => {
                !matches!(other, Faction::Wildlife)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn hostility_is_symmetric() {
        let all = [
            Faction::Neutral,
            Faction::Player,
            Faction::Hostile,
            Faction::Wildlife,
        ];
        for a in all {
            for b in all {
                assert_eq!(a.is_hostile_to(&b), b.is_hostile_to(&a), "{a} vs {b}");
            }
        }
        assert!(Faction::Player.is_hostile_to(&Faction::Hostile));
        assert!(!Faction::Hostile.is_hostile_to(&Faction::Hostile));
        assert!(Faction::Wildlife.is_hostile_to(&Faction::Player));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Faction::from_str("HOSTILE"), Ok(Faction::Hostile));
        assert_eq!(Faction::Wildlife.as_ref(), "wildlife");
    }
}
