//! Incoming hits and their outcome.

use crate::identity::CombatantId;

/// A hit as it arrives at the defender.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageInfo {
    pub amount: f32,
    pub poise_damage: f32,
    pub source: CombatantId,
    pub parryable: bool,
}

impl DamageInfo {
    pub fn new(amount: f32, poise_damage: f32, source: CombatantId) -> Self {
        Self {
            amount,
            poise_damage,
            source,
            parryable: true,
        }
    }

    /// Marks the hit as unparryable (builder pattern).
    #[must_use]
    pub fn unparryable(mut self) -> Self {
        self.parryable = false;
        self
    }
}

/// What a hit actually did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    /// Health actually removed.
    pub final_damage: f32,
    /// Poise damage actually accumulated.
    pub poise_damage: f32,
    /// The defender's poise pool was full after the hit.
    pub poise_broken: bool,
    /// The hit brought health to zero.
    pub killed: bool,
    pub dodged: bool,
    /// Perfect parry.
    pub parried: bool,
    pub partially_parried: bool,
    pub blocked: bool,
}

impl DamageResult {
    /// Zero result: nothing happened.
    pub const NONE: Self = Self {
        final_damage: 0.0,
        poise_damage: 0.0,
        poise_broken: false,
        killed: false,
        dodged: false,
        parried: false,
        partially_parried: false,
        blocked: false,
    };

    pub fn dodged() -> Self {
        Self {
            dodged: true,
            ..Self::NONE
        }
    }

    pub fn parried() -> Self {
        Self {
            parried: true,
            ..Self::NONE
        }
    }
}
