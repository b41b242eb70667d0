//! Immutable base stats.

use crate::error::{StatsError, fraction, non_negative, positive};

/// Base stats of a combatant, fixed at spawn.
///
/// Times are in seconds, rates in units per second, ranges in world units.
/// Mitigations are the fraction of incoming damage that is *absorbed*.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatStats {
    pub max_health: f32,
    pub max_stamina: f32,
    pub max_poise: f32,

    /// Multiplier on outgoing damage.
    pub damage_multiplier: f32,
    /// Multiplier on outgoing poise damage.
    pub poise_damage_multiplier: f32,
    /// Fraction of every incoming hit absorbed by armor.
    pub defense: f32,
    /// Fraction absorbed while blocking.
    pub block_mitigation: f32,
    /// Fraction absorbed by a partial parry.
    pub partial_parry_mitigation: f32,
    /// Poise damage at or above which a poise break is heavy.
    pub heavy_stagger_threshold: f32,

    pub block_cost: f32,
    pub dodge_cost: f32,
    pub parry_cost: f32,

    pub parry_window: f32,
    pub perfect_parry_window: f32,
    pub invulnerability_duration: f32,

    pub stamina_regen_rate: f32,
    pub stamina_regen_delay: f32,
    pub poise_regen_rate: f32,
    pub poise_regen_delay: f32,

    /// Minimum time between the end of one attack and the start of the next (AI).
    pub attack_cooldown: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub max_chase_range: f32,
    pub move_speed: f32,
}

impl CombatStats {
    /// Validates every documented bound.
    ///
    /// # Errors
    ///
    /// Returns the first violated bound.
    pub fn validate(&self) -> Result<(), StatsError> {
        positive("max_health", self.max_health)?;
        positive("max_stamina", self.max_stamina)?;
        positive("max_poise", self.max_poise)?;

        non_negative("damage_multiplier", self.damage_multiplier)?;
        non_negative("poise_damage_multiplier", self.poise_damage_multiplier)?;
        fraction("defense", self.defense)?;
        fraction("block_mitigation", self.block_mitigation)?;
        fraction("partial_parry_mitigation", self.partial_parry_mitigation)?;
        non_negative("heavy_stagger_threshold", self.heavy_stagger_threshold)?;

        non_negative("block_cost", self.block_cost)?;
        non_negative("dodge_cost", self.dodge_cost)?;
        non_negative("parry_cost", self.parry_cost)?;

        non_negative("parry_window", self.parry_window)?;
        non_negative("perfect_parry_window", self.perfect_parry_window)?;
        if self.perfect_parry_window > self.parry_window {
            return Err(StatsError::PerfectWindowTooLong {
                perfect: self.perfect_parry_window,
                window: self.parry_window,
            });
        }
        non_negative("invulnerability_duration", self.invulnerability_duration)?;

        non_negative("stamina_regen_rate", self.stamina_regen_rate)?;
        non_negative("stamina_regen_delay", self.stamina_regen_delay)?;
        non_negative("poise_regen_rate", self.poise_regen_rate)?;
        non_negative("poise_regen_delay", self.poise_regen_delay)?;

        non_negative("attack_cooldown", self.attack_cooldown)?;
        non_negative("detection_range", self.detection_range)?;
        non_negative("attack_range", self.attack_range)?;
        non_negative("max_chase_range", self.max_chase_range)?;
        non_negative("move_speed", self.move_speed)?;
        Ok(())
    }

    /// Returns `self` if valid.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn validated(self) -> Result<Self, StatsError> {
        self.validate()?;
        Ok(self)
    }

    /// Sets the three pool maxima (builder pattern).
    #[must_use]
    pub fn with_pools(mut self, health: f32, stamina: f32, poise: f32) -> Self {
        self.max_health = health;
        self.max_stamina = stamina;
        self.max_poise = poise;
        self
    }

    /// Sets the parry window and its perfect sub-window (builder pattern).
    #[must_use]
    pub fn with_parry_window(mut self, window: f32, perfect: f32) -> Self {
        self.parry_window = window;
        self.perfect_parry_window = perfect;
        self
    }

    /// Sets the poise regeneration rate and delay (builder pattern).
    #[must_use]
    pub fn with_poise_regen(mut self, rate: f32, delay: f32) -> Self {
        self.poise_regen_rate = rate;
        self.poise_regen_delay = delay;
        self
    }

    /// Sets the stamina regeneration rate and delay (builder pattern).
    #[must_use]
    pub fn with_stamina_regen(mut self, rate: f32, delay: f32) -> Self {
        self.stamina_regen_rate = rate;
        self.stamina_regen_delay = delay;
        self
    }

    /// Sets detection, attack and maximum chase ranges (builder pattern).
    #[must_use]
    pub fn with_ranges(mut self, detection: f32, attack: f32, max_chase: f32) -> Self {
        self.detection_range = detection;
        self.attack_range = attack;
        self.max_chase_range = max_chase;
        self
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_stamina: 100.0,
            max_poise: 50.0,

            damage_multiplier: 1.0,
            poise_damage_multiplier: 1.0,
            defense: 0.0,
            block_mitigation: 0.7,
            partial_parry_mitigation: 0.5,
            heavy_stagger_threshold: 25.0,

            block_cost: 5.0,
            dodge_cost: 20.0,
            parry_cost: 10.0,

            parry_window: 0.2,
            perfect_parry_window: 0.1,
            invulnerability_duration: 0.3,

            stamina_regen_rate: 30.0,
            stamina_regen_delay: 0.8,
            poise_regen_rate: 10.0,
            poise_regen_delay: 2.0,

            attack_cooldown: 0.5,
            detection_range: 12.0,
            attack_range: 2.0,
            max_chase_range: 25.0,
            move_speed: 4.0,
        }
    }
}
