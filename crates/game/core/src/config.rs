use crate::combat::StaggerSeverity;

/// Tuning constants shared by every combatant of a simulation.
///
/// Per-combatant numbers live in [`CombatStats`](crate::CombatStats); this
/// struct holds the rules that are the same for everybody (state durations,
/// thresholds, knockback profiles).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Normalized time after which an attack may return to neutral/chase.
    /// Slightly below 1.0 to absorb frame jitter.
    pub attack_exit_threshold: f32,
    /// Fraction of an attack during which the lunge displacement is applied.
    pub lunge_fraction: f32,
    /// Seconds between target scans while idle.
    pub idle_scan_interval: f32,
    /// Length of the alert (orientation) phase.
    pub alert_duration: f32,
    /// Seconds without line of sight before a chase falls back to investigating.
    pub lose_sight_grace: f32,
    /// Length of the investigate phase.
    pub investigate_duration: f32,
    /// Stagger length for light severity.
    pub light_stagger_duration: f32,
    /// Stagger length for heavy severity.
    pub heavy_stagger_duration: f32,
    /// Knockback distance for light severity.
    pub light_knockback: f32,
    /// Knockback distance for heavy severity.
    pub heavy_knockback: f32,
    /// Fraction of a stagger during which knockback is applied.
    pub knockback_fraction: f32,
    /// Recovery appended to the invulnerability window of a dodge.
    pub dodge_recovery: f32,
    /// Distance covered by a dodge.
    pub dodge_distance: f32,
    /// Recovery appended to the parry window.
    pub parry_recovery: f32,
    /// Stamina spent per blocked hit.
    pub block_hit_cost: f32,
    /// Severity inflicted on an attacker whose hit was perfectly parried.
    pub parry_stagger_severity: StaggerSeverity,
    /// Delay before a dead combatant is removed; `None` keeps the corpse.
    pub corpse_removal_delay: Option<f32>,
}

impl CombatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_EXIT_THRESHOLD: f32 = 0.9;
    pub const DEFAULT_LUNGE_FRACTION: f32 = 0.5;
    pub const DEFAULT_IDLE_SCAN_INTERVAL: f32 = 0.5;
    pub const DEFAULT_ALERT_DURATION: f32 = 0.6;
    pub const DEFAULT_LOSE_SIGHT_GRACE: f32 = 1.5;
    pub const DEFAULT_INVESTIGATE_DURATION: f32 = 4.0;
    pub const DEFAULT_LIGHT_STAGGER_DURATION: f32 = 0.4;
    pub const DEFAULT_HEAVY_STAGGER_DURATION: f32 = 1.2;
    pub const DEFAULT_LIGHT_KNOCKBACK: f32 = 0.5;
    pub const DEFAULT_HEAVY_KNOCKBACK: f32 = 1.5;
    pub const DEFAULT_KNOCKBACK_FRACTION: f32 = 0.3;
    pub const DEFAULT_DODGE_RECOVERY: f32 = 0.15;
    pub const DEFAULT_DODGE_DISTANCE: f32 = 3.0;
    pub const DEFAULT_PARRY_RECOVERY: f32 = 0.25;
    pub const DEFAULT_BLOCK_HIT_COST: f32 = 10.0;
    pub const DEFAULT_CORPSE_REMOVAL_DELAY: f32 = 3.0;

    pub fn new() -> Self {
        Self {
            attack_exit_threshold: Self::DEFAULT_ATTACK_EXIT_THRESHOLD,
            lunge_fraction: Self::DEFAULT_LUNGE_FRACTION,
            idle_scan_interval: Self::DEFAULT_IDLE_SCAN_INTERVAL,
            alert_duration: Self::DEFAULT_ALERT_DURATION,
            lose_sight_grace: Self::DEFAULT_LOSE_SIGHT_GRACE,
            investigate_duration: Self::DEFAULT_INVESTIGATE_DURATION,
            light_stagger_duration: Self::DEFAULT_LIGHT_STAGGER_DURATION,
            heavy_stagger_duration: Self::DEFAULT_HEAVY_STAGGER_DURATION,
            light_knockback: Self::DEFAULT_LIGHT_KNOCKBACK,
            heavy_knockback: Self::DEFAULT_HEAVY_KNOCKBACK,
            knockback_fraction: Self::DEFAULT_KNOCKBACK_FRACTION,
            dodge_recovery: Self::DEFAULT_DODGE_RECOVERY,
            dodge_distance: Self::DEFAULT_DODGE_DISTANCE,
            parry_recovery: Self::DEFAULT_PARRY_RECOVERY,
            block_hit_cost: Self::DEFAULT_BLOCK_HIT_COST,
            parry_stagger_severity: StaggerSeverity::Heavy,
            corpse_removal_delay: Some(Self::DEFAULT_CORPSE_REMOVAL_DELAY),
        }
    }

    /// Stagger length for `severity`.
    pub fn stagger_duration(&self, severity: StaggerSeverity) -> f32 {
        match severity {
            StaggerSeverity::Light => self.light_stagger_duration,
            StaggerSeverity::Heavy => self.heavy_stagger_duration,
        }
    }

    /// Knockback distance for `severity`.
    pub fn knockback(&self, severity: StaggerSeverity) -> f32 {
        match severity {
            StaggerSeverity::Light => self.light_knockback,
            StaggerSeverity::Heavy => self.heavy_knockback,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
