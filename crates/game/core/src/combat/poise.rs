//! Poise break severity.

/// How hard a combatant is staggered.
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
#[strum(serialize_all = "snake_case")]
pub enum StaggerSeverity {
    #[default]
    Light,
    /// Longer stagger with more knockback; empties the poise pool.
    Heavy,
}

impl StaggerSeverity {
    #[inline]
    pub fn is_heavy(self) -> bool {
        self == Self::Heavy
    }
}

/// Severity of a break caused by a hit carrying `poise_damage`.
#[inline]
pub fn stagger_severity(poise_damage: f32, heavy_threshold: f32) -> StaggerSeverity {
    if poise_damage >= heavy_threshold {
        StaggerSeverity::Heavy
    } else {
        StaggerSeverity::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive() {
        assert_eq!(stagger_severity(24.9, 25.0), StaggerSeverity::Light);
        assert_eq!(stagger_severity(25.0, 25.0), StaggerSeverity::Heavy);
        assert_eq!("heavy".parse::<StaggerSeverity>(), Ok(StaggerSeverity::Heavy));
    }
}
