//! Combat tuning loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load tuning from a TOML file.
    ///
    /// Missing keys keep their defaults, so a file only lists what it overrides:
    ///
    /// ```toml
    /// attack_exit_threshold = 0.85
    /// parry_stagger_severity = "Heavy"
    /// corpse_removal_delay = 5.0
    /// ```
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse tuning from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(0.0..=1.0).contains(&config.attack_exit_threshold) {
            anyhow::bail!(
                "attack_exit_threshold must lie in [0, 1] (got {})",
                config.attack_exit_threshold
            );
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::StaggerSeverity;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            "attack_exit_threshold = 0.85\nparry_stagger_severity = \"Light\"\n",
        )
        .unwrap();
        assert_eq!(config.attack_exit_threshold, 0.85);
        assert_eq!(config.parry_stagger_severity, StaggerSeverity::Light);
        assert_eq!(
            config.alert_duration,
            CombatConfig::DEFAULT_ALERT_DURATION
        );
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        assert!(ConfigLoader::parse("attack_exit_threshold = 1.5").is_err());
    }
}
