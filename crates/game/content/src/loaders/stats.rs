//! Stat preset loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::CombatStats;

use crate::loaders::{LoadResult, read_file};

/// Loader for named stat presets from RON files.
pub struct StatsLoader;

impl StatsLoader {
    /// Load stat presets from a RON file.
    ///
    /// RON format: `HashMap<String, CombatStats>`; omitted fields take defaults.
    ///
    /// ```ron
    /// {
    ///     "grunt": (max_health: 60.0, max_poise: 25.0),
    ///     "brute": (max_health: 180.0, max_poise: 80.0, move_speed: 2.5),
    /// }
    /// ```
    pub fn load(path: &Path) -> LoadResult<HashMap<String, CombatStats>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate stat presets from RON text.
    pub fn parse(content: &str) -> LoadResult<HashMap<String, CombatStats>> {
        let presets: HashMap<String, CombatStats> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stats RON: {}", e))?;

        for (name, stats) in &presets {
            stats
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid stat preset '{}': {}", name, e))?;
        }
        Ok(presets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_fields_take_defaults() {
        let presets = StatsLoader::parse(r#"{ "grunt": (max_health: 60.0) }"#).unwrap();
        let grunt = &presets["grunt"];
        assert_eq!(grunt.max_health, 60.0);
        assert_eq!(grunt.max_poise, CombatStats::default().max_poise);
    }

    #[test]
    fn invalid_preset_names_itself() {
        let err = StatsLoader::parse(r#"{ "ghost": (max_health: 0.0) }"#).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
