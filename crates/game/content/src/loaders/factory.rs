//! Content factory for loading a whole encounter from a data directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use combat_core::{AttackSet, CombatConfig, CombatStats};

use crate::loaders::{AttackSetLoader, ConfigLoader, LoadResult, RosterLoader, StatsLoader};
use crate::spawn::ResolvedSpawn;

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── stats.ron
/// ├── attacks.ron
/// └── encounters/
///     ├── duel.ron
///     └── ambush.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tuning from `combat.toml`, falling back to defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load stat presets from `stats.ron`.
    pub fn load_stats(&self) -> LoadResult<HashMap<String, CombatStats>> {
        StatsLoader::load(&self.data_dir.join("stats.ron"))
    }

    /// Load attack sets from `attacks.ron`.
    pub fn load_attacks(&self) -> LoadResult<HashMap<String, AttackSet>> {
        AttackSetLoader::load(&self.data_dir.join("attacks.ron"))
    }

    /// Load `encounters/{name}.ron` and resolve every preset it references.
    pub fn load_encounter(&self, name: &str) -> LoadResult<Vec<ResolvedSpawn>> {
        let path = self
            .data_dir
            .join("encounters")
            .join(format!("{}.ron", name));
        let roster = RosterLoader::load(&path)?;
        let stats = self.load_stats()?;
        let attacks = self.load_attacks()?;

        roster
            .into_iter()
            .map(|spec| {
                let preset = stats
                    .get(&spec.stats)
                    .with_context(|| format!("{}: unknown stat preset '{}'", spec.name, spec.stats))?
                    .clone();
                let set = attacks
                    .get(&spec.attacks)
                    .with_context(|| {
                        format!("{}: unknown attack set '{}'", spec.name, spec.attacks)
                    })?
                    .clone();
                Ok(ResolvedSpawn {
                    spec,
                    stats: preset,
                    attacks: set,
                })
            })
            .collect()
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
