//! Encounter roster loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::spawn::SpawnSpec;

/// Loader for encounter rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file.
    ///
    /// RON format: `Vec<SpawnSpec>`.
    pub fn load(path: &Path) -> LoadResult<Vec<SpawnSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a roster from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<SpawnSpec>> {
        let roster: Vec<SpawnSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        if roster.iter().filter(|spec| spec.is_player()).count() > 1 {
            anyhow::bail!("Roster lists more than one player-controlled combatant");
        }
        Ok(roster)
    }
}
