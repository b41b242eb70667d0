//! Attack set loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::AttackSet;

use crate::loaders::{LoadResult, read_file};

/// Loader for named attack sets from RON files.
pub struct AttackSetLoader;

impl AttackSetLoader {
    /// Load attack sets from a RON file.
    ///
    /// RON format: `HashMap<String, Vec<AttackDescriptor>>`. List order is
    /// the combo chain order.
    ///
    /// ```ron
    /// {
    ///     "sword": [
    ///         (name: "slash", cost: 10.0, flags: "PARRYABLE | CHAINABLE",
    ///          combo: (window: (start: 0.5, end: 0.9), chain_index: 0)),
    ///         (name: "thrust", cost: 15.0, base_damage: 14.0),
    ///     ],
    /// }
    /// ```
    pub fn load(path: &Path) -> LoadResult<HashMap<String, AttackSet>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate attack sets from RON text.
    pub fn parse(content: &str) -> LoadResult<HashMap<String, AttackSet>> {
        let sets: HashMap<String, AttackSet> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse attack set RON: {}", e))?;

        for (name, set) in &sets {
            set.validate()
                .map_err(|e| anyhow::anyhow!("Invalid attack set '{}': {}", name, e))?;
        }
        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chain_in_order() {
        let sets = AttackSetLoader::parse(
            r#"{
                "sword": [
                    (name: "slash", cost: 10.0, flags: "PARRYABLE | CHAINABLE",
                     combo: (window: (start: 0.5, end: 0.9), chain_index: 0)),
                    (name: "thrust", base_damage: 14.0),
                ],
            }"#,
        )
        .unwrap();

        let sword = &sets["sword"];
        assert_eq!(sword.len(), 2);
        assert_eq!(sword.position("thrust"), Some(1));
        assert_eq!(sword.successor(0), Some(1));
        assert!(sword.get(0).unwrap().is_parryable());
    }

    #[test]
    fn rejects_empty_and_malformed_sets() {
        assert!(AttackSetLoader::parse(r#"{ "none": [] }"#).is_err());

        let err = AttackSetLoader::parse(
            r#"{ "bad": [(name: "late", activation: (start: 0.8, end: 1.3))] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("bad"));
    }
}
