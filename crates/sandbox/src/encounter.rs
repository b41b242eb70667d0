//! Encounter setup: built-in roster or content loaded from disk.
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use combat_content::{ContentFactory, ResolvedSpawn, SpawnSpec};
use combat_core::{
    AttackDescriptor, AttackSet, CombatConfig, CombatStats, CombatantId, Faction,
    NormalizedWindow, Vec3,
};
use combat_runtime::{Arena, EnemyArchetype, InputQueue, Loadout, Sinks};

/// Tuning plus roster of one encounter.
pub struct Encounter {
    pub config: CombatConfig,
    pub spawns: Vec<ResolvedSpawn>,
}

impl Encounter {
    /// Loads `name` from a content directory.
    pub fn load(data_dir: &Path, name: &str) -> Result<Self> {
        let factory = ContentFactory::new(data_dir);
        let config = factory.load_config()?;
        let spawns = factory
            .load_encounter(name)
            .with_context(|| format!("Failed to load encounter '{name}'"))?;
        Ok(Self { config, spawns })
    }

    /// A swordsman facing one grunt with a club.
    pub fn builtin(archetype: EnemyArchetype) -> Result<Self> {
        let sword = AttackSet::new(vec![
            AttackDescriptor::named("slash")
                .with_timing(0.8, NormalizedWindow::new(0.3, 0.5))
                .with_damage(12.0, 12.0)
                .with_cost(12.0)
                .with_combo(NormalizedWindow::new(0.5, 0.9), 0),
            AttackDescriptor::named("thrust")
                .with_timing(1.0, NormalizedWindow::new(0.35, 0.55))
                .with_damage(18.0, 16.0)
                .with_cost(15.0)
                .with_lunge(0.5),
        ])?;
        let club = AttackSet::new(vec![
            AttackDescriptor::named("bash")
                .with_timing(1.0, NormalizedWindow::new(0.35, 0.55))
                .with_damage(14.0, 12.0)
                .with_cost(15.0),
        ])?;

        let hero = spawn("hero", Faction::Player, None, Vec3::ZERO);
        let enemy = spawn(
            "grunt",
            Faction::Hostile,
            Some(archetype.to_string()),
            Vec3::new(8.0, 0.0, 0.0),
        );

        Ok(Self {
            config: CombatConfig::default(),
            spawns: vec![
                ResolvedSpawn {
                    spec: hero,
                    stats: CombatStats::default(),
                    attacks: sword,
                },
                ResolvedSpawn {
                    spec: enemy,
                    stats: CombatStats::default().with_pools(80.0, 100.0, 40.0),
                    attacks: club,
                },
            ],
        })
    }

    /// Spawns every entry into `arena`. The player reads `input`.
    pub fn populate(self, arena: &mut Arena, input: &InputQueue) -> Result<Vec<CombatantId>> {
        let mut ids = Vec::with_capacity(self.spawns.len());
        for entry in self.spawns {
            let ResolvedSpawn {
                spec,
                stats,
                attacks,
            } = entry;
            let sinks = Sinks::recording(spec.position);
            let label = spec.name.clone();
            let loadout = Loadout::new(spec.name, spec.faction, stats, attacks);

            let id = match spec.archetype.as_deref() {
                None => arena.spawn_player(loadout, Box::new(input.clone()), sinks),
                Some(name) => {
                    let archetype = EnemyArchetype::from_str(name)
                        .with_context(|| format!("Unknown archetype '{name}' for {label}"))?;
                    arena.spawn_enemy(loadout, archetype, sinks)
                }
            }
            .with_context(|| format!("Failed to spawn {label}"))?;
            ids.push(id);
        }
        Ok(ids)
    }
}

fn spawn(name: &str, faction: Faction, archetype: Option<String>, position: Vec3) -> SpawnSpec {
    SpawnSpec {
        name: name.to_owned(),
        faction,
        archetype,
        stats: name.to_owned(),
        attacks: name.to_owned(),
        position,
    }
}
