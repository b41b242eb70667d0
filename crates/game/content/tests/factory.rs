use std::fs;

use combat_content::ContentFactory;
use combat_core::{CombatConfig, Faction, Vec3};

const STATS: &str = r#"{
    "hero": (max_health: 120.0, max_stamina: 90.0),
    "grunt": (max_health: 60.0, max_poise: 25.0),
}"#;

const ATTACKS: &str = r#"{
    "sword": [
        (name: "slash", cost: 10.0, flags: "PARRYABLE | CHAINABLE",
         combo: (window: (start: 0.5, end: 0.9), chain_index: 0)),
        (name: "thrust", cost: 12.0),
    ],
    "club": [(name: "bash", base_damage: 18.0, poise_damage: 20.0)],
}"#;

const DUEL: &str = r#"[
    (name: "hero", faction: Player, stats: "hero", attacks: "sword", position: (0.0, 0.0, 0.0)),
    (name: "grunt", faction: Hostile, archetype: Some("grunt"), stats: "grunt",
     attacks: "club", position: (5.0, 0.0, 0.0)),
]"#;

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("stats.ron"), STATS).unwrap();
    fs::write(dir.path().join("attacks.ron"), ATTACKS).unwrap();
    fs::create_dir(dir.path().join("encounters")).unwrap();
    fs::write(dir.path().join("encounters/duel.ron"), DUEL).unwrap();
    dir
}

#[test]
fn loads_and_resolves_encounter() {
    let dir = data_dir();
    let factory = ContentFactory::new(dir.path());

    let spawns = factory.load_encounter("duel").unwrap();
    assert_eq!(spawns.len(), 2);

    let hero = &spawns[0];
    assert!(hero.spec.is_player());
    assert_eq!(hero.stats.max_health, 120.0);
    assert_eq!(hero.attacks.len(), 2);

    let grunt = &spawns[1];
    assert_eq!(grunt.spec.faction, Faction::Hostile);
    assert_eq!(grunt.spec.archetype.as_deref(), Some("grunt"));
    assert_eq!(grunt.spec.position, Vec3::new(5.0, 0.0, 0.0));
    assert_eq!(grunt.attacks.get(0).unwrap().base_damage, 18.0);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = data_dir();
    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().unwrap(), CombatConfig::default());

    fs::write(dir.path().join("combat.toml"), "alert_duration = 1.25\n").unwrap();
    assert_eq!(factory.load_config().unwrap().alert_duration, 1.25);
}

#[test]
fn unknown_preset_is_reported() {
    let dir = data_dir();
    fs::write(
        dir.path().join("encounters/broken.ron"),
        r#"[(name: "ghost", faction: Hostile, archetype: Some("grunt"), stats: "wraith",
            attacks: "club", position: (0.0, 0.0, 0.0))]"#,
    )
    .unwrap();

    let err = ContentFactory::new(dir.path())
        .load_encounter("broken")
        .unwrap_err();
    assert!(err.to_string().contains("wraith"));
}
