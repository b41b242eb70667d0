//! Headless duel driver.
//!
//! Runs a scripted encounter through the combat runtime and logs every
//! notification. The player closes in, attacks when an enemy is in reach and
//! parries each enemy swing a fixed time after it starts.
//!
//! ```bash
//! RUST_LOG=combat_runtime=debug cargo run -p combat-sandbox --bin duel
//! cargo run -p combat-sandbox --bin duel -- --data-dir content --encounter gate
//! ```

mod config;
mod encounter;
mod script;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use combat_runtime::{Arena, CombatEvent, EnemyArchetype, InputQueue, Topic};
use state_machine::StateCatalog;

use config::SandboxConfig;
use encounter::Encounter;
use script::Script;

/// Run a scripted player-vs-enemy duel
#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Headless combat sandbox", long_about = None)]
struct Cli {
    /// Frames to simulate (overrides DUEL_TICKS)
    #[arg(short, long)]
    ticks: Option<u32>,

    /// Seconds per frame (overrides DUEL_FRAME_DT)
    #[arg(long, value_name = "SECONDS")]
    frame_dt: Option<f32>,

    /// Content directory (overrides DUEL_CONFIG)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Encounter to load from the content directory
    #[arg(short, long, default_value = "duel")]
    encounter: String,

    /// Archetype of the built-in enemy
    #[arg(short, long, default_value = "grunt")]
    archetype: EnemyArchetype,

    /// Seconds into an enemy swing at which the player parries
    #[arg(long, default_value_t = 0.3)]
    parry_at: f32,

    /// Never parry
    #[arg(long)]
    no_parry: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = SandboxConfig::from_env();
    if let Some(ticks) = cli.ticks {
        config.ticks = ticks;
    }
    if let Some(dt) = cli.frame_dt.filter(|dt| *dt > 0.0) {
        config.frame_dt = dt;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }

    let encounter = match &config.data_dir {
        Some(dir) => {
            tracing::info!("Loading encounter '{}' from {}", cli.encounter, dir.display());
            Encounter::load(dir, &cli.encounter)?
        }
        None => {
            tracing::info!("Running built-in encounter against a {}", cli.archetype);
            Encounter::builtin(cli.archetype)?
        }
    };

    let catalog = Arc::new(StateCatalog::new());
    let mut arena = Arena::new(catalog, Arc::new(encounter.config.clone()));
    arena.events().subscribe_all(log_event);

    let input = InputQueue::new();
    let ids = encounter.populate(&mut arena, &input)?;
    tracing::info!("Spawned {} combatants", ids.len());

    let parry_at = (!cli.no_parry).then_some(cli.parry_at);
    let mut script = Script::new(input, parry_at);

    let mut frames = 0;
    while frames < config.ticks {
        script.drive(&mut arena);
        arena.tick(config.frame_dt);
        frames += 1;

        let player_alive = arena.player().is_some_and(|player| player.is_alive());
        if !player_alive || arena.living_enemies() == 0 {
            break;
        }
    }

    let health = arena
        .player()
        .map_or(0.0, |player| player.core().runtime.health());
    tracing::info!(
        frames,
        elapsed = arena.now(),
        player_health = health,
        enemies_left = arena.living_enemies(),
        parries = script.parries(),
        "Duel finished"
    );
    Ok(())
}

fn log_event(event: &CombatEvent) {
    match event.topic() {
        Topic::State => tracing::debug!(target: "duel", entity = %event.entity(), "{event:?}"),
        Topic::Vitals | Topic::Combat => {
            tracing::info!(target: "duel", entity = %event.entity(), "{event:?}")
        }
    }
}
