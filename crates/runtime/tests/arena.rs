mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use combat_core::{CombatConfig, CombatStats, CombatantId, DamageInfo, HitOutcome, Vec3};
use combat_runtime::{
    Arena, CombatEvent, EnemyArchetype, EnemyStateKind, InputQueue, PlayerAction,
    PlayerStateKind, RuntimeError, Sinks,
};
use common::{grunt, hero};
use state_machine::StateCatalog;

const FRAME: f32 = 1.0 / 60.0;

fn arena() -> (Arena, Rc<RefCell<Vec<CombatEvent>>>) {
    let arena = Arena::new(
        Arc::new(StateCatalog::new()),
        Arc::new(CombatConfig::default()),
    );
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    arena
        .events()
        .subscribe_all(move |event| sink.borrow_mut().push(event.clone()));
    (arena, log)
}

#[test]
fn timed_parry_staggers_the_attacker() {
    let (mut arena, log) = arena();
    let input = InputQueue::new();
    arena
        .spawn_player(
            hero(CombatStats::default()),
            Box::new(input.clone()),
            Sinks::recording(Vec3::ZERO),
        )
        .unwrap();
    let enemy = arena
        .spawn_enemy(
            grunt(CombatStats::default()),
            EnemyArchetype::Grunt,
            Sinks::recording(Vec3::new(1.5, 0.0, 0.0)),
        )
        .unwrap();

    // Wind-up is 0.3s; parry a few frames before the hitbox goes live.
    let mut pressed = false;
    for _ in 0..240 {
        arena.tick(FRAME);
        let attacker = arena.enemy(enemy).unwrap();
        if !pressed
            && attacker.is_in(EnemyStateKind::Attack)
            && attacker.machine().state_time() >= 0.24
        {
            input.press(PlayerAction::Parry, arena.now());
            pressed = true;
        }
        if attacker.is_in(EnemyStateKind::Stagger) {
            break;
        }
    }

    assert!(pressed);
    assert!(arena.enemy(enemy).unwrap().is_in(EnemyStateKind::Stagger));
    let player = arena.player().unwrap();
    assert!(player.is_in(PlayerStateKind::Parry));
    assert_eq!(player.core().runtime.health(), 100.0);

    let log = log.borrow();
    assert!(log.iter().any(|event| matches!(
        event,
        CombatEvent::HitLanded {
            outcome: HitOutcome::Parried,
            ..
        }
    )));
    assert!(log.contains(&CombatEvent::Parried {
        attacker: enemy,
        defender: CombatantId::PLAYER,
    }));
}

#[test]
fn player_kills_enemy_and_corpse_is_removed() {
    let (mut arena, log) = arena();
    let input = InputQueue::new();
    let player = arena
        .spawn_player(
            hero(CombatStats::default()),
            Box::new(input.clone()),
            Sinks::recording(Vec3::ZERO),
        )
        .unwrap();
    let enemy = arena
        .spawn_enemy(
            grunt(CombatStats::default().with_pools(30.0, 100.0, 50.0)),
            EnemyArchetype::Grunt,
            Sinks::recording(Vec3::new(1.5, 0.0, 0.0)),
        )
        .unwrap();
    arena.roster().block_sight(player, enemy);
    arena.player_mut().unwrap().set_target(Some(enemy));

    for _ in 0..600 {
        let hero = arena.player().unwrap();
        if hero.is_in(PlayerStateKind::Neutral) && input.is_empty() {
            input.press(PlayerAction::LightAttack, arena.now());
        }
        arena.tick(FRAME);
        if !arena.enemy(enemy).unwrap().is_alive() {
            break;
        }
    }

    assert_eq!(arena.living_enemies(), 0);
    assert!(arena.enemy(enemy).unwrap().is_in(EnemyStateKind::Death));
    assert!(log.borrow().contains(&CombatEvent::Died {
        entity: enemy,
        killer: Some(CombatantId::PLAYER),
    }));
    assert!(!arena.roster().is_active(enemy));

    for _ in 0..200 {
        arena.tick(FRAME);
    }
    assert!(arena.enemy(enemy).is_none());
    assert!(arena.player().unwrap().is_alive());
}

#[test]
fn scripted_hit_bypasses_hitboxes() {
    let (mut arena, _log) = arena();
    let enemy = arena
        .spawn_enemy(
            grunt(CombatStats::default()),
            EnemyArchetype::Brute,
            Sinks::recording(Vec3::ZERO),
        )
        .unwrap();

    let res = arena
        .apply_hit(enemy, &DamageInfo::new(25.0, 0.0, CombatantId(99)))
        .unwrap();
    assert_eq!(res.outcome, HitOutcome::Struck);
    assert_eq!(arena.enemy(enemy).unwrap().core().runtime.health(), 75.0);
    assert_eq!(arena.enemy(enemy).unwrap().archetype(), EnemyArchetype::Brute);

    // No live hitbox: nothing to resolve.
    assert!(arena.resolve_hit(enemy, enemy).unwrap().is_none());
    assert!(matches!(
        arena.resolve_hit(CombatantId(42), enemy),
        Err(RuntimeError::UnknownCombatant(CombatantId(42)))
    ));
}

#[test]
fn spawn_rejects_second_player_and_invalid_stats() {
    let (mut arena, _log) = arena();
    arena
        .spawn_player(
            hero(CombatStats::default()),
            Box::new(InputQueue::new()),
            Sinks::recording(Vec3::ZERO),
        )
        .unwrap();

    let second = arena.spawn_player(
        hero(CombatStats::default()),
        Box::new(InputQueue::new()),
        Sinks::recording(Vec3::ZERO),
    );
    assert!(matches!(
        second,
        Err(RuntimeError::DuplicateCombatant(CombatantId::PLAYER))
    ));

    let invalid = arena.spawn_enemy(
        grunt(CombatStats::default().with_pools(0.0, 100.0, 50.0)),
        EnemyArchetype::Grunt,
        Sinks::recording(Vec3::ZERO),
    );
    assert!(matches!(invalid, Err(RuntimeError::InvalidStats(_))));
    assert_eq!(arena.enemies().count(), 0);
}
