mod common;

use combat_core::{CombatStats, CombatantId, DamageInfo, DefenseState, HitOutcome, Vec3};
use combat_runtime::{CombatEvent, InputSnapshot, Locomotion, PlayerAction, PlayerStateKind};
use common::{Rig, hero};

const SOURCE: CombatantId = CombatantId(7);

#[test]
fn buffered_actions_follow_priority() {
    let rig = Rig::new();
    let (mut player, queue) = rig.player(hero(CombatStats::default()), Vec3::ZERO);

    queue.press(PlayerAction::LightAttack, 0.0);
    queue.press(PlayerAction::Parry, 0.0);
    player.tick(0.05);

    assert!(player.is_in(PlayerStateKind::Parry));
    assert!(matches!(player.core().defense, DefenseState::Parrying(_)));
    assert_eq!(player.core().runtime.stamina(), 90.0);
    assert_eq!(queue.len(), 1);

    // The parry denies the attack until its window closes; by then the press
    // has expired.
    player.tick(0.1);
    assert_eq!(queue.len(), 1);
    player.tick(0.15);
    assert!(player.is_in(PlayerStateKind::Parry));
    assert!(queue.is_empty());
    assert_eq!(player.core().defense, DefenseState::Open);
}

#[test]
fn parry_is_perfect_then_partial() {
    let rig = Rig::new();
    let (mut player, queue) = rig.player(hero(CombatStats::default()), Vec3::ZERO);
    let hit = DamageInfo::new(20.0, 10.0, SOURCE);

    queue.press(PlayerAction::Parry, 0.0);
    player.tick(0.05);

    let perfect = player.receive_hit(&hit);
    assert_eq!(perfect.outcome, HitOutcome::Parried);
    assert!(perfect.attacker_stagger.is_some());
    assert_eq!(player.core().runtime.health(), 100.0);

    player.tick(0.12);
    let partial = player.receive_hit(&hit);
    assert_eq!(partial.outcome, HitOutcome::PartiallyParried);
    assert_eq!(player.core().runtime.health(), 90.0);
    assert_eq!(player.core().target, Some(SOURCE));
}

#[test]
fn block_holds_while_held() {
    let rig = Rig::new();
    let (mut player, queue) = rig.player(hero(CombatStats::default()), Vec3::ZERO);
    player.set_input(InputSnapshot {
        block_held: true,
        ..InputSnapshot::default()
    });

    queue.press(PlayerAction::Block, 0.0);
    player.tick(0.05);
    assert!(player.is_in(PlayerStateKind::Block));
    assert_eq!(player.core().defense, DefenseState::Blocking);
    assert_eq!(player.core().runtime.stamina(), 95.0);

    let res = player.receive_hit(&DamageInfo::new(20.0, 10.0, SOURCE));
    assert_eq!(res.outcome, HitOutcome::Blocked);
    assert!((player.core().runtime.health() - 94.0).abs() < 1e-3);
    assert_eq!(player.core().runtime.stamina(), 85.0);

    let now = player.core().now();
    queue.press(PlayerAction::Block, now);
    player.tick(0.05);
    assert!(player.is_in(PlayerStateKind::Block));
    assert_eq!(queue.len(), 1);

    queue.clear();
    player.set_input(InputSnapshot::default());
    player.tick(0.05);
    assert!(player.is_in(PlayerStateKind::Neutral));
    assert_eq!(player.core().defense, DefenseState::Open);
}

#[test]
fn dodge_is_invulnerable_then_recovers() {
    let rig = Rig::new();
    let (mut player, queue) = rig.player(hero(CombatStats::default()), Vec3::ZERO);
    player.set_input(InputSnapshot {
        movement: Vec3::X,
        block_held: false,
    });

    queue.press(PlayerAction::Dodge, 0.0);
    player.tick(0.05);
    assert!(player.is_in(PlayerStateKind::Dodge));
    assert_eq!(player.core().defense, DefenseState::Invulnerable);
    player.set_input(InputSnapshot::default());

    let res = player.receive_hit(&DamageInfo::new(50.0, 50.0, SOURCE));
    assert_eq!(res.outcome, HitOutcome::Dodged);
    assert_eq!(player.core().runtime.health(), 100.0);
    assert!(
        !rig.events()
            .iter()
            .any(|e| matches!(e, CombatEvent::Damaged { .. }))
    );

    for _ in 0..12 {
        player.tick(0.05);
    }
    assert!(player.is_in(PlayerStateKind::Neutral));
    assert_eq!(player.core().defense, DefenseState::Open);
    assert!((player.core().position().x - 3.0).abs() < 1e-3);
}

#[test]
fn light_attack_chains_inside_combo_window() {
    let rig = Rig::new();
    let (mut player, queue) = rig.player(hero(CombatStats::default()), Vec3::ZERO);

    queue.press(PlayerAction::LightAttack, 0.0);
    player.tick(0.1);
    assert!(player.is_in(PlayerStateKind::Attack));

    player.tick(0.1);
    player.tick(0.1);
    let now = player.core().now();
    queue.press(PlayerAction::LightAttack, now);

    // Too early: denied silently, then expired.
    player.tick(0.1);
    assert_eq!(queue.len(), 1);
    player.tick(0.1);
    player.tick(0.1);
    assert!(queue.is_empty());
    assert_eq!(rig.started_attacks(), vec!["slash".to_string()]);

    let now = player.core().now();
    queue.press(PlayerAction::LightAttack, now);
    player.tick(0.1);

    assert!(player.is_in(PlayerStateKind::Attack));
    assert_eq!(player.machine().previous(), Some(PlayerStateKind::Attack));
    assert_eq!(
        rig.started_attacks(),
        vec!["slash".to_string(), "thrust".to_string()]
    );
    assert_eq!(rig.hitbox.activations(), 1);
    assert!(rig.hitbox.is_balanced());
}

#[test]
fn dodge_cancels_attack_only_after_hitbox_window() {
    let rig = Rig::new();
    let (mut player, queue) = rig.player(hero(CombatStats::default()), Vec3::ZERO);

    queue.press(PlayerAction::LightAttack, 0.0);
    player.tick(0.1);
    assert!(player.is_in(PlayerStateKind::Attack));

    queue.press(PlayerAction::Dodge, player.core().now());
    player.tick(0.1);
    assert!(player.is_in(PlayerStateKind::Attack));
    queue.clear();

    for _ in 0..5 {
        player.tick(0.1);
    }
    queue.press(PlayerAction::Dodge, player.core().now());
    player.tick(0.1);

    assert!(player.is_in(PlayerStateKind::Dodge));
    assert_eq!(rig.hitbox.activations(), 1);
    assert!(rig.hitbox.is_balanced());
}

#[test]
fn unaffordable_action_stays_buffered() {
    let rig = Rig::new();
    let stats = CombatStats::default().with_pools(100.0, 5.0, 50.0);
    let (mut player, queue) = rig.player(hero(stats), Vec3::ZERO);

    queue.press(PlayerAction::Parry, 0.0);
    player.tick(0.05);

    assert!(player.is_in(PlayerStateKind::Neutral));
    assert_eq!(queue.len(), 1);
    assert_eq!(player.core().runtime.stamina(), 5.0);
}

#[test]
fn heal_clamps_and_notifies() {
    let rig = Rig::new();
    let (mut player, _queue) = rig.player(hero(CombatStats::default()), Vec3::ZERO);

    player.receive_hit(&DamageInfo::new(30.0, 0.0, SOURCE));
    assert_eq!(player.heal(50.0), 30.0);
    assert_eq!(player.core().runtime.health(), 100.0);
    assert_eq!(player.heal(10.0), 0.0);

    let health_events = rig
        .events()
        .iter()
        .filter(|e| matches!(e, CombatEvent::HealthChanged { .. }))
        .count();
    assert_eq!(health_events, 2);
}

#[test]
fn neutral_moves_with_input() {
    let rig = Rig::new();
    let (mut player, _queue) = rig.player(hero(CombatStats::default()), Vec3::ZERO);
    player.set_input(InputSnapshot {
        movement: Vec3::new(0.0, 0.0, 2.0),
        block_held: false,
    });

    player.tick(0.5);

    let position = player.core().position();
    assert!((position.z - 2.0).abs() < 1e-4);
    assert_eq!(player.core().locomotion.facing(), Vec3::Z);
}
