use combat_core::{
    AttackDescriptor, CombatConfig, CombatStats, CombatantId, DamageInfo, DefenseState,
    HitContext, HitOutcome, NormalizedWindow, ParryClass, ParryTiming, RuntimeData,
    StaggerSeverity, resolve_hit,
};
use proptest::prelude::*;

fn open(now: f32) -> HitContext {
    HitContext {
        defense: DefenseState::Open,
        interruptible: true,
        now,
    }
}

#[test]
fn poise_breaks_on_third_hit_and_death_wins_over_poise() {
    let stats = CombatStats::default()
        .with_pools(50.0, 100.0, 30.0)
        .with_poise_regen(10.0, 2.0);
    let config = CombatConfig::default();
    let mut runtime = RuntimeData::from_stats(&stats);
    let hit = DamageInfo::new(10.0, 10.0, CombatantId(1));

    let first = resolve_hit(&mut runtime, &stats, &config, &hit, open(0.0));
    let second = resolve_hit(&mut runtime, &stats, &config, &hit, open(0.5));
    assert_eq!(first.defender_stagger, None);
    assert_eq!(second.defender_stagger, None);

    let third = resolve_hit(&mut runtime, &stats, &config, &hit, open(1.0));
    assert!(third.result.poise_broken);
    assert_eq!(third.defender_stagger, Some(StaggerSeverity::Light));
    assert_eq!(runtime.poise(), 30.0);

    let fourth = resolve_hit(&mut runtime, &stats, &config, &hit, open(1.5));
    assert!(!fourth.is_lethal());
    assert_eq!(runtime.health(), 10.0);

    let fifth = resolve_hit(&mut runtime, &stats, &config, &hit, open(2.0));
    assert!(fifth.is_lethal());
    assert_eq!(fifth.defender_stagger, None);
    assert_eq!(runtime.health(), 0.0);

    let after = resolve_hit(&mut runtime, &stats, &config, &hit, open(2.5));
    assert_eq!(after.outcome, HitOutcome::Ignored);
}

#[test]
fn lethal_hit_kills_even_without_poise_break() {
    let stats = CombatStats::default().with_pools(50.0, 100.0, 30.0);
    let mut runtime = RuntimeData::from_stats(&stats);
    let hit = DamageInfo::new(60.0, 0.0, CombatantId(1));

    let res = resolve_hit(&mut runtime, &stats, &CombatConfig::default(), &hit, open(0.0));
    assert!(res.is_lethal());
    assert!(!runtime.is_alive());
}

#[test]
fn perfect_parry_staggers_attacker_and_negates_damage() {
    let attack = AttackDescriptor::named("slash")
        .with_timing(1.0, NormalizedWindow::new(0.2, 0.4))
        .with_damage(20.0, 15.0);
    let attacker_stats = CombatStats::default();
    let hit = attack.damage_info(CombatantId(1), &attacker_stats);

    // Hitbox goes live at 0.2s; the defender opened the parry 0.05s earlier.
    let impact = attack.activation.start * attack.duration;
    let parry = ParryTiming::new(impact - 0.05, 0.2, 0.1).unwrap();
    assert_eq!(parry.classify(impact), ParryClass::Perfect);

    let defender_stats = CombatStats::default();
    let mut defender = RuntimeData::from_stats(&defender_stats);
    let ctx = HitContext {
        defense: DefenseState::Parrying(parry),
        interruptible: true,
        now: impact,
    };
    let res = resolve_hit(&mut defender, &defender_stats, &CombatConfig::default(), &hit, ctx);

    assert_eq!(res.outcome, HitOutcome::Parried);
    assert!(res.result.parried);
    assert_eq!(res.result.final_damage, 0.0);
    assert_eq!(res.attacker_stagger, Some(StaggerSeverity::Heavy));
    assert!(res.outcome.notifies());
    assert_eq!(defender.health(), defender_stats.max_health);
}

#[derive(Clone, Debug)]
enum Op {
    Damage(f32),
    Heal(f32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0f32..200.0).prop_map(Op::Damage),
        (0.0f32..200.0).prop_map(Op::Heal),
    ]
}

proptest! {
    #[test]
    fn health_stays_in_bounds(max in 1.0f32..500.0, ops in prop::collection::vec(op(), 0..64)) {
        let stats = CombatStats::default().with_pools(max, 100.0, 50.0);
        let mut runtime = RuntimeData::from_stats(&stats);
        let mut died = false;

        for op in ops {
            match op {
                Op::Damage(amount) => { runtime.apply_damage(amount); }
                Op::Heal(amount) => { runtime.heal(amount); }
            }
            prop_assert!(runtime.health() >= 0.0);
            prop_assert!(runtime.health() <= max);
            if died {
                prop_assert_eq!(runtime.health(), 0.0);
            }
            died |= !runtime.is_alive();
        }
    }

    #[test]
    fn poise_stays_in_bounds(hits in prop::collection::vec(0.0f32..40.0, 0..32)) {
        let stats = CombatStats::default().with_pools(1000.0, 100.0, 30.0);
        let mut runtime = RuntimeData::from_stats(&stats);
        for (i, amount) in hits.into_iter().enumerate() {
            runtime.add_poise(amount, i as f32 * 0.1);
            runtime.regenerate(&stats, i as f32 * 0.1, 0.1);
            prop_assert!(runtime.poise() >= 0.0 && runtime.poise() <= 30.0);
        }
    }
}
