//! Hit resolution.
//!
//! ```text
//! dead?            → Ignored      (no notification)
//! invulnerable?    → Dodged       (no notification)
//! parrying + parryable:
//!     perfect      → Parried      (attacker staggered, zero damage)
//!     partial      → Partial      (partial_parry_mitigation)
//! blocking:
//!     stamina ok   → Blocked      (block_mitigation, half poise)
//!     stamina low  → GuardBroken  (unmitigated)
//! otherwise        → Struck
//! then: defense → health → poise → lethal? → poise break?
//! ```

use super::damage::{DamageInfo, DamageResult};
use super::poise::{StaggerSeverity, stagger_severity};
use crate::config::CombatConfig;
use crate::stats::{CombatStats, RuntimeData};
use crate::timing::{ParryClass, ParryTiming};

/// Defensive posture of the defender when the hit arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DefenseState {
    #[default]
    Open,
    /// Inside a dodge's invulnerability window.
    Invulnerable,
    Blocking,
    Parrying(ParryTiming),
}

/// Defender-side circumstances of one hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitContext {
    pub defense: DefenseState,
    /// Whether the defender's current state may be interrupted by a stagger.
    pub interruptible: bool,
    /// Defender clock at impact.
    pub now: f32,
}

/// Which branch of resolution a hit took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HitOutcome {
    /// Defender was already dead.
    Ignored,
    Dodged,
    Parried,
    PartiallyParried,
    Blocked,
    GuardBroken,
    Struck,
}

impl HitOutcome {
    /// Every branch except the two early returns reports damage.
    pub fn notifies(self) -> bool {
        !matches!(self, Self::Ignored | Self::Dodged)
    }
}

/// Outcome of [`resolve_hit`] plus the reactions it calls for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitResolution {
    pub outcome: HitOutcome,
    pub result: DamageResult,
    /// Stagger to force on the defender.
    pub defender_stagger: Option<StaggerSeverity>,
    /// Stagger to force on the attacker (perfect parry).
    pub attacker_stagger: Option<StaggerSeverity>,
}

impl HitResolution {
    fn early(outcome: HitOutcome, result: DamageResult) -> Self {
        Self {
            outcome,
            result,
            defender_stagger: None,
            attacker_stagger: None,
        }
    }

    /// Returns true if the hit killed the defender.
    pub fn is_lethal(&self) -> bool {
        self.result.killed
    }
}

/// Resolves `hit` against a defender, mutating only `runtime`.
pub fn resolve_hit(
    runtime: &mut RuntimeData,
    stats: &CombatStats,
    config: &CombatConfig,
    hit: &DamageInfo,
    ctx: HitContext,
) -> HitResolution {
    if !runtime.is_alive() {
        return HitResolution::early(HitOutcome::Ignored, DamageResult::NONE);
    }

    let mut outcome = HitOutcome::Struck;
    let mut damage = hit.amount;
    let mut poise = hit.poise_damage;

    match ctx.defense {
        DefenseState::Invulnerable => {
            return HitResolution::early(HitOutcome::Dodged, DamageResult::dodged());
        }
        DefenseState::Parrying(timing) if hit.parryable => match timing.classify(ctx.now) {
            ParryClass::Perfect => {
                return HitResolution {
                    outcome: HitOutcome::Parried,
                    result: DamageResult::parried(),
                    defender_stagger: None,
                    attacker_stagger: Some(config.parry_stagger_severity),
                };
            }
            ParryClass::Partial => {
                let remaining = 1.0 - stats.partial_parry_mitigation;
                damage *= remaining;
                poise *= remaining;
                outcome = HitOutcome::PartiallyParried;
            }
            ParryClass::Inactive => {}
        },
        DefenseState::Blocking => {
            if runtime.try_consume(config.block_hit_cost, ctx.now) {
                damage *= 1.0 - stats.block_mitigation;
                poise *= 0.5;
                outcome = HitOutcome::Blocked;
            } else {
                outcome = HitOutcome::GuardBroken;
            }
        }
        DefenseState::Open | DefenseState::Parrying(_) => {}
    }

    damage *= 1.0 - stats.defense;

    let final_damage = runtime.apply_damage(damage);
    let killed = !runtime.is_alive();
    let poise_broken = !killed && runtime.add_poise(poise, ctx.now);

    let defender_stagger = (poise_broken && ctx.interruptible)
        .then(|| stagger_severity(poise, stats.heavy_stagger_threshold));

    HitResolution {
        outcome,
        result: DamageResult {
            final_damage,
            poise_damage: if killed { 0.0 } else { poise.max(0.0) },
            poise_broken,
            killed,
            dodged: false,
            parried: false,
            partially_parried: outcome == HitOutcome::PartiallyParried,
            blocked: outcome == HitOutcome::Blocked,
        },
        defender_stagger,
        attacker_stagger: None,
    }
}
