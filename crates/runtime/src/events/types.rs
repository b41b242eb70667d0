//! Notification payloads.

use combat_core::{CombatantId, DamageResult, HitOutcome, StaggerSeverity};

use super::Topic;

/// Everything the engine announces.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    HealthChanged {
        entity: CombatantId,
        health: f32,
        max: f32,
    },
    /// Fired for every resolved hit except on dead or invulnerable targets.
    Damaged {
        entity: CombatantId,
        source: CombatantId,
        result: DamageResult,
    },
    Died {
        entity: CombatantId,
        killer: Option<CombatantId>,
    },
    PoiseBroken {
        entity: CombatantId,
        severity: StaggerSeverity,
    },
    Staggered {
        entity: CombatantId,
        severity: StaggerSeverity,
    },
    AttackStarted {
        entity: CombatantId,
        attack: String,
    },
    HitLanded {
        attacker: CombatantId,
        defender: CombatantId,
        outcome: HitOutcome,
        damage: f32,
    },
    /// A perfect parry: `defender` parried `attacker`.
    Parried {
        attacker: CombatantId,
        defender: CombatantId,
    },
    StateChanged {
        entity: CombatantId,
        from: Option<&'static str>,
        to: &'static str,
    },
}

impl CombatEvent {
    pub fn topic(&self) -> Topic {
        match self {
            CombatEvent::HealthChanged { .. } | CombatEvent::Died { .. } => Topic::Vitals,
            CombatEvent::Damaged { .. }
            | CombatEvent::PoiseBroken { .. }
            | CombatEvent::Staggered { .. }
            | CombatEvent::AttackStarted { .. }
            | CombatEvent::HitLanded { .. }
            | CombatEvent::Parried { .. } => Topic::Combat,
            CombatEvent::StateChanged { .. } => Topic::State,
        }
    }

    /// Combatant the event is primarily about.
    pub fn entity(&self) -> CombatantId {
        match self {
            CombatEvent::HealthChanged { entity, .. }
            | CombatEvent::Damaged { entity, .. }
            | CombatEvent::Died { entity, .. }
            | CombatEvent::PoiseBroken { entity, .. }
            | CombatEvent::Staggered { entity, .. }
            | CombatEvent::AttackStarted { entity, .. }
            | CombatEvent::StateChanged { entity, .. } => *entity,
            CombatEvent::HitLanded { defender, .. } | CombatEvent::Parried { defender, .. } => {
                *defender
            }
        }
    }
}
