//! Per-combatant context handed to every state call.
//!
//! [`CombatantCore`] holds what every kind of combatant has (stats, runtime
//! counters, collaborators, clock). Each kind wraps it in its own context
//! type (`EnemyContext`, `PlayerContext`) that adds kind-specific fields, and
//! exposes the core through [`CombatContext`] so shared states (stagger,
//! death, the swing tracker) are written once.

use std::rc::Rc;
use std::sync::Arc;

use combat_core::{
    AttackSet, CombatConfig, CombatStats, CombatantId, DefenseState, Faction, Hitbox,
    HitboxShape, RuntimeData, StaggerSeverity, Vec3,
};
use state_machine::{Clocked, StateKind, StateMachine, StateSet};

use crate::collaborators::{AnimationSink, CombatantRegistry, HitboxGroup, Locomotion};
use crate::error::Result;
use crate::events::{CombatEvent, EventBus};

/// Identity and presets a combatant spawns with.
#[derive(Debug, Clone)]
pub struct Loadout {
    pub name: String,
    pub faction: Faction,
    pub stats: CombatStats,
    pub attacks: AttackSet,
}

impl Loadout {
    pub fn new(
        name: impl Into<String>,
        faction: Faction,
        stats: CombatStats,
        attacks: AttackSet,
    ) -> Self {
        Self {
            name: name.into(),
            faction,
            stats,
            attacks,
        }
    }
}

/// Collaborators a combatant talks to.
pub struct Services {
    pub locomotion: Box<dyn Locomotion>,
    pub animation: Box<dyn AnimationSink>,
    pub hitbox: Box<dyn HitboxGroup>,
    pub registry: Rc<dyn CombatantRegistry>,
    pub events: EventBus,
}

/// Hitbox currently live, as seen by hit registration.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSwing {
    /// Index into the attacker's attack set.
    pub attack: usize,
    pub shape: HitboxShape,
    pub offset: Vec3,
    pub reach: f32,
    /// Defenders already hit by this activation.
    pub struck: Vec<CombatantId>,
}

impl ActiveSwing {
    pub fn new(attack: usize, hitbox: &Hitbox) -> Self {
        Self {
            attack,
            shape: hitbox.shape,
            offset: hitbox.offset,
            reach: hitbox.range,
            struck: Vec::new(),
        }
    }

    /// World-space sweep origin for an attacker at `position` facing `facing`.
    pub fn origin(&self, position: Vec3, facing: Vec3) -> Vec3 {
        let forward = Vec3::new(facing.x, 0.0, facing.z).normalize_or_zero();
        let right = Vec3::Y.cross(forward);
        position + right * self.offset.x + Vec3::Y * self.offset.y + forward * self.offset.z
    }

    pub fn has_struck(&self, id: CombatantId) -> bool {
        self.struck.contains(&id)
    }
}

/// Stagger queued for the next entry into the stagger state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingStagger {
    pub severity: StaggerSeverity,
    pub source: Option<CombatantId>,
}

/// State shared by every kind of combatant.
pub struct CombatantCore {
    pub id: CombatantId,
    pub name: String,
    pub faction: Faction,
    pub stats: Arc<CombatStats>,
    pub runtime: RuntimeData,
    pub attacks: Arc<AttackSet>,
    pub config: Arc<CombatConfig>,

    pub locomotion: Box<dyn Locomotion>,
    pub animation: Box<dyn AnimationSink>,
    pub hitbox: Box<dyn HitboxGroup>,
    pub registry: Rc<dyn CombatantRegistry>,
    pub events: EventBus,

    /// Current opponent, if any.
    pub target: Option<CombatantId>,
    /// Posture consulted by hit resolution.
    pub defense: DefenseState,
    /// Set while an attack's hitbox is live.
    pub swing: Option<ActiveSwing>,
    pub pending_stagger: Option<PendingStagger>,
    pub last_attack_end: Option<f32>,

    now: f32,
}

impl CombatantCore {
    /// Validates the loadout and derives runtime counters from its stats.
    ///
    /// # Errors
    ///
    /// Fails if the stats or the attack set are invalid.
    pub fn new(
        id: CombatantId,
        loadout: Loadout,
        config: Arc<CombatConfig>,
        services: Services,
    ) -> Result<Self> {
        loadout.stats.validate()?;
        loadout.attacks.validate()?;

        Ok(Self {
            id,
            name: loadout.name,
            faction: loadout.faction,
            runtime: RuntimeData::from_stats(&loadout.stats),
            stats: Arc::new(loadout.stats),
            attacks: Arc::new(loadout.attacks),
            config,
            locomotion: services.locomotion,
            animation: services.animation,
            hitbox: services.hitbox,
            registry: services.registry,
            events: services.events,
            target: None,
            defense: DefenseState::Open,
            swing: None,
            pending_stagger: None,
            last_attack_end: None,
            now: 0.0,
        })
    }

    #[inline]
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Advances the combatant's clock.
    pub fn advance(&mut self, dt: f32) {
        self.now += dt;
    }

    pub fn position(&self) -> Vec3 {
        self.locomotion.position()
    }

    pub fn is_alive(&self) -> bool {
        self.runtime.is_alive()
    }

    pub fn emit(&self, event: CombatEvent) {
        self.events.publish(event);
    }

    /// Position of the current target, `None` if there is none or it is gone.
    pub fn target_position(&self) -> Option<Vec3> {
        self.target.and_then(|id| self.registry.position_of(id))
    }

    pub fn distance_to_target(&self) -> Option<f32> {
        self.target_position()
            .map(|target| self.position().distance(target))
    }

    /// Returns true if the target still exists and is within chase range.
    pub fn has_valid_target(&self) -> bool {
        self.distance_to_target()
            .is_some_and(|distance| distance <= self.stats.max_chase_range)
    }

    pub fn target_in_sight(&self) -> bool {
        self.target
            .is_some_and(|target| self.registry.line_of_sight(self.id, target))
    }

    /// Turns toward the target if it still exists.
    pub fn face_target(&mut self) {
        if let Some(point) = self.target_position() {
            self.locomotion.face(point);
        }
    }

    /// Nearest hostile within detection range and in line of sight.
    pub fn scan_for_hostile(&self) -> Option<CombatantId> {
        let here = self.position();
        self.registry
            .query_hostiles(self.faction)
            .into_iter()
            .filter(|other| *other != self.id)
            .filter_map(|other| {
                let distance = self.registry.position_of(other)?.distance(here);
                (distance <= self.stats.detection_range
                    && self.registry.line_of_sight(self.id, other))
                .then_some((other, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(other, _)| other)
    }

    /// Returns true once the attack cooldown since the last finished attack has passed.
    pub fn cooldown_ready(&self) -> bool {
        self.last_attack_end
            .is_none_or(|end| self.now - end >= self.stats.attack_cooldown)
    }

    pub fn queue_stagger(&mut self, severity: StaggerSeverity, source: Option<CombatantId>) {
        self.pending_stagger = Some(PendingStagger { severity, source });
    }
}

impl std::fmt::Debug for CombatantCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatantCore")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("faction", &self.faction)
            .field("runtime", &self.runtime)
            .field("target", &self.target)
            .field("defense", &self.defense)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

/// Tag enums of combatant kinds.
pub trait CombatKind: StateKind + Into<&'static str> {
    const STAGGER: Self;
    const DEATH: Self;

    /// Where a finished stagger returns to.
    fn after_stagger(core: &CombatantCore) -> Self;

    fn label(self) -> &'static str {
        self.into()
    }
}

/// Context types of combatant kinds.
pub trait CombatContext: Clocked + Sized + 'static {
    type Kind: CombatKind + StateSet<Self>;

    /// State a freshly spawned combatant starts in.
    const INITIAL: Self::Kind;

    fn core(&self) -> &CombatantCore;
    fn core_mut(&mut self) -> &mut CombatantCore;

    /// Runs before the machine's frame tick (input routing).
    fn before_tick(_machine: &mut StateMachine<Self, Self::Kind>, _ctx: &mut Self) {}
}
