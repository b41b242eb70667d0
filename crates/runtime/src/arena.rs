//! Several combatants sharing one registry and one clock.
//!
//! The arena is the hit-registration side of the engine: after every frame
//! it looks for live hitboxes overlapping hostile combatants, resolves each
//! overlap once per activation and applies the cross-entity reaction of a
//! perfect parry (the attacker is staggered).

use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use combat_core::{
    CombatConfig, CombatantId, DamageInfo, HitResolution, HitboxShape, Vec3,
};
use state_machine::StateCatalog;
use tracing::{debug, warn};

use crate::collaborators::{
    ActionBuffer, AnimationLog, AnimationSink, CombatantRegistry, HitboxGroup, HitboxLog,
    Kinematic, Locomotion, Roster,
};
use crate::context::{CombatantCore, Loadout, Services};
use crate::controller::{Combatant, EnemyController, PlayerController};
use crate::error::{Result, RuntimeError};
use crate::events::{CombatEvent, EventBus};
use crate::states::enemy::{EnemyArchetype, EnemyContext};
use crate::states::player::PlayerContext;

/// Per-entity collaborators handed to a spawn.
pub struct Sinks {
    pub locomotion: Box<dyn Locomotion>,
    pub animation: Box<dyn AnimationSink>,
    pub hitbox: Box<dyn HitboxGroup>,
}

impl Sinks {
    /// In-memory sinks: a [`Kinematic`] body at `position` and recording
    /// animation and hitbox logs.
    pub fn recording(position: Vec3) -> Self {
        Self {
            locomotion: Box::new(Kinematic::new(position)),
            animation: Box::new(AnimationLog::new()),
            hitbox: Box::new(HitboxLog::new()),
        }
    }
}

/// Owns the controllers of one encounter.
pub struct Arena {
    catalog: Arc<StateCatalog>,
    config: Arc<CombatConfig>,
    roster: Rc<Roster>,
    events: EventBus,
    player: Option<PlayerController>,
    enemies: BTreeMap<CombatantId, EnemyController>,
    now: f32,
    next_id: u32,
    physics_step: f32,
    accumulator: f32,
}

impl Arena {
    /// Fixed physics rate (50 Hz).
    pub const DEFAULT_PHYSICS_STEP: f32 = 0.02;

    pub fn new(catalog: Arc<StateCatalog>, config: Arc<CombatConfig>) -> Self {
        Self {
            catalog,
            config,
            roster: Rc::new(Roster::new()),
            events: EventBus::new(),
            player: None,
            enemies: BTreeMap::new(),
            now: 0.0,
            next_id: CombatantId::PLAYER.0 + 1,
            physics_step: Self::DEFAULT_PHYSICS_STEP,
            accumulator: 0.0,
        }
    }

    /// Overrides the fixed physics step; non-positive values are ignored.
    pub fn with_physics_step(mut self, step: f32) -> Self {
        if step > 0.0 {
            self.physics_step = step;
        }
        self
    }

    /// Spawns an AI-controlled combatant.
    ///
    /// # Errors
    ///
    /// Fails if the loadout is invalid or the machine cannot start.
    pub fn spawn_enemy(
        &mut self,
        loadout: Loadout,
        archetype: EnemyArchetype,
        sinks: Sinks,
    ) -> Result<CombatantId> {
        let id = CombatantId(self.next_id);
        let core = self.build_core(id, loadout, sinks)?;
        let controller = EnemyController::new(&self.catalog, EnemyContext::new(core, archetype))?;

        self.next_id += 1;
        self.register(&controller);
        self.enemies.insert(id, controller);
        Ok(id)
    }

    /// Spawns the player under [`CombatantId::PLAYER`].
    ///
    /// # Errors
    ///
    /// Fails if a player already exists, the loadout is invalid or the
    /// machine cannot start.
    pub fn spawn_player(
        &mut self,
        loadout: Loadout,
        input: Box<dyn ActionBuffer>,
        sinks: Sinks,
    ) -> Result<CombatantId> {
        let id = CombatantId::PLAYER;
        if self.player.is_some() {
            return Err(RuntimeError::DuplicateCombatant(id));
        }
        let core = self.build_core(id, loadout, sinks)?;
        let controller = PlayerController::new(&self.catalog, PlayerContext::new(core, input))?;

        self.register(&controller);
        self.player = Some(controller);
        Ok(id)
    }

    /// Advances every combatant by one frame, runs the physics steps that
    /// fit in it, registers hits and drops removed combatants.
    pub fn tick(&mut self, dt: f32) {
        self.now += dt;
        let ids = self.ids();

        for &id in &ids {
            if let Some(combatant) = self.combatant_mut(id) {
                combatant.tick(dt);
            }
        }

        self.accumulator += dt;
        while self.accumulator >= self.physics_step {
            self.accumulator -= self.physics_step;
            let step = self.physics_step;
            for &id in &ids {
                if let Some(combatant) = self.combatant_mut(id) {
                    combatant.physics_tick(step);
                }
            }
        }

        self.register_hits();

        for id in self.roster.advance(dt) {
            if self.enemies.remove(&id).is_some() {
                debug!(target: "combat_runtime::arena", entity = %id, "enemy despawned");
            }
        }
    }

    /// Resolves the live hitbox of `attacker` against `defender`.
    ///
    /// Returns `Ok(None)` if the attacker has no live hitbox or already hit
    /// `defender` during this activation.
    ///
    /// # Errors
    ///
    /// Fails if either id is unknown.
    pub fn resolve_hit(
        &mut self,
        attacker: CombatantId,
        defender: CombatantId,
    ) -> Result<Option<HitResolution>> {
        let source = self
            .combatant(attacker)
            .ok_or(RuntimeError::UnknownCombatant(attacker))?;
        if source
            .active_swing()
            .is_none_or(|swing| swing.has_struck(defender))
        {
            return Ok(None);
        }
        let Some(hit) = source.outgoing_hit() else {
            return Ok(None);
        };
        if self.combatant(defender).is_none() {
            return Err(RuntimeError::UnknownCombatant(defender));
        }

        if let Some(source) = self.combatant_mut(attacker) {
            source.record_hit(defender);
        }
        let resolution = self.apply_hit(defender, &hit)?;

        if resolution.outcome.notifies() {
            self.events.publish(CombatEvent::HitLanded {
                attacker,
                defender,
                outcome: resolution.outcome,
                damage: resolution.result.final_damage,
            });
        }
        if let Some(severity) = resolution.attacker_stagger {
            self.events.publish(CombatEvent::Parried { attacker, defender });
            if let Some(source) = self.combatant_mut(attacker) {
                source.stagger(severity, Some(defender));
            }
        }
        Ok(Some(resolution))
    }

    /// Applies `hit` to `defender` directly (traps, scripted damage).
    ///
    /// # Errors
    ///
    /// Fails if `defender` is unknown.
    pub fn apply_hit(&mut self, defender: CombatantId, hit: &DamageInfo) -> Result<HitResolution> {
        let target = self
            .combatant_mut(defender)
            .ok_or(RuntimeError::UnknownCombatant(defender))?;
        Ok(target.receive_hit(hit))
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&dyn Combatant> {
        if id == CombatantId::PLAYER {
            self.player.as_ref().map(|player| player as &dyn Combatant)
        } else {
            self.enemies.get(&id).map(|enemy| enemy as &dyn Combatant)
        }
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut dyn Combatant> {
        if id == CombatantId::PLAYER {
            self.player
                .as_mut()
                .map(|player| player as &mut dyn Combatant)
        } else {
            self.enemies
                .get_mut(&id)
                .map(|enemy| enemy as &mut dyn Combatant)
        }
    }

    pub fn player(&self) -> Option<&PlayerController> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerController> {
        self.player.as_mut()
    }

    pub fn enemy(&self, id: CombatantId) -> Option<&EnemyController> {
        self.enemies.get(&id)
    }

    pub fn enemy_mut(&mut self, id: CombatantId) -> Option<&mut EnemyController> {
        self.enemies.get_mut(&id)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &EnemyController> {
        self.enemies.values()
    }

    /// Number of enemies still alive.
    pub fn living_enemies(&self) -> usize {
        self.enemies.values().filter(|enemy| enemy.is_alive()).count()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn catalog(&self) -> &StateCatalog {
        &self.catalog
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    fn build_core(&self, id: CombatantId, loadout: Loadout, sinks: Sinks) -> Result<CombatantCore> {
        let services = Services {
            locomotion: sinks.locomotion,
            animation: sinks.animation,
            hitbox: sinks.hitbox,
            registry: Rc::clone(&self.roster) as Rc<dyn CombatantRegistry>,
            events: self.events.clone(),
        };
        CombatantCore::new(id, loadout, Arc::clone(&self.config), services)
    }

    fn register(&self, combatant: &dyn Combatant) {
        self.roster
            .register(combatant.id(), combatant.faction(), combatant.position());
    }

    fn ids(&self) -> Vec<CombatantId> {
        self.player
            .iter()
            .map(|player| player.id())
            .chain(self.enemies.keys().copied())
            .collect()
    }

    /// Pairs every live hitbox with the hostiles inside it.
    fn register_hits(&mut self) {
        let ids = self.ids();
        let mut overlaps = Vec::new();

        for &attacker in &ids {
            let Some(source) = self.combatant(attacker) else {
                continue;
            };
            let Some(swing) = source.active_swing().filter(|_| source.is_alive()) else {
                continue;
            };
            for &defender in &ids {
                if defender == attacker || swing.has_struck(defender) {
                    continue;
                }
                let Some(target) = self.combatant(defender) else {
                    continue;
                };
                if target.is_alive()
                    && source.faction().is_hostile_to(&target.faction())
                    && in_hitbox(
                        swing.shape,
                        swing.reach,
                        swing.origin(source.position(), source.facing()),
                        source.facing(),
                        target.position(),
                    )
                {
                    overlaps.push((attacker, defender));
                }
            }
        }

        for (attacker, defender) in overlaps {
            if let Err(err) = self.resolve_hit(attacker, defender) {
                warn!(target: "combat_runtime::arena", error = %err, "hit registration failed");
            }
        }
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("now", &self.now)
            .field("player", &self.player.as_ref().map(|player| player.id()))
            .field("enemies", &self.enemies.len())
            .finish_non_exhaustive()
    }
}

/// Ground-plane reach test. Arcs sweep `angle` degrees around the facing;
/// every other shape covers the front half-plane.
fn in_hitbox(shape: HitboxShape, reach: f32, origin: Vec3, facing: Vec3, point: Vec3) -> bool {
    let mut offset = point - origin;
    offset.y = 0.0;
    let distance = offset.length();
    if distance > reach {
        return false;
    }
    if distance <= f32::EPSILON {
        return true;
    }

    let cos = offset.dot(facing) / distance;
    match shape {
        HitboxShape::Arc { angle, .. } => cos >= (angle.to_radians() * 0.5).cos(),
        HitboxShape::Sphere { .. } | HitboxShape::Box { .. } => cos >= 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hitbox_covers_front_only() {
        let sphere = HitboxShape::Sphere { radius: 1.0 };
        let origin = Vec3::ZERO;
        assert!(in_hitbox(sphere, 2.0, origin, Vec3::Z, Vec3::new(0.0, 0.0, 1.5)));
        assert!(!in_hitbox(sphere, 2.0, origin, Vec3::Z, Vec3::new(0.0, 0.0, -1.5)));
        assert!(!in_hitbox(sphere, 2.0, origin, Vec3::Z, Vec3::new(0.0, 0.0, 2.5)));
    }

    #[test]
    fn arc_respects_its_angle() {
        let arc = HitboxShape::Arc {
            radius: 2.0,
            angle: 90.0,
        };
        let origin = Vec3::ZERO;
        assert!(in_hitbox(arc, 2.0, origin, Vec3::Z, Vec3::new(0.5, 0.0, 1.0)));
        assert!(!in_hitbox(arc, 2.0, origin, Vec3::Z, Vec3::new(1.0, 0.0, 0.2)));
    }

    #[test]
    fn hitbox_offset_follows_facing() {
        use combat_core::Hitbox;

        use crate::context::ActiveSwing;

        let hitbox = Hitbox {
            shape: HitboxShape::Sphere { radius: 1.0 },
            offset: Vec3::new(1.0, 0.0, 2.0),
            range: 1.0,
        };
        let swing = ActiveSwing::new(0, &hitbox);

        let origin = swing.origin(Vec3::ZERO, Vec3::Z);
        assert!((origin - Vec3::new(1.0, 0.0, 2.0)).length() < 1e-5);
        assert!(in_hitbox(swing.shape, swing.reach, origin, Vec3::Z, Vec3::new(1.0, 0.0, 2.5)));
        assert!(!in_hitbox(swing.shape, swing.reach, Vec3::ZERO, Vec3::Z, Vec3::new(1.0, 0.0, 2.5)));

        // Facing +X puts "right" on -Z.
        let turned = swing.origin(Vec3::new(5.0, 0.0, 0.0), Vec3::X);
        assert!((turned - Vec3::new(7.0, 0.0, -1.0)).length() < 1e-5);
    }
}
