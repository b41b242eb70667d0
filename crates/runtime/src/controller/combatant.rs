//! Kind-erased view of a controller.

use combat_core::{
    CombatantId, DamageInfo, Faction, HitResolution, RuntimeData, StaggerSeverity, Vec3,
};

use super::Controller;
use crate::context::{ActiveSwing, CombatContext, CombatKind};

/// What a simulation needs from a combatant, whatever its kind.
pub trait Combatant {
    fn id(&self) -> CombatantId;
    fn name(&self) -> &str;
    fn faction(&self) -> Faction;
    fn position(&self) -> Vec3;
    fn facing(&self) -> Vec3;
    fn is_alive(&self) -> bool;
    fn runtime(&self) -> &RuntimeData;

    /// Label of the current state.
    fn state_name(&self) -> Option<&'static str>;

    fn tick(&mut self, dt: f32);
    fn physics_tick(&mut self, dt: f32);

    fn active_swing(&self) -> Option<&ActiveSwing>;
    fn outgoing_hit(&self) -> Option<DamageInfo>;
    fn record_hit(&mut self, defender: CombatantId);
    fn receive_hit(&mut self, hit: &DamageInfo) -> HitResolution;
    fn stagger(&mut self, severity: StaggerSeverity, source: Option<CombatantId>) -> bool;
    fn heal(&mut self, amount: f32) -> f32;
}

impl<C: CombatContext> Combatant for Controller<C> {
    fn id(&self) -> CombatantId {
        self.core().id
    }

    fn name(&self) -> &str {
        &self.core().name
    }

    fn faction(&self) -> Faction {
        self.core().faction
    }

    fn position(&self) -> Vec3 {
        self.core().position()
    }

    fn facing(&self) -> Vec3 {
        self.core().locomotion.facing()
    }

    fn is_alive(&self) -> bool {
        self.core().is_alive()
    }

    fn runtime(&self) -> &RuntimeData {
        &self.core().runtime
    }

    fn state_name(&self) -> Option<&'static str> {
        self.current().map(CombatKind::label)
    }

    fn tick(&mut self, dt: f32) {
        Controller::tick(self, dt);
    }

    fn physics_tick(&mut self, dt: f32) {
        Controller::physics_tick(self, dt);
    }

    fn active_swing(&self) -> Option<&ActiveSwing> {
        Controller::active_swing(self)
    }

    fn outgoing_hit(&self) -> Option<DamageInfo> {
        Controller::outgoing_hit(self)
    }

    fn record_hit(&mut self, defender: CombatantId) {
        Controller::record_hit(self, defender);
    }

    fn receive_hit(&mut self, hit: &DamageInfo) -> HitResolution {
        Controller::receive_hit(self, hit)
    }

    fn stagger(&mut self, severity: StaggerSeverity, source: Option<CombatantId>) -> bool {
        Controller::stagger(self, severity, source)
    }

    fn heal(&mut self, amount: f32) -> f32 {
        Controller::heal(self, amount)
    }
}
