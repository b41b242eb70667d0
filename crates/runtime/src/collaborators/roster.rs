//! In-memory combatant registry.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use combat_core::{CombatantId, Faction, Vec3};
use tracing::{debug, trace};

use super::CombatantRegistry;

#[derive(Debug, Clone, Copy)]
struct Entry {
    faction: Faction,
    position: Vec3,
    active: bool,
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<CombatantId, Entry>,
    blocked: HashSet<(CombatantId, CombatantId)>,
    removals: Vec<(CombatantId, f32)>,
}

/// Registry of the combatants of one simulation.
///
/// Sight is clear unless a pair was blocked with [`block_sight`](Self::block_sight).
#[derive(Debug, Default)]
pub struct Roster {
    inner: RefCell<Inner>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an active combatant.
    pub fn register(&self, id: CombatantId, faction: Faction, position: Vec3) {
        self.inner.borrow_mut().entries.insert(
            id,
            Entry {
                faction,
                position,
                active: true,
            },
        );
    }

    /// Returns true while `id` is registered and active.
    pub fn is_active(&self, id: CombatantId) -> bool {
        self.inner
            .borrow()
            .entries
            .get(&id)
            .is_some_and(|entry| entry.active)
    }

    /// Returns true while `id` is known, active or not.
    pub fn contains(&self, id: CombatantId) -> bool {
        self.inner.borrow().entries.contains_key(&id)
    }

    /// Blocks line of sight between `a` and `b` in both directions.
    pub fn block_sight(&self, a: CombatantId, b: CombatantId) {
        let mut inner = self.inner.borrow_mut();
        inner.blocked.insert((a, b));
        inner.blocked.insert((b, a));
    }

    /// Clears every sight block.
    pub fn clear_sight_blocks(&self) {
        self.inner.borrow_mut().blocked.clear();
    }

    /// Removals waiting for their delay, as `(id, seconds left)`.
    pub fn pending_removals(&self) -> Vec<(CombatantId, f32)> {
        self.inner.borrow().removals.clone()
    }

    /// Counts down scheduled removals and returns the ids whose delay ran out.
    /// Those ids are dropped from the registry.
    pub fn advance(&self, dt: f32) -> Vec<CombatantId> {
        let mut inner = self.inner.borrow_mut();
        let mut due = Vec::new();
        inner.removals.retain_mut(|(id, left)| {
            *left -= dt;
            if *left <= 0.0 {
                due.push(*id);
                false
            } else {
                true
            }
        });
        for id in &due {
            inner.entries.remove(id);
            debug!(target: "combat_runtime::roster", entity = %id, "combatant removed");
        }
        due
    }
}

impl CombatantRegistry for Roster {
    fn query_hostiles(&self, faction: Faction) -> Vec<CombatantId> {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|(_, entry)| entry.active && faction.is_hostile_to(&entry.faction))
            .map(|(id, _)| *id)
            .collect()
    }

    fn position_of(&self, id: CombatantId) -> Option<Vec3> {
        self.inner
            .borrow()
            .entries
            .get(&id)
            .filter(|entry| entry.active)
            .map(|entry| entry.position)
    }

    fn line_of_sight(&self, from: CombatantId, to: CombatantId) -> bool {
        !self.inner.borrow().blocked.contains(&(from, to))
    }

    fn update_position(&self, id: CombatantId, position: Vec3) {
        if let Some(entry) = self.inner.borrow_mut().entries.get_mut(&id) {
            entry.position = position;
        }
    }

    fn unregister(&self, id: CombatantId) {
        if let Some(entry) = self.inner.borrow_mut().entries.get_mut(&id) {
            entry.active = false;
            debug!(target: "combat_runtime::roster", entity = %id, "combatant unregistered");
        }
    }

    fn schedule_removal(&self, id: CombatantId, delay: f32) {
        trace!(target: "combat_runtime::roster", entity = %id, delay, "removal scheduled");
        self.inner.borrow_mut().removals.push((id, delay));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_combatants_disappear_from_queries() {
        let roster = Roster::new();
        roster.register(CombatantId(1), Faction::Player, Vec3::ZERO);
        roster.register(CombatantId(2), Faction::Hostile, Vec3::X);

        assert_eq!(roster.query_hostiles(Faction::Hostile), vec![CombatantId(1)]);
        roster.unregister(CombatantId(1));
        assert!(roster.query_hostiles(Faction::Hostile).is_empty());
        assert_eq!(roster.position_of(CombatantId(1)), None);
        assert!(roster.contains(CombatantId(1)));
    }

    #[test]
    fn removal_fires_after_delay() {
        let roster = Roster::new();
        roster.register(CombatantId(3), Faction::Hostile, Vec3::ZERO);
        roster.schedule_removal(CombatantId(3), 1.0);

        assert!(roster.advance(0.5).is_empty());
        assert_eq!(roster.advance(0.5), vec![CombatantId(3)]);
        assert!(!roster.contains(CombatantId(3)));
    }

    #[test]
    fn sight_blocks_are_symmetric() {
        let roster = Roster::new();
        roster.block_sight(CombatantId(1), CombatantId(2));
        assert!(!roster.line_of_sight(CombatantId(2), CombatantId(1)));
        assert!(roster.line_of_sight(CombatantId(1), CombatantId(3)));
    }
}
