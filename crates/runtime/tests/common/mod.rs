#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use combat_core::{
    AttackDescriptor, AttackSet, CombatConfig, CombatStats, CombatantId, Faction,
    NormalizedWindow, Vec3,
};
use combat_runtime::{
    AnimationLog, CombatEvent, CombatantCore, CombatantRegistry, EnemyArchetype, EnemyContext,
    EnemyController, EventBus, HitboxLog, InputQueue, Kinematic, Loadout, PlayerContext,
    PlayerController, Roster, Services,
};
use state_machine::StateCatalog;

/// Shared world plus recording sinks for controllers built by hand.
pub struct Rig {
    pub catalog: StateCatalog,
    pub config: Arc<CombatConfig>,
    pub roster: Rc<Roster>,
    pub events: EventBus,
    pub animation: AnimationLog,
    pub hitbox: HitboxLog,
    pub log: Rc<RefCell<Vec<CombatEvent>>>,
}

impl Rig {
    pub fn new() -> Self {
        let events = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        events.subscribe_all(move |event| sink.borrow_mut().push(event.clone()));

        Self {
            catalog: StateCatalog::new(),
            config: Arc::new(CombatConfig::default()),
            roster: Rc::new(Roster::new()),
            events,
            animation: AnimationLog::new(),
            hitbox: HitboxLog::new(),
            log,
        }
    }

    pub fn core(&self, id: CombatantId, loadout: Loadout, position: Vec3) -> CombatantCore {
        self.roster.register(id, loadout.faction, position);
        let services = Services {
            locomotion: Box::new(Kinematic::new(position)),
            animation: Box::new(self.animation.clone()),
            hitbox: Box::new(self.hitbox.clone()),
            registry: Rc::clone(&self.roster) as Rc<dyn CombatantRegistry>,
            events: self.events.clone(),
        };
        CombatantCore::new(id, loadout, Arc::clone(&self.config), services).unwrap()
    }

    pub fn enemy(&self, id: u32, loadout: Loadout, position: Vec3) -> EnemyController {
        let core = self.core(CombatantId(id), loadout, position);
        EnemyController::new(&self.catalog, EnemyContext::new(core, EnemyArchetype::Grunt)).unwrap()
    }

    pub fn player(&self, loadout: Loadout, position: Vec3) -> (PlayerController, InputQueue) {
        let queue = InputQueue::new();
        let core = self.core(CombatantId::PLAYER, loadout, position);
        let ctx = PlayerContext::new(core, Box::new(queue.clone()));
        (PlayerController::new(&self.catalog, ctx).unwrap(), queue)
    }

    /// Registers a stand-in opponent that only exists in the registry.
    pub fn dummy(&self, id: CombatantId, faction: Faction, position: Vec3) {
        self.roster.register(id, faction, position);
    }

    pub fn events(&self) -> Vec<CombatEvent> {
        self.log.borrow().clone()
    }

    pub fn started_attacks(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                CombatEvent::AttackStarted { attack, .. } => Some(attack.clone()),
                _ => None,
            })
            .collect()
    }
}

pub fn slash() -> AttackDescriptor {
    AttackDescriptor::named("slash")
        .with_timing(1.0, NormalizedWindow::new(0.3, 0.5))
        .with_damage(10.0, 10.0)
        .with_cost(10.0)
}

/// `slash` chaining into `thrust`.
pub fn sword() -> AttackSet {
    AttackSet::new(vec![
        slash().with_combo(NormalizedWindow::new(0.5, 0.9), 0),
        AttackDescriptor::named("thrust")
            .with_timing(1.0, NormalizedWindow::new(0.3, 0.5))
            .with_damage(12.0, 12.0)
            .with_cost(10.0),
    ])
    .unwrap()
}

pub fn grunt(stats: CombatStats) -> Loadout {
    Loadout::new("grunt", Faction::Hostile, stats, AttackSet::new(vec![slash()]).unwrap())
}

pub fn hero(stats: CombatStats) -> Loadout {
    Loadout::new("hero", Faction::Player, stats, sword())
}
