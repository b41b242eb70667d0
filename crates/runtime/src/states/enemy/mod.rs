//! AI-controlled combatants.
//!
//! ```text
//! Idle ──scan──► Alert ──► Chase ──in range──► Attack ──chain──► Attack
//!  ▲               │         │  ▲                 │
//!  └──lost─────────┴─────────┤  └─────────────────┘
//!  ▲                         ▼
//!  └──expired──────── Investigate
//! Stagger / Death are reachable from every state.
//! ```

mod alert;
mod attack;
mod chase;
mod idle;
mod investigate;

pub use alert::AlertState;
pub use attack::AttackState;
pub use chase::ChaseState;
pub use idle::IdleState;
pub use investigate::InvestigateState;

use combat_core::Vec3;
use state_machine::{Clocked, FactoryTable, StateKind, StateSet, default_factory};

use super::shared::{DeathState, StaggerState};
use crate::context::{CombatContext, CombatKind, CombatantCore};

/// States of an AI-controlled combatant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum EnemyStateKind {
    /// Placeholder; never entered.
    None,
    Idle,
    Alert,
    Chase,
    Investigate,
    Attack,
    Stagger,
    Death,
}

impl StateKind for EnemyStateKind {
    type Trigger = ();

    const NEUTRAL: Self = Self::Idle;

    fn allows_reentry() -> bool {
        false
    }

    fn is_sentinel(self) -> bool {
        self == Self::None
    }

    fn is_terminal(self) -> bool {
        self == Self::Death
    }
}

impl CombatKind for EnemyStateKind {
    const STAGGER: Self = Self::Stagger;
    const DEATH: Self = Self::Death;

    fn after_stagger(core: &CombatantCore) -> Self {
        if core.has_valid_target() {
            Self::Chase
        } else {
            Self::Idle
        }
    }
}

impl StateSet<EnemyContext> for EnemyStateKind {
    fn register(table: &mut FactoryTable<EnemyContext, Self>) {
        table
            .register(Self::Idle, default_factory::<EnemyContext, Self, IdleState>)
            .register(Self::Alert, default_factory::<EnemyContext, Self, AlertState>)
            .register(Self::Chase, default_factory::<EnemyContext, Self, ChaseState>)
            .register(
                Self::Investigate,
                default_factory::<EnemyContext, Self, InvestigateState>,
            )
            .register(Self::Attack, default_factory::<EnemyContext, Self, AttackState>)
            .register(
                Self::Stagger,
                default_factory::<EnemyContext, Self, StaggerState<Self>>,
            )
            .register(
                Self::Death,
                default_factory::<EnemyContext, Self, DeathState<Self>>,
            );
    }
}

/// How an archetype picks its next attack.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EnemyArchetype {
    /// First affordable attack in reach.
    #[default]
    Grunt,
    /// Hardest-hitting affordable attack in reach.
    Brute,
    /// Walks its attack list in order, wrapping around.
    Duelist,
}

/// Context of an AI-controlled combatant.
#[derive(Debug)]
pub struct EnemyContext {
    pub core: CombatantCore,
    pub archetype: EnemyArchetype,
    /// Where the target was last seen.
    pub last_seen: Option<Vec3>,
    /// Attack the next entry into [`EnemyStateKind::Attack`] plays.
    pub next_attack: Option<usize>,
    cursor: usize,
}

impl EnemyContext {
    pub fn new(core: CombatantCore, archetype: EnemyArchetype) -> Self {
        Self {
            core,
            archetype,
            last_seen: None,
            next_attack: None,
            cursor: 0,
        }
    }

    /// Picks an attack that is affordable and reaches the target.
    pub fn select_attack(&mut self) -> Option<usize> {
        let distance = self.core.distance_to_target()?;
        let stamina = self.core.runtime.stamina();
        let attacks = &self.core.attacks;

        match self.archetype {
            EnemyArchetype::Grunt => attacks.first_usable(stamina, distance),
            EnemyArchetype::Brute => attacks.heaviest_usable(stamina, distance),
            EnemyArchetype::Duelist => {
                let len = attacks.len();
                let picked = (0..len).map(|step| (self.cursor + step) % len).find(|&i| {
                    attacks
                        .get(i)
                        .is_some_and(|a| a.cost <= stamina && a.hitbox.range >= distance)
                })?;
                self.cursor = (picked + 1) % len;
                Some(picked)
            }
        }
    }

    /// Chase if the target is still worth pursuing, otherwise drop it and idle.
    pub(crate) fn disengage(&mut self) -> EnemyStateKind {
        if self.core.has_valid_target() {
            EnemyStateKind::Chase
        } else {
            self.core.target = None;
            EnemyStateKind::Idle
        }
    }
}

impl Clocked for EnemyContext {
    fn now(&self) -> f32 {
        self.core.now()
    }
}

impl CombatContext for EnemyContext {
    type Kind = EnemyStateKind;

    const INITIAL: EnemyStateKind = EnemyStateKind::Idle;

    fn core(&self) -> &CombatantCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CombatantCore {
        &mut self.core
    }
}
