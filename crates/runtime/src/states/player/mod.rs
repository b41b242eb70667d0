//! Player-controlled combatants.
//!
//! Player states never read the input buffer themselves. The controller
//! routes buffered actions before each frame tick (see
//! [`PlayerContext::route_input`]) and states only see the continuous part of
//! the input through [`InputSnapshot`].

mod attack;
mod block;
mod dodge;
mod neutral;
mod parry;

pub use attack::AttackState;
pub use block::BlockState;
pub use dodge::DodgeState;
pub use neutral::NeutralState;
pub use parry::ParryState;

use combat_core::Vec3;
use state_machine::{Clocked, FactoryTable, StateKind, StateMachine, StateSet, default_factory};
use tracing::trace;

use super::shared::{DeathState, StaggerState};
use crate::collaborators::ActionBuffer;
use crate::context::{CombatContext, CombatKind, CombatantCore};

/// States of a player-controlled combatant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum PlayerStateKind {
    Neutral,
    Attack,
    Block,
    Dodge,
    Parry,
    Stagger,
    Death,
}

impl StateKind for PlayerStateKind {
    type Trigger = PlayerAction;

    const NEUTRAL: Self = Self::Neutral;

    fn is_terminal(self) -> bool {
        self == Self::Death
    }
}

impl CombatKind for PlayerStateKind {
    const STAGGER: Self = Self::Stagger;
    const DEATH: Self = Self::Death;

    fn after_stagger(_core: &CombatantCore) -> Self {
        Self::Neutral
    }
}

impl StateSet<PlayerContext> for PlayerStateKind {
    fn register(table: &mut FactoryTable<PlayerContext, Self>) {
        table
            .register(Self::Neutral, default_factory::<PlayerContext, Self, NeutralState>)
            .register(Self::Attack, default_factory::<PlayerContext, Self, AttackState>)
            .register(Self::Block, default_factory::<PlayerContext, Self, BlockState>)
            .register(Self::Dodge, default_factory::<PlayerContext, Self, DodgeState>)
            .register(Self::Parry, default_factory::<PlayerContext, Self, ParryState>)
            .register(
                Self::Stagger,
                default_factory::<PlayerContext, Self, StaggerState<Self>>,
            )
            .register(
                Self::Death,
                default_factory::<PlayerContext, Self, DeathState<Self>>,
            );
    }
}

/// Discrete player inputs that can be buffered.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PlayerAction {
    LightAttack,
    Block,
    Dodge,
    Parry,
}

impl PlayerAction {
    /// Order in which buffered actions are considered each tick.
    pub const PRIORITY: [Self; 4] = [Self::Dodge, Self::Parry, Self::Block, Self::LightAttack];

    /// State the action requests.
    pub fn state(self) -> PlayerStateKind {
        match self {
            Self::LightAttack => PlayerStateKind::Attack,
            Self::Block => PlayerStateKind::Block,
            Self::Dodge => PlayerStateKind::Dodge,
            Self::Parry => PlayerStateKind::Parry,
        }
    }
}

/// Continuous input sampled for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Desired movement direction on the ground plane; any length.
    pub movement: Vec3,
    pub block_held: bool,
}

/// Context of a player-controlled combatant.
pub struct PlayerContext {
    pub core: CombatantCore,
    pub input: Box<dyn ActionBuffer>,
    pub snapshot: InputSnapshot,
    /// Attack that was inside its combo window when the attack state exited.
    pub(crate) combo_from: Option<usize>,
    /// Attack being played by the attack state.
    pub(crate) current_attack: Option<usize>,
}

impl PlayerContext {
    pub fn new(core: CombatantCore, input: Box<dyn ActionBuffer>) -> Self {
        Self {
            core,
            input,
            snapshot: InputSnapshot::default(),
            combo_from: None,
            current_attack: None,
        }
    }

    /// Attack a light-attack press would start from `current`.
    pub fn next_attack(&self, current: Option<PlayerStateKind>) -> usize {
        if current == Some(PlayerStateKind::Attack) {
            self.current_attack
                .and_then(|index| self.core.attacks.successor(index))
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Stamina `action` costs when requested from `current`.
    pub fn action_cost(&self, action: PlayerAction, current: Option<PlayerStateKind>) -> f32 {
        let stats = &self.core.stats;
        match action {
            PlayerAction::Dodge => stats.dodge_cost,
            PlayerAction::Parry => stats.parry_cost,
            PlayerAction::Block => stats.block_cost,
            PlayerAction::LightAttack => self
                .core
                .attacks
                .get(self.next_attack(current))
                .map_or(0.0, |attack| attack.cost),
        }
    }

    /// Turns buffered actions into transition requests.
    ///
    /// Actions are tried in [`PlayerAction::PRIORITY`] order. An action is
    /// consumed only if the machine accepted it; routing stops at the first
    /// accepted action.
    pub fn route_input(machine: &mut StateMachine<Self, PlayerStateKind>, ctx: &mut Self) {
        let now = ctx.core.now();
        ctx.input.expire(now);
        if !ctx.core.is_alive() {
            return;
        }

        for action in PlayerAction::PRIORITY {
            if !ctx.input.has_buffered(action) {
                continue;
            }
            let cost = ctx.action_cost(action, machine.current());
            if !ctx.core.runtime.can_afford(cost) {
                trace!(
                    target: "combat_runtime::controller",
                    entity = %ctx.core.id,
                    %action,
                    cost,
                    "buffered action unaffordable"
                );
                continue;
            }
            if machine.try_change_state_with(action.state(), action, ctx) {
                ctx.input.consume_buffered(action);
                break;
            }
        }
    }
}

impl std::fmt::Debug for PlayerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerContext")
            .field("core", &self.core)
            .field("snapshot", &self.snapshot)
            .field("combo_from", &self.combo_from)
            .field("current_attack", &self.current_attack)
            .finish_non_exhaustive()
    }
}

impl Clocked for PlayerContext {
    fn now(&self) -> f32 {
        self.core.now()
    }
}

impl CombatContext for PlayerContext {
    type Kind = PlayerStateKind;

    const INITIAL: PlayerStateKind = PlayerStateKind::Neutral;

    fn core(&self) -> &CombatantCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CombatantCore {
        &mut self.core
    }

    fn before_tick(machine: &mut StateMachine<Self, PlayerStateKind>, ctx: &mut Self) {
        Self::route_input(machine, ctx);
    }
}
