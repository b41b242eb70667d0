//! Unified error types surfaced by the runtime API.
//!
//! Transition denials are not errors: engine calls return `bool`. Errors are
//! reserved for building combatants and addressing them.
use combat_core::{CombatantId, CoreError, DescriptorError, StatsError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no combatant with id {0}")]
    UnknownCombatant(CombatantId),

    #[error("combatant {0} already exists")]
    DuplicateCombatant(CombatantId),

    #[error("state machine for {name} failed to start in {state}")]
    StartFailed { name: String, state: &'static str },

    #[error("invalid stats: {0}")]
    InvalidStats(#[from] StatsError),

    #[error("invalid attack set: {0}")]
    InvalidAttacks(#[from] DescriptorError),
}

impl From<CoreError> for RuntimeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Stats(e) => RuntimeError::InvalidStats(e),
            CoreError::Descriptor(e) => RuntimeError::InvalidAttacks(e),
        }
    }
}
