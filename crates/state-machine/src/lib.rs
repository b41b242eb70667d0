//! Generic per-entity state machine for real-time simulations.
//!
//! One engine type drives every kind of entity. A kind is described by a
//! closed tag enum implementing [`StateKind`] and by a [`StateSet`] that lists
//! the factories of its concrete states. The factory table is built once per
//! kind inside a shared [`StateCatalog`]; each [`StateMachine`] then builds its
//! own state instances from it, so states are per-entity and never shared.
//!
//! - **Polled timing**: states never block, every duration is an elapsed-time
//!   comparison against the context clock
//! - **Deferred transitions**: states return a [`Transition`] request which the
//!   engine applies after the state's own code has run
//! - **Log, don't fail**: configuration mistakes (unregistered or sentinel
//!   targets) are logged through `tracing` and leave the machine untouched
//!
//! # Architecture
//!
//! - [`State`]: lifecycle contract implemented by every concrete state
//! - [`StateKind`]: tag enum plus the per-kind transition policy
//! - [`StateCatalog`], [`FactoryTable`]: discovery cache of state factories
//! - [`StateMachine`]: registry, dispatch, change/try/force-interrupt

pub mod catalog;
pub mod kind;
pub mod machine;
pub mod state;
pub mod timing;
pub mod transition;

// Re-export core types for ergonomic API
pub use catalog::{
    FactoryTable, StateBuildError, StateCatalog, StateFactory, StateSet, default_factory,
};
pub use kind::{Clocked, StateKind};
pub use machine::StateMachine;
pub use state::State;
pub use timing::StateTiming;
pub use transition::Transition;
