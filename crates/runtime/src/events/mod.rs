//! Topic-based notifications for UI, camera and other adapters.
//!
//! Consumers subscribe only to the topics they need. Publishing is
//! synchronous: callbacks run before `publish` returns, on the simulation
//! thread. The engine has no knowledge of who listens.

mod bus;
mod types;

pub use bus::{EventBus, SubscriptionId, Topic};
pub use types::CombatEvent;
