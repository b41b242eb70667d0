//! States and helpers shared by every combatant kind.

mod death;
mod stagger;
mod swing;

pub use death::DeathState;
pub use stagger::StaggerState;
pub use swing::SwingTracker;

/// Share of a movement to apply this tick.
///
/// The movement is spread over the first `window` of a state's normalized
/// time; `done` tracks the share already applied. Summing the returned deltas
/// always yields 1, whatever the frame rate.
pub(crate) fn progress_delta(normalized: f32, window: f32, done: &mut f32) -> f32 {
    let progress = if window > 0.0 {
        (normalized / window).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let delta = (progress - *done).max(0.0);
    *done = done.max(progress);
    delta
}
