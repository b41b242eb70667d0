//! Timing snapshot handed to states on every dispatch.

/// Elapsed-time view of the current state at the moment of a call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateTiming {
    /// Simulation time of the call.
    pub now: f32,
    /// Length of the tick being dispatched (0 outside of ticks).
    pub dt: f32,
    /// Seconds since the state was entered.
    pub state_time: f32,
    /// `state_time / duration` clamped to `[0, 1]`, or 0 for unbounded states.
    pub normalized_time: f32,
}

impl StateTiming {
    /// Builds a timing snapshot for a state entered at `entered_at`.
    pub fn new(now: f32, dt: f32, entered_at: f32, duration: f32) -> Self {
        let state_time = (now - entered_at).max(0.0);
        Self {
            now,
            dt,
            state_time,
            normalized_time: normalize(state_time, duration),
        }
    }

    /// Returns `true` once a bounded state has run its full duration.
    #[inline]
    pub fn is_complete(&self, duration: f32) -> bool {
        duration > 0.0 && self.state_time >= duration
    }
}

/// `elapsed / duration` clamped to `[0, 1]`; unbounded durations yield 0.
#[inline]
pub fn normalize(elapsed: f32, duration: f32) -> f32 {
    if duration > 0.0 {
        (elapsed / duration).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_states_report_zero_progress() {
        let timing = StateTiming::new(5.0, 0.016, 1.0, 0.0);
        assert_eq!(timing.state_time, 4.0);
        assert_eq!(timing.normalized_time, 0.0);
        assert!(!timing.is_complete(0.0));
    }

    #[test]
    fn normalized_time_is_clamped() {
        let timing = StateTiming::new(3.0, 0.016, 1.0, 1.0);
        assert_eq!(timing.normalized_time, 1.0);
        assert!(timing.is_complete(1.0));

        let halfway = StateTiming::new(1.5, 0.016, 1.0, 1.0);
        assert!((halfway.normalized_time - 0.5).abs() < f32::EPSILON);
    }
}
