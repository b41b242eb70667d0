//! Timing primitives: normalized windows and parry windows.
//!
//! All windows are evaluated against the engine's state clock, never against
//! animation playback, so tuning stays independent of animation assets.

use crate::error::StatsError;

/// Interval of normalized state time, `0 ≤ start ≤ end ≤ 1`.
///
/// Membership is half-open: `start ≤ t < end`. A window ending at `1.0`
/// therefore stays open until the owning state exits.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedWindow {
    pub start: f32,
    pub end: f32,
}

impl NormalizedWindow {
    /// Empty window that never opens.
    pub const NEVER: Self = Self {
        start: 1.0,
        end: 1.0,
    };

    /// Creates a window without validation; see [`AttackDescriptor::validate`](crate::AttackDescriptor::validate).
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Returns true if both ends lie inside `[0, 1]` and `start <= end`.
    pub fn is_well_formed(&self) -> bool {
        (0.0..=1.0).contains(&self.start) && (0.0..=1.0).contains(&self.end) && self.start <= self.end
    }

    /// Returns true while `start ≤ t < end`.
    #[inline]
    pub fn contains(&self, t: f32) -> bool {
        t >= self.start && t < self.end
    }

    /// Returns true once `t` reached the end of the window.
    #[inline]
    pub fn has_closed(&self, t: f32) -> bool {
        t >= self.end
    }

    /// Width of the window in normalized time.
    #[inline]
    pub fn width(&self) -> f32 {
        self.end - self.start
    }
}

/// Result of classifying a defensive input against a [`ParryTiming`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParryClass {
    /// Inside the perfect sub-window: the attacker is staggered, no damage.
    Perfect,
    /// Inside the window but past the perfect sub-window: softened hit.
    Partial,
    /// Before the window opened or after it closed.
    Inactive,
}

/// A parry window opened at `window_start`.
///
/// ```text
/// elapsed ∈ [0, perfect)   → Perfect
/// elapsed ∈ [perfect, dur) → Partial
/// otherwise                → Inactive
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParryTiming {
    window_start: f32,
    window_duration: f32,
    perfect_duration: f32,
}

impl ParryTiming {
    /// Opens a parry window at `window_start`.
    ///
    /// # Errors
    ///
    /// Fails if a duration is negative or the perfect sub-window is longer
    /// than the full window.
    pub fn new(
        window_start: f32,
        window_duration: f32,
        perfect_duration: f32,
    ) -> Result<Self, StatsError> {
        crate::error::non_negative("parry_window", window_duration)?;
        crate::error::non_negative("perfect_parry_window", perfect_duration)?;
        if perfect_duration > window_duration {
            return Err(StatsError::PerfectWindowTooLong {
                perfect: perfect_duration,
                window: window_duration,
            });
        }
        Ok(Self {
            window_start,
            window_duration,
            perfect_duration,
        })
    }

    /// Time the window opened.
    pub fn window_start(&self) -> f32 {
        self.window_start
    }

    /// Full window length in seconds.
    pub fn window_duration(&self) -> f32 {
        self.window_duration
    }

    /// Perfect sub-window length in seconds.
    pub fn perfect_duration(&self) -> f32 {
        self.perfect_duration
    }

    /// Seconds since the window opened (negative before it opens).
    #[inline]
    pub fn elapsed(&self, now: f32) -> f32 {
        now - self.window_start
    }

    /// Classifies a hit arriving at `now`.
    pub fn classify(&self, now: f32) -> ParryClass {
        let elapsed = self.elapsed(now);
        if elapsed < 0.0 || elapsed >= self.window_duration {
            ParryClass::Inactive
        } else if elapsed < self.perfect_duration {
            ParryClass::Perfect
        } else {
            ParryClass::Partial
        }
    }

    /// Returns true inside the perfect sub-window.
    pub fn is_perfect(&self, now: f32) -> bool {
        self.classify(now) == ParryClass::Perfect
    }

    /// Returns true anywhere inside the window.
    pub fn is_active(&self, now: f32) -> bool {
        self.classify(now) != ParryClass::Inactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_edges() {
        let parry = ParryTiming::new(10.0, 0.2, 0.1).unwrap();

        assert_eq!(parry.classify(9.99), ParryClass::Inactive);
        assert_eq!(parry.classify(10.0), ParryClass::Perfect);
        assert_eq!(parry.classify(10.05), ParryClass::Perfect);
        assert_eq!(parry.classify(10.11), ParryClass::Partial);
        assert_eq!(parry.classify(10.15), ParryClass::Partial);
        assert_eq!(parry.classify(10.21), ParryClass::Inactive);
        assert!(parry.is_active(10.19));
        assert!(!parry.is_perfect(10.19));
    }

    #[test]
    fn classification_edges_at_zero_start() {
        let parry = ParryTiming::new(0.0, 0.2, 0.1).unwrap();
        assert_eq!(parry.classify(0.0), ParryClass::Perfect);
        assert_eq!(parry.classify(0.1), ParryClass::Partial);
        assert_eq!(parry.classify(0.2), ParryClass::Inactive);
    }

    #[test]
    fn perfect_window_must_fit() {
        assert!(matches!(
            ParryTiming::new(0.0, 0.1, 0.2),
            Err(StatsError::PerfectWindowTooLong { .. })
        ));
        assert!(ParryTiming::new(0.0, -0.1, 0.0).is_err());
    }

    #[test]
    fn window_membership_is_half_open() {
        let window = NormalizedWindow::new(0.2, 0.4);
        assert!(!window.contains(0.19));
        assert!(window.contains(0.2));
        assert!(window.contains(0.39));
        assert!(!window.contains(0.4));
        assert!(window.has_closed(0.4));
        assert!(window.is_well_formed());
        assert!(!NormalizedWindow::new(0.5, 0.4).is_well_formed());
        assert!(!NormalizedWindow::new(-0.1, 0.4).is_well_formed());
    }
}
