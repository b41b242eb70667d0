//! Validation errors for combat data.
//!
//! Stats and attack descriptors are validated once, when they are built.
//! Everything downstream (resolution, states, controllers) can then rely on
//! the documented invariants without re-checking them.

/// Invalid [`CombatStats`](crate::CombatStats).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must lie in [0, 1] (got {value})")]
    NotAFraction { field: &'static str, value: f32 },

    #[error("perfect parry window ({perfect}s) exceeds parry window ({window}s)")]
    PerfectWindowTooLong { perfect: f32, window: f32 },
}

/// Invalid [`AttackDescriptor`](crate::AttackDescriptor).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("attack {name}: {window} window [{start}, {end}] is not inside [0, 1]")]
    WindowOutOfRange {
        name: String,
        window: &'static str,
        start: f32,
        end: f32,
    },

    #[error("attack {name}: {window} window starts after it ends ({start} > {end})")]
    WindowReversed {
        name: String,
        window: &'static str,
        start: f32,
        end: f32,
    },

    #[error("attack {name}: {field} must be positive (got {value})")]
    NotPositive {
        name: String,
        field: &'static str,
        value: f32,
    },

    #[error("attack {name}: {field} must not be negative (got {value})")]
    Negative {
        name: String,
        field: &'static str,
        value: f32,
    },

    #[error("attack set is empty")]
    EmptySet,
}

/// Any combat-core validation failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), StatsError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(StatsError::NotPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), StatsError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(StatsError::Negative { field, value })
    }
}

pub(crate) fn fraction(field: &'static str, value: f32) -> Result<(), StatsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StatsError::NotAFraction { field, value })
    }
}
