//! Construction-time configuration errors.
//!
//! Anything listed here prevents a technique from being armed. Per-tick
//! anomalies (degenerate directions, lost tracking) are never errors; the
//! controller absorbs them and reports "not moving" for that tick.

/// Why a locomotion technique could not be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocomotionError {
    /// `min` exceeds `max`.
    #[error("speed range is empty: min {min} km/h exceeds max {max} km/h")]
    InvalidSpeedRange { min: f32, max: f32 },

    /// The lower speed bound is below zero, which would move the actor
    /// against its direction.
    #[error("minimum speed must not be negative, got {min} km/h")]
    NegativeSpeed { min: f32 },

    /// The ramp step is zero or negative.
    #[error("speed step must be positive, got {0} km/h")]
    NonPositiveStep(f32),

    /// The starting speed is not inside `[min, max]`.
    #[error("initial speed {initial} km/h lies outside [{min}, {max}] km/h")]
    InitialSpeedOutOfRange { initial: f32, min: f32, max: f32 },

    /// A trigger threshold is zero or negative.
    #[error("{role} threshold must be positive, got {value}")]
    NonPositiveThreshold { role: &'static str, value: f32 },

    /// A strategy's tracked object or control was left unset.
    #[error("{role} is not set")]
    MissingAnchor { role: &'static str },

    /// NaN or infinity where a number was expected.
    #[error("{field} must be finite, got {value}")]
    NonFiniteValue { field: &'static str, value: f32 },
}

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<f32, LocomotionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LocomotionError::NonFiniteValue { field, value })
    }
}

/// Unwraps an optional anchor, naming the role when it is missing.
pub(crate) fn require<T>(role: &'static str, anchor: Option<T>) -> Result<T, LocomotionError> {
    anchor.ok_or(LocomotionError::MissingAnchor { role })
}
