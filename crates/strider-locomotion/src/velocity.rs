//! Bounded speed ramp adjusted in discrete steps.

use crate::error::{LocomotionError, ensure_finite};

/// Divisor turning km/h into m/s. Fixed, not configurable.
pub const KMH_PER_MPS: f32 = 3.6;

/// A bounded scalar speed in km/h with fixed-size increase/decrease steps.
///
/// `min <= value <= max` holds after construction and after every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityModel {
    value: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl VelocityModel {
    /// Creates a ramp starting at `initial`.
    ///
    /// # Errors
    ///
    /// Fails if any argument is not finite, `min < 0`, `min > max`,
    /// `step <= 0`, or `initial` lies outside `[min, max]`.
    pub fn new(initial: f32, step: f32, min: f32, max: f32) -> Result<Self, LocomotionError> {
        let initial = ensure_finite("initial speed", initial)?;
        let step = ensure_finite("speed step", step)?;
        let min = ensure_finite("minimum speed", min)?;
        let max = ensure_finite("maximum speed", max)?;

        if min < 0.0 {
            return Err(LocomotionError::NegativeSpeed { min });
        }
        if min > max {
            return Err(LocomotionError::InvalidSpeedRange { min, max });
        }
        if step <= 0.0 {
            return Err(LocomotionError::NonPositiveStep(step));
        }
        if !(min..=max).contains(&initial) {
            return Err(LocomotionError::InitialSpeedOutOfRange { initial, min, max });
        }

        Ok(Self {
            value: initial,
            min,
            max,
            step,
        })
    }

    /// Raises the speed by one step, saturating at `max`.
    pub fn increase(&mut self) {
        self.value = (self.value + self.step).min(self.max);
    }

    /// Lowers the speed by one step, saturating at `min`.
    pub fn decrease(&mut self) {
        self.value = (self.value - self.step).max(self.min);
    }

    /// Current speed in km/h.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current speed in m/s.
    #[must_use]
    pub fn speed_mps(&self) -> f32 {
        self.value / KMH_PER_MPS
    }

    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }
}
