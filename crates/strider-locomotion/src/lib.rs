//! Locomotion core: moves an actor through a virtual world each frame from
//! controller buttons and tracked body poses.
//!
//! A [`LocomotionController`] owns one [`Technique`], a combination of a
//! [`DirectionStrategy`], a [`TriggerStrategy`], a [`VelocityModel`] and an
//! [`OrientationMode`]. The host calls
//! [`on_tick`](LocomotionController::on_tick) once per frame with an
//! [`InputSource`](strider_input::InputSource) snapshot and its
//! [`ActorTransform`].

mod controller;
mod direction;
mod error;
mod orientation;
mod technique;
mod transform;
mod trigger;
mod velocity;

#[cfg(test)]
mod controller_tests;

pub use controller::{LocomotionController, MotionState, TickOutcome};
pub use direction::{
    DirectionSample, DirectionStrategy, MIN_DIRECTION_LENGTH, checked_normalize, flatten,
};
pub use error::LocomotionError;
pub use orientation::OrientationMode;
pub use technique::{SpeedControls, Technique};
pub use transform::{ActorTransform, EulerAngles, Transform};
pub use trigger::{DerivativeStep, DerivativeTrigger, TriggerSample, TriggerStrategy};
pub use velocity::{KMH_PER_MPS, VelocityModel};
