//! Assembling a technique from its parts or from configuration.
//!
//! A technique is one direction strategy, one trigger strategy, one velocity
//! ramp and an orientation mode. [`Technique::from_config`] is where every
//! configuration value is validated; a `Technique` that exists is armable.

use glam::Vec3;
use strider_config::{
    DirectionConfig, LocomotionConfig, OrientationConfig, SpeedConfig, TechniqueKind,
    TriggerConfig,
};
use strider_input::{Control, InputSource};

use crate::direction::DirectionStrategy;
use crate::error::{LocomotionError, require};
use crate::orientation::OrientationMode;
use crate::transform::EulerAngles;
use crate::trigger::{DerivativeTrigger, TriggerStrategy};
use crate::velocity::VelocityModel;

/// Controls that step the velocity ramp when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeedControls {
    /// Press to call [`VelocityModel::increase`].
    pub increase: Option<Control>,
    /// Press to call [`VelocityModel::decrease`].
    pub decrease: Option<Control>,
}

impl SpeedControls {
    /// Applies this tick's presses to `velocity`. Returns `true` if it changed.
    pub fn apply<I>(&self, input: &I, velocity: &mut VelocityModel) -> bool
    where
        I: InputSource + ?Sized,
    {
        let before = velocity.value();
        if self.increase.is_some_and(|c| input.was_pressed_this_tick(c)) {
            velocity.increase();
        }
        if self.decrease.is_some_and(|c| input.was_pressed_this_tick(c)) {
            velocity.decrease();
        }
        velocity.value() != before
    }
}

/// A validated strategy combination, ready to be handed to a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Technique {
    /// Preset this was built from, if any.
    pub kind: Option<TechniqueKind>,
    pub direction: DirectionStrategy,
    pub trigger: TriggerStrategy,
    pub velocity: VelocityModel,
    pub speed_controls: SpeedControls,
    pub orientation: OrientationMode,
}

impl Technique {
    /// Combines strategies into a custom technique with no speed controls and
    /// no orientation support.
    #[must_use]
    pub fn new(
        direction: DirectionStrategy,
        trigger: TriggerStrategy,
        velocity: VelocityModel,
    ) -> Self {
        Self {
            kind: None,
            direction,
            trigger,
            velocity,
            speed_controls: SpeedControls::default(),
            orientation: OrientationMode::Unsupported,
        }
    }

    #[must_use]
    pub fn with_speed_controls(mut self, speed_controls: SpeedControls) -> Self {
        self.speed_controls = speed_controls;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: OrientationMode) -> Self {
        self.orientation = orientation;
        self
    }

    /// Builds a named preset with its stock settings.
    ///
    /// # Errors
    ///
    /// Never fails for the shipped presets; the `Result` mirrors
    /// [`from_config`](Self::from_config).
    pub fn preset(kind: TechniqueKind) -> Result<Self, LocomotionError> {
        Self::from_config(&LocomotionConfig::preset(kind))
    }

    /// Validates `config` and builds the technique it describes.
    ///
    /// # Errors
    ///
    /// Any [`LocomotionError`]: bad speed range or step, non-positive
    /// threshold, unset tracked object or control, non-finite numbers.
    pub fn from_config(config: &LocomotionConfig) -> Result<Self, LocomotionError> {
        Ok(Self {
            kind: Some(config.technique),
            direction: direction_from(&config.direction)?,
            trigger: trigger_from(&config.trigger)?,
            velocity: velocity_from(&config.speed)?,
            speed_controls: SpeedControls {
                increase: config.speed.increase,
                decrease: config.speed.decrease,
            },
            orientation: orientation_from(&config.orientation)?,
        })
    }

    /// Name for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.kind.map_or("custom", TechniqueKind::name)
    }
}

fn direction_from(config: &DirectionConfig) -> Result<DirectionStrategy, LocomotionError> {
    Ok(match *config {
        DirectionConfig::ForwardVector { update } => DirectionStrategy::ForwardVector { update },
        DirectionConfig::TwoPointDifference { start, end, plane } => {
            DirectionStrategy::TwoPointDifference {
                start: require("two-point direction start object", start)?,
                end: require("two-point direction end object", end)?,
                plane,
            }
        }
        DirectionConfig::ProjectedForward { reference } => DirectionStrategy::ProjectedForward {
            reference: require("projected-forward reference object", reference)?,
        },
    })
}

fn trigger_from(config: &TriggerConfig) -> Result<TriggerStrategy, LocomotionError> {
    match *config {
        TriggerConfig::ButtonHeld { control } => Ok(TriggerStrategy::button_held(require(
            "button-held trigger control",
            control,
        )?)),
        TriggerConfig::ToggleOnRelease { control } => Ok(TriggerStrategy::toggle_on_release(
            require("toggle trigger control", control)?,
        )),
        TriggerConfig::DistanceThreshold {
            start,
            end,
            threshold,
        } => TriggerStrategy::distance_threshold(
            require("distance trigger start object", start)?,
            require("distance trigger end object", end)?,
            threshold,
        ),
        TriggerConfig::MotionDerivativeThreshold {
            object,
            axis,
            threshold,
            initial_sample,
            reset_on_enable,
        } => DerivativeTrigger::new(
            require("motion trigger object", object)?,
            axis,
            threshold,
            initial_sample,
            reset_on_enable,
        )
        .map(TriggerStrategy::MotionDerivativeThreshold),
    }
}

fn velocity_from(config: &SpeedConfig) -> Result<VelocityModel, LocomotionError> {
    VelocityModel::new(
        config.initial_kmh,
        config.step_kmh,
        config.min_kmh,
        config.max_kmh,
    )
}

fn orientation_from(config: &OrientationConfig) -> Result<OrientationMode, LocomotionError> {
    Ok(match *config {
        OrientationConfig::Unsupported => OrientationMode::Unsupported,
        OrientationConfig::Fixed { euler_degrees } => {
            if let Some(value) = euler_degrees.into_iter().find(|v| !v.is_finite()) {
                return Err(LocomotionError::NonFiniteValue {
                    field: "fixed orientation",
                    value,
                });
            }
            OrientationMode::Fixed(EulerAngles(Vec3::from_array(euler_degrees)))
        }
        OrientationConfig::FollowYaw { object } => {
            OrientationMode::FollowYaw(require("orientation object", object)?)
        }
    })
}
