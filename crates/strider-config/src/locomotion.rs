//! Locomotion technique settings and the built-in technique presets.
//!
//! These are plain data. Range checks happen when a controller is built from
//! them, so a config file can hold values a technique later rejects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strider_input::{Axis, Button, Control, Hand, TrackedObject};

use crate::error::ConfigError;

/// The named locomotion techniques shipped as presets.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum TechniqueKind {
    /// Move along the actor's forward axis while the trigger is held.
    Walk,
    /// Like [`Walk`](Self::Walk), but each trigger release starts or stops movement.
    WalkSteady,
    /// Move along the vector between two tracked objects, in all three axes.
    DifferenceFly,
    /// Like [`DifferenceFly`](Self::DifferenceFly), constrained to the ground plane.
    DifferenceWalk,
    /// Walking-in-place driven by a swinging hand's horizontal motion.
    ArmSwinging,
    /// Walking-in-place driven by a tracked object's vertical motion.
    ConstantSpeedWalkingInPlace,
}

impl TechniqueKind {
    /// All presets, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Walk,
        Self::WalkSteady,
        Self::DifferenceFly,
        Self::DifferenceWalk,
        Self::ArmSwinging,
        Self::ConstantSpeedWalkingInPlace,
    ];

    /// Kebab-case name used on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::WalkSteady => "walk-steady",
            Self::DifferenceFly => "difference-fly",
            Self::DifferenceWalk => "difference-walk",
            Self::ArmSwinging => "arm-swinging",
            Self::ConstantSpeedWalkingInPlace => "constant-speed-wip",
        }
    }
}

impl fmt::Display for TechniqueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TechniqueKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownTechnique(s.to_string()))
    }
}

/// Whether a two-point direction keeps its vertical component.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Plane {
    /// Full 3D direction.
    Fly,
    /// Vertical component removed before normalizing.
    Walk,
}

/// How often a forward-axis direction is sampled.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ForwardUpdate {
    /// Re-read the actor's forward axis every tick.
    EveryTick,
    /// Read it once when the controller is created.
    InitOnly,
}

/// Direction strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DirectionConfig {
    /// Actor's forward axis.
    ForwardVector { update: ForwardUpdate },
    /// `end - start` between two tracked objects.
    TwoPointDifference {
        start: Option<TrackedObject>,
        end: Option<TrackedObject>,
        plane: Plane,
    },
    /// A reference object's forward axis flattened onto the ground plane.
    ProjectedForward { reference: Option<TrackedObject> },
}

/// Trigger strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TriggerConfig {
    /// Move while `control` is held.
    ButtonHeld { control: Option<Control> },
    /// Flip moving on each release of `control`.
    ToggleOnRelease { control: Option<Control> },
    /// Move while two tracked objects are further apart than `threshold` meters.
    DistanceThreshold {
        start: Option<TrackedObject>,
        end: Option<TrackedObject>,
        threshold: f32,
    },
    /// Move while one coordinate of `object` changes faster than `threshold` m/s.
    MotionDerivativeThreshold {
        object: Option<TrackedObject>,
        axis: Axis,
        threshold: f32,
        /// Sample the first difference is taken against.
        initial_sample: f32,
        /// Re-prime the sample when the technique is re-enabled.
        reset_on_enable: bool,
    },
}

/// Velocity ramp settings, all in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Speed when the technique is armed.
    pub initial_kmh: f32,
    /// Lower bound of the ramp.
    pub min_kmh: f32,
    /// Upper bound of the ramp.
    pub max_kmh: f32,
    /// Change per increase/decrease event.
    pub step_kmh: f32,
    /// Control that speeds up on press. `None` disables ramping up.
    pub increase: Option<Control>,
    /// Control that slows down on press. `None` disables ramping down.
    pub decrease: Option<Control>,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            initial_kmh: 5.0,
            min_kmh: 0.0,
            max_kmh: 10.0,
            step_kmh: 0.2,
            increase: Some(Control::new(Hand::Right, Button::PadUp)),
            decrease: Some(Control::new(Hand::Right, Button::PadDown)),
        }
    }
}

impl SpeedConfig {
    /// Walking-in-place ramp: effectively constant, no bound controls.
    #[must_use]
    pub fn in_place(initial_kmh: f32) -> Self {
        Self {
            initial_kmh,
            min_kmh: 0.0,
            max_kmh: 2.0 * initial_kmh,
            step_kmh: 0.001,
            increase: None,
            decrease: None,
        }
    }
}

/// Orientation capability of a technique.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrientationConfig {
    /// The technique never changes the actor's orientation.
    Unsupported,
    /// Euler angles in degrees (pitch, yaw, roll) set before each move.
    Fixed { euler_degrees: [f32; 3] },
    /// Yaw follows a tracked object's horizontal heading.
    FollowYaw { object: Option<TrackedObject> },
}

/// One complete technique: direction + trigger + velocity ramp + orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Preset the remaining fields were derived from.
    pub technique: TechniqueKind,
    /// Direction strategy.
    pub direction: DirectionConfig,
    /// Trigger strategy.
    pub trigger: TriggerConfig,
    /// Velocity ramp.
    pub speed: SpeedConfig,
    /// Orientation capability.
    pub orientation: OrientationConfig,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self::preset(TechniqueKind::Walk)
    }
}

/// Distance between the two-point objects that starts movement, in meters.
pub const TWO_POINT_THRESHOLD_M: f32 = 1.0;
/// Walking-in-place speed, km/h.
pub const IN_PLACE_SPEED_KMH: f32 = 1.0;
/// Signal velocity that counts as swinging, m/s.
pub const IN_PLACE_THRESHOLD_MPS: f32 = 0.05;
/// Derivative sample assumed before the first tick (roughly hand height).
pub const IN_PLACE_INITIAL_SAMPLE: f32 = 1.6;

impl LocomotionConfig {
    /// Builds the settings for a named technique.
    #[must_use]
    pub fn preset(technique: TechniqueKind) -> Self {
        let two_point = |plane| Self {
            technique,
            direction: DirectionConfig::TwoPointDifference {
                start: Some(TrackedObject::LeftHand),
                end: Some(TrackedObject::RightHand),
                plane,
            },
            trigger: TriggerConfig::DistanceThreshold {
                start: Some(TrackedObject::LeftHand),
                end: Some(TrackedObject::RightHand),
                threshold: TWO_POINT_THRESHOLD_M,
            },
            speed: SpeedConfig::default(),
            orientation: OrientationConfig::Unsupported,
        };
        let in_place = |axis| Self {
            technique,
            direction: DirectionConfig::ProjectedForward {
                reference: Some(TrackedObject::Head),
            },
            trigger: TriggerConfig::MotionDerivativeThreshold {
                object: Some(TrackedObject::RightHand),
                axis,
                threshold: IN_PLACE_THRESHOLD_MPS,
                initial_sample: IN_PLACE_INITIAL_SAMPLE,
                reset_on_enable: false,
            },
            speed: SpeedConfig::in_place(IN_PLACE_SPEED_KMH),
            orientation: OrientationConfig::Unsupported,
        };

        match technique {
            TechniqueKind::Walk => Self {
                technique,
                direction: DirectionConfig::ForwardVector {
                    update: ForwardUpdate::EveryTick,
                },
                trigger: TriggerConfig::ButtonHeld {
                    control: Some(Control::RIGHT_TRIGGER),
                },
                speed: SpeedConfig::default(),
                orientation: OrientationConfig::Unsupported,
            },
            TechniqueKind::WalkSteady => Self {
                technique,
                direction: DirectionConfig::ForwardVector {
                    update: ForwardUpdate::EveryTick,
                },
                trigger: TriggerConfig::ToggleOnRelease {
                    control: Some(Control::RIGHT_TRIGGER),
                },
                speed: SpeedConfig::default(),
                orientation: OrientationConfig::Unsupported,
            },
            TechniqueKind::DifferenceFly => two_point(Plane::Fly),
            TechniqueKind::DifferenceWalk => two_point(Plane::Walk),
            TechniqueKind::ArmSwinging => in_place(Axis::Z),
            TechniqueKind::ConstantSpeedWalkingInPlace => in_place(Axis::Y),
        }
    }
}
