//! The per-tick locomotion pipeline.
//!
//! [`LocomotionController::on_tick`] runs four stages in a fixed order:
//!
//! 1. **Direction**: the direction strategy samples the actor and input.
//! 2. **Speed**: bound ramp controls step the velocity model, then the speed
//!    is read as `km/h / 3.6`.
//! 3. **Trigger**: the trigger strategy decides whether to move.
//! 4. **Move**: when moving, orientation is applied (if the technique has
//!    one) and the actor is translated by `speed * dt * direction`.
//!
//! Construction runs the matching initializers once, in the order
//! direction, orientation, speed, so the first trigger evaluation already
//! sees a direction.

use glam::Vec3;
use strider_config::LocomotionConfig;
use strider_input::InputSource;
use tracing::{debug, info, trace, warn};

use crate::direction::{DirectionSample, DirectionStrategy};
use crate::error::LocomotionError;
use crate::orientation::OrientationMode;
use crate::technique::{SpeedControls, Technique};
use crate::transform::{ActorTransform, EulerAngles};
use crate::trigger::TriggerStrategy;
use crate::velocity::VelocityModel;

/// What the controller last decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Unit movement direction, or zero before any valid sample.
    pub direction: Vec3,
    /// Orientation applied on moving ticks.
    pub orientation: EulerAngles,
    /// Speed in m/s.
    pub speed: f32,
    /// Whether the last tick moved the actor.
    pub moving: bool,
}

/// Summary of a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// The actor was translated this tick.
    pub moving: bool,
    /// World-space offset applied to the actor.
    pub displacement: Vec3,
    /// The direction strategy had nothing usable this tick.
    pub degenerate_direction: bool,
}

impl TickOutcome {
    const IDLE: Self = Self {
        moving: false,
        displacement: Vec3::ZERO,
        degenerate_direction: false,
    };
}

/// Drives one actor with one technique.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    technique: Technique,
    state: MotionState,
    enabled: bool,
}

impl LocomotionController {
    /// Arms `technique` for `actor`, running the initializers against the
    /// current actor pose and input snapshot.
    pub fn new<I, A>(technique: Technique, actor: &A, input: &I) -> Self
    where
        I: InputSource + ?Sized,
        A: ActorTransform + ?Sized,
    {
        let direction = technique.direction.initialize(actor, input).unwrap_or_else(|| {
            trace!("no initial direction available");
            Vec3::ZERO
        });
        let orientation = technique.orientation.initialize(input);
        let speed = technique.velocity.speed_mps();

        info!(
            technique = technique.label(),
            speed_kmh = technique.velocity.value(),
            "locomotion technique armed"
        );

        Self {
            technique,
            state: MotionState {
                direction,
                orientation,
                speed,
                moving: false,
            },
            enabled: true,
        }
    }

    /// Validates `config` and arms the technique it describes.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found; no controller is
    /// created in that case.
    pub fn from_config<I, A>(
        config: &LocomotionConfig,
        actor: &A,
        input: &I,
    ) -> Result<Self, LocomotionError>
    where
        I: InputSource + ?Sized,
        A: ActorTransform + ?Sized,
    {
        let technique = Technique::from_config(config).inspect_err(|err| {
            warn!(technique = %config.technique, %err, "technique rejected");
        })?;
        Ok(Self::new(technique, actor, input))
    }

    /// Runs one frame of the pipeline. Call exactly once per frame with the
    /// frame's input snapshot and a positive `dt` in seconds.
    ///
    /// A disabled controller, or a `dt` that is not positive and finite,
    /// produces an idle outcome and leaves all state untouched.
    pub fn on_tick<I, A>(&mut self, input: &I, actor: &mut A, dt: f32) -> TickOutcome
    where
        I: InputSource + ?Sized,
        A: ActorTransform + ?Sized,
    {
        if !self.enabled {
            return TickOutcome::IDLE;
        }
        if !(dt > 0.0 && dt.is_finite()) {
            warn!(dt, "tick skipped: dt must be positive and finite");
            return TickOutcome::IDLE;
        }

        // 1. Direction
        let degenerate = match self.technique.direction.update(&*actor, input) {
            DirectionSample::Valid(direction) => {
                self.state.direction = direction;
                false
            }
            DirectionSample::Unchanged => false,
            DirectionSample::Degenerate => true,
        };

        // 2. Speed
        if self
            .technique
            .speed_controls
            .apply(input, &mut self.technique.velocity)
        {
            debug!(speed_kmh = self.technique.velocity.value(), "speed changed");
        }
        self.state.speed = self.technique.velocity.speed_mps();

        // 3. Trigger. Always evaluated so stateful triggers see every tick.
        let triggered = self.technique.trigger.evaluate(input, dt);
        self.state.moving = triggered && !degenerate && self.state.direction != Vec3::ZERO;

        // 4. Move
        let mut displacement = Vec3::ZERO;
        if self.state.moving {
            if self.technique.orientation.is_supported() {
                let orientation = self.update_orientation(input);
                actor.set_orientation(orientation);
            }
            displacement = self.state.speed * dt * self.state.direction;
            actor.translate(displacement);
        }

        TickOutcome {
            moving: self.state.moving,
            displacement,
            degenerate_direction: degenerate,
        }
    }

    /// Recomputes the orientation from the current input.
    ///
    /// # Panics
    ///
    /// Panics if the technique's orientation mode is
    /// [`OrientationMode::Unsupported`]. The tick never calls this for such
    /// techniques; a direct call is a bug in the caller.
    pub fn update_orientation<I>(&mut self, input: &I) -> EulerAngles
    where
        I: InputSource + ?Sized,
    {
        let Some(orientation) = self
            .technique
            .orientation
            .resolve(input, self.state.orientation)
        else {
            panic!(
                "orientation update is not implemented for the `{}` technique",
                self.technique.label()
            );
        };
        self.state.orientation = orientation;
        orientation
    }

    /// Stops reacting to ticks until [`enable`](Self::enable) is called.
    pub fn disable(&mut self) {
        if self.enabled {
            self.enabled = false;
            self.state.moving = false;
            self.technique.trigger.on_disable();
            debug!(technique = self.technique.label(), "locomotion disabled");
        }
    }

    /// Resumes ticking after [`disable`](Self::disable).
    pub fn enable(&mut self) {
        if !self.enabled {
            self.enabled = true;
            self.technique.trigger.on_enable();
            debug!(technique = self.technique.label(), "locomotion enabled");
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    #[must_use]
    pub fn velocity(&self) -> &VelocityModel {
        &self.technique.velocity
    }

    #[must_use]
    pub fn direction_strategy(&self) -> &DirectionStrategy {
        &self.technique.direction
    }

    #[must_use]
    pub fn trigger_strategy(&self) -> &TriggerStrategy {
        &self.technique.trigger
    }

    #[must_use]
    pub fn orientation_mode(&self) -> &OrientationMode {
        &self.technique.orientation
    }

    #[must_use]
    pub fn speed_controls(&self) -> &SpeedControls {
        &self.technique.speed_controls
    }

    /// Preset name, or `"custom"`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.technique.label()
    }
}
