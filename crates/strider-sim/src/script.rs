//! Scripted input: a button timeline plus analytic motion for tracked
//! objects, replayed into an [`InputFrame`] one tick at a time.

use std::f32::consts::TAU;

use glam::Vec3;
use strider_config::{DriverKind, PoseDriverConfig, ScriptedPress, SimulatorConfig};
use strider_input::{
    Axis, InputFrame, RawButtonEvent, RawKeyEvent, SimulatorBindings, TrackedObject, TrackedPose,
};
use tracing::{debug, trace};

use crate::error::SimError;

/// Motion of one tracked object as a function of simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseDriver {
    Static {
        position: Vec3,
        forward: Vec3,
    },
    /// `center + axis * amplitude * sin(2π f t)`.
    Oscillate {
        center: Vec3,
        forward: Vec3,
        axis: Axis,
        amplitude: f32,
        frequency_hz: f32,
    },
    /// `origin + velocity * t`.
    Linear {
        origin: Vec3,
        forward: Vec3,
        velocity: Vec3,
    },
}

impl PoseDriver {
    /// Converts a configured driver, rejecting NaN and infinities.
    ///
    /// # Errors
    ///
    /// [`SimError::NonFiniteDriver`] naming the first bad field.
    pub fn from_config(config: &PoseDriverConfig) -> Result<Self, SimError> {
        let object = config.object;
        let vec = |field: &'static str, v: [f32; 3]| {
            let v = Vec3::from_array(v);
            if v.is_finite() {
                Ok(v)
            } else {
                Err(SimError::NonFiniteDriver { object, field })
            }
        };
        let scalar = |field: &'static str, v: f32| {
            if v.is_finite() {
                Ok(v)
            } else {
                Err(SimError::NonFiniteDriver { object, field })
            }
        };

        Ok(match config.driver {
            DriverKind::Static { position, forward } => Self::Static {
                position: vec("position", position)?,
                forward: vec("forward", forward)?,
            },
            DriverKind::Oscillate {
                center,
                forward,
                axis,
                amplitude_m,
                frequency_hz,
            } => Self::Oscillate {
                center: vec("center", center)?,
                forward: vec("forward", forward)?,
                axis,
                amplitude: scalar("amplitude", amplitude_m)?,
                frequency_hz: scalar("frequency", frequency_hz)?,
            },
            DriverKind::Linear {
                origin,
                forward,
                velocity_mps,
            } => Self::Linear {
                origin: vec("origin", origin)?,
                forward: vec("forward", forward)?,
                velocity: vec("velocity", velocity_mps)?,
            },
        })
    }

    /// Pose at `time` seconds into the session.
    #[must_use]
    pub fn pose_at(&self, time: f32) -> TrackedPose {
        match *self {
            Self::Static { position, forward } => TrackedPose::new(position, forward),
            Self::Oscillate {
                center,
                forward,
                axis,
                amplitude,
                frequency_hz,
            } => {
                let offset = amplitude * (TAU * frequency_hz * time).sin();
                TrackedPose::new(center + axis.unit() * offset, forward)
            }
            Self::Linear {
                origin,
                forward,
                velocity,
            } => TrackedPose::new(origin + velocity * time, forward),
        }
    }
}

/// Replays button transitions and pose drivers into an input frame.
#[derive(Debug, Clone)]
pub struct InputScript {
    presses: Vec<ScriptedPress>,
    next_press: usize,
    drivers: Vec<(TrackedObject, PoseDriver)>,
    bindings: SimulatorBindings,
}

impl InputScript {
    /// Builds a script from the simulator section of the config. Presses are
    /// replayed in tick order; same-tick presses keep their config order.
    ///
    /// # Errors
    ///
    /// Fails if any pose driver holds a non-finite number.
    pub fn from_config(config: &SimulatorConfig) -> Result<Self, SimError> {
        let mut presses = config.presses.clone();
        presses.sort_by_key(|press| press.tick);

        let drivers = config
            .drivers
            .iter()
            .map(|driver| Ok((driver.object, PoseDriver::from_config(driver)?)))
            .collect::<Result<Vec<_>, SimError>>()?;

        Ok(Self {
            presses,
            next_press: 0,
            drivers,
            bindings: config.key_bindings.clone(),
        })
    }

    /// Writes every driven pose at `time` into `frame`.
    pub fn apply_poses(&self, time: f32, frame: &mut InputFrame) {
        for (object, driver) in &self.drivers {
            frame.set_pose(*object, driver.pose_at(time));
        }
    }

    /// Prepares `frame` for `tick`: delivers the button transitions scheduled
    /// for it and samples every driver at `time`.
    ///
    /// Ticks must be visited in increasing order. Presses scheduled for a tick
    /// already passed are delivered late, on the next call.
    pub fn apply(&mut self, tick: u64, time: f32, frame: &mut InputFrame) {
        while let Some(press) = self.presses.get(self.next_press) {
            if press.tick > tick {
                break;
            }
            if press.tick < tick {
                trace!(scheduled = press.tick, tick, "late scripted press");
            }
            debug!(tick, control = %press.control, pressed = press.pressed, "scripted button");
            frame.push_button(if press.pressed {
                RawButtonEvent::pressed(press.control)
            } else {
                RawButtonEvent::released(press.control)
            });
            self.next_press += 1;
        }
        self.apply_poses(time, frame);
    }

    /// Feeds a keyboard event through the simulator bindings. Unbound keys
    /// are ignored; returns whether the key was bound.
    pub fn apply_key(&self, event: RawKeyEvent, frame: &mut InputFrame) -> bool {
        match self.bindings.translate(event) {
            Some(button) => {
                frame.push_button(button);
                true
            }
            None => false,
        }
    }

    /// Presses not delivered yet.
    #[must_use]
    pub fn pending_presses(&self) -> usize {
        self.presses.len() - self.next_press
    }
}
