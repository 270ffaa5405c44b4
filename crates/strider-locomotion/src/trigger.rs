//! Trigger strategies: whether the actor moves this tick.

use strider_input::{Axis, Control, InputSource, TrackedObject};
use tracing::{debug, trace};

use crate::error::{LocomotionError, ensure_finite};

/// Backward finite-difference state for a single coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerSample {
    /// Coordinate seen on the previous tick.
    pub last_value: f32,
    /// Signal velocity (units per second) that counts as moving.
    pub threshold: f32,
}

/// Outcome of one finite-difference step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeStep {
    /// Estimated `|Δposition| / dt`; zero when `dt` is not positive or the
    /// sample was being primed.
    pub velocity: f32,
    /// `velocity > threshold`.
    pub moving: bool,
}

/// Walking-in-place trigger: moves while one coordinate of a tracked object
/// changes faster than a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivativeTrigger {
    object: TrackedObject,
    axis: Axis,
    sample: TriggerSample,
    reset_on_enable: bool,
    primed: bool,
}

impl DerivativeTrigger {
    /// Creates the trigger with `initial_sample` as the value the first
    /// difference is taken against.
    ///
    /// # Errors
    ///
    /// Fails if `threshold` is not positive or either number is not finite.
    pub fn new(
        object: TrackedObject,
        axis: Axis,
        threshold: f32,
        initial_sample: f32,
        reset_on_enable: bool,
    ) -> Result<Self, LocomotionError> {
        let threshold = positive_threshold("motion derivative", threshold)?;
        let last_value = ensure_finite("initial derivative sample", initial_sample)?;
        Ok(Self {
            object,
            axis,
            sample: TriggerSample {
                last_value,
                threshold,
            },
            reset_on_enable,
            primed: true,
        })
    }

    /// Feeds one coordinate sample taken `dt` seconds after the previous one.
    ///
    /// `last_value` is updated unconditionally, including when `dt` is not
    /// positive (reported as not moving).
    pub fn step(&mut self, position: f32, dt: f32) -> DerivativeStep {
        let previous = self.sample.last_value;
        self.sample.last_value = position;

        if !self.primed {
            self.primed = true;
            trace!(position, "derivative trigger re-primed");
            return DerivativeStep {
                velocity: 0.0,
                moving: false,
            };
        }
        if !(dt > 0.0) {
            trace!(dt, "non-positive dt, derivative trigger idle");
            return DerivativeStep {
                velocity: 0.0,
                moving: false,
            };
        }

        let velocity = ((position - previous) / dt).abs();
        let moving = velocity > self.sample.threshold;
        if moving {
            debug!(position, signal_velocity = velocity, "motion trigger fired");
        }
        DerivativeStep { velocity, moving }
    }

    /// Current finite-difference state.
    #[must_use]
    pub fn sample(&self) -> TriggerSample {
        self.sample
    }

    #[must_use]
    pub fn object(&self) -> TrackedObject {
        self.object
    }

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    fn on_enable(&mut self) {
        if self.reset_on_enable {
            self.primed = false;
        }
    }
}

/// How a technique decides to move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriggerStrategy {
    /// Moves every tick `control` is held.
    ButtonHeld { control: Control },
    /// Flips between moving and still on each release of `control`.
    ToggleOnRelease { control: Control, moving: bool },
    /// Moves while `start` and `end` are more than `threshold` meters apart.
    DistanceThreshold {
        start: TrackedObject,
        end: TrackedObject,
        threshold: f32,
    },
    /// Moves while a tracked coordinate changes fast enough.
    MotionDerivativeThreshold(DerivativeTrigger),
}

impl TriggerStrategy {
    /// Level trigger on `control`.
    #[must_use]
    pub fn button_held(control: Control) -> Self {
        Self::ButtonHeld { control }
    }

    /// Edge trigger on releases of `control`, starting still.
    #[must_use]
    pub fn toggle_on_release(control: Control) -> Self {
        Self::ToggleOnRelease {
            control,
            moving: false,
        }
    }

    /// Distance trigger between two tracked objects.
    ///
    /// # Errors
    ///
    /// Fails if `threshold` is not a positive finite number.
    pub fn distance_threshold(
        start: TrackedObject,
        end: TrackedObject,
        threshold: f32,
    ) -> Result<Self, LocomotionError> {
        Ok(Self::DistanceThreshold {
            start,
            end,
            threshold: positive_threshold("distance", threshold)?,
        })
    }

    /// Decides whether to move this tick. Called exactly once per tick.
    pub fn evaluate<I>(&mut self, input: &I, dt: f32) -> bool
    where
        I: InputSource + ?Sized,
    {
        match self {
            Self::ButtonHeld { control } => input.is_pressed(*control),
            Self::ToggleOnRelease { control, moving } => {
                if input.was_released_this_tick(*control) {
                    *moving = !*moving;
                    debug!(%control, moving = *moving, "toggle trigger flipped");
                }
                *moving
            }
            Self::DistanceThreshold {
                start,
                end,
                threshold,
            } => {
                let (Some(a), Some(b)) = (input.tracked_pose(*start), input.tracked_pose(*end))
                else {
                    trace!(?start, ?end, "distance trigger lost tracking");
                    return false;
                };
                a.position.distance(b.position) > *threshold
            }
            Self::MotionDerivativeThreshold(trigger) => {
                let Some(pose) = input.tracked_pose(trigger.object) else {
                    trace!(object = ?trigger.object, "motion trigger lost tracking");
                    return false;
                };
                trigger.step(trigger.axis.component(pose.position), dt).moving
            }
        }
    }

    /// Host disabled the technique.
    pub fn on_disable(&mut self) {
        if let Self::ToggleOnRelease { moving, .. } = self {
            *moving = false;
        }
    }

    /// Host re-enabled the technique.
    pub fn on_enable(&mut self) {
        if let Self::MotionDerivativeThreshold(trigger) = self {
            trigger.on_enable();
        }
    }
}

fn positive_threshold(role: &'static str, value: f32) -> Result<f32, LocomotionError> {
    let value = ensure_finite("threshold", value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(LocomotionError::NonPositiveThreshold { role, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use strider_input::{InputFrame, RawButtonEvent, TrackedPose};

    fn wip(reset_on_enable: bool) -> DerivativeTrigger {
        DerivativeTrigger::new(TrackedObject::RightHand, Axis::Y, 0.2, 1.6, reset_on_enable)
            .unwrap()
    }

    #[test]
    fn test_button_held_is_pure_level() {
        let mut trigger = TriggerStrategy::button_held(Control::RIGHT_TRIGGER);
        let mut frame = InputFrame::new();
        assert!(!trigger.evaluate(&frame, 0.1));

        frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
        assert!(trigger.evaluate(&frame, 0.1));
        frame.end_frame();
        assert!(trigger.evaluate(&frame, 0.1));

        frame.push_button(RawButtonEvent::released(Control::RIGHT_TRIGGER));
        assert!(!trigger.evaluate(&frame, 0.1));
    }

    #[test]
    fn test_toggle_flips_exactly_on_release_ticks() {
        let mut trigger = TriggerStrategy::toggle_on_release(Control::RIGHT_TRIGGER);
        let mut frame = InputFrame::new();
        let mut observed = Vec::new();

        for tick in 1..=8 {
            match tick {
                2 | 6 => frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER)),
                3 | 7 => frame.push_button(RawButtonEvent::released(Control::RIGHT_TRIGGER)),
                _ => {}
            }
            observed.push(trigger.evaluate(&frame, 0.1));
            frame.end_frame();
        }

        assert_eq!(
            observed,
            [false, false, true, true, true, true, false, false]
        );
    }

    #[test]
    fn test_toggle_ignores_press_and_hold() {
        let mut trigger = TriggerStrategy::toggle_on_release(Control::RIGHT_TRIGGER);
        let mut frame = InputFrame::new();
        frame.push_button(RawButtonEvent::pressed(Control::RIGHT_TRIGGER));
        for _ in 0..3 {
            assert!(!trigger.evaluate(&frame, 0.1));
            frame.end_frame();
        }
    }

    #[test]
    fn test_toggle_resets_on_disable() {
        let mut trigger = TriggerStrategy::ToggleOnRelease {
            control: Control::RIGHT_TRIGGER,
            moving: true,
        };
        trigger.on_disable();
        assert!(!trigger.evaluate(&InputFrame::new(), 0.1));
    }

    #[test]
    fn test_distance_threshold() {
        let mut trigger =
            TriggerStrategy::distance_threshold(TrackedObject::LeftHand, TrackedObject::RightHand, 1.0)
                .unwrap();
        let mut frame = InputFrame::new();
        frame.set_pose(TrackedObject::LeftHand, TrackedPose::at(Vec3::ZERO));

        frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.0, 0.0, 0.5)));
        assert!(!trigger.evaluate(&frame, 0.1));

        frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.0, 0.0, 1.5)));
        assert!(trigger.evaluate(&frame, 0.1));
    }

    #[test]
    fn test_distance_threshold_without_tracking_is_still() {
        let mut trigger =
            TriggerStrategy::distance_threshold(TrackedObject::LeftHand, TrackedObject::RightHand, 1.0)
                .unwrap();
        let mut frame = InputFrame::new();
        frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.0, 0.0, 9.0)));
        assert!(!trigger.evaluate(&frame, 0.1));
    }

    #[test]
    fn test_non_positive_thresholds_rejected() {
        assert!(matches!(
            TriggerStrategy::distance_threshold(TrackedObject::Head, TrackedObject::LeftHand, 0.0),
            Err(LocomotionError::NonPositiveThreshold { role: "distance", .. })
        ));
        assert!(matches!(
            DerivativeTrigger::new(TrackedObject::Head, Axis::Y, -0.1, 1.6, false),
            Err(LocomotionError::NonPositiveThreshold { .. })
        ));
        assert!(matches!(
            DerivativeTrigger::new(TrackedObject::Head, Axis::Y, 0.1, f32::NAN, false),
            Err(LocomotionError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_derivative_velocities_for_sample_sequence() {
        let mut trigger = wip(false);
        let steps: Vec<_> = [1.6, 1.8].iter().map(|&p| trigger.step(p, 0.1)).collect();

        assert!(steps[0].velocity.abs() < 1e-6);
        assert!(!steps[0].moving);
        assert!((steps[1].velocity - 2.0).abs() < 1e-4);
        assert!(steps[1].moving);
        assert_eq!(trigger.sample().last_value, 1.8);
    }

    #[test]
    fn test_derivative_uses_magnitude() {
        let mut trigger = wip(false);
        let step = trigger.step(1.3, 0.1);
        assert!((step.velocity - 3.0).abs() < 1e-4);
        assert!(step.moving);
    }

    #[test]
    fn test_derivative_zero_dt_guard_still_updates_sample() {
        let mut trigger = wip(false);
        let step = trigger.step(5.0, 0.0);
        assert_eq!(
            step,
            DerivativeStep {
                velocity: 0.0,
                moving: false
            }
        );
        assert_eq!(trigger.sample().last_value, 5.0);
    }

    #[test]
    fn test_derivative_reads_configured_axis() {
        let mut strategy = TriggerStrategy::MotionDerivativeThreshold(
            DerivativeTrigger::new(TrackedObject::RightHand, Axis::Z, 0.05, 0.0, false).unwrap(),
        );
        let mut frame = InputFrame::new();
        frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(9.0, 9.0, 0.0)));
        assert!(!strategy.evaluate(&frame, 0.1));
        frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(9.0, 9.0, 0.1)));
        assert!(strategy.evaluate(&frame, 0.1));
    }

    #[test]
    fn test_derivative_keeps_sample_without_reset() {
        let mut strategy = TriggerStrategy::MotionDerivativeThreshold(wip(false));
        strategy.on_disable();
        strategy.on_enable();
        let mut frame = InputFrame::new();
        frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.0, 1.0, 0.0)));
        // Still differenced against the 1.6 carried over from before disable.
        assert!(strategy.evaluate(&frame, 0.1));
    }

    #[test]
    fn test_derivative_reprimes_on_enable_when_configured() {
        let mut strategy = TriggerStrategy::MotionDerivativeThreshold(wip(true));
        strategy.on_enable();
        let mut frame = InputFrame::new();
        frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.0, 1.0, 0.0)));
        assert!(!strategy.evaluate(&frame, 0.1));
        frame.set_pose(TrackedObject::RightHand, TrackedPose::at(Vec3::new(0.0, 1.1, 0.0)));
        assert!(strategy.evaluate(&frame, 0.1));
    }

    #[test]
    fn test_derivative_lost_tracking_keeps_sample() {
        let mut strategy = TriggerStrategy::MotionDerivativeThreshold(wip(false));
        assert!(!strategy.evaluate(&InputFrame::new(), 0.1));
        let TriggerStrategy::MotionDerivativeThreshold(trigger) = strategy else {
            unreachable!();
        };
        assert_eq!(trigger.sample().last_value, 1.6);
    }
}
