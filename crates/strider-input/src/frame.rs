//! The read-only input snapshot a locomotion tick consumes.

use crate::buttons::{ButtonState, RawButtonEvent};
use crate::control::Control;
use crate::tracking::{PoseTable, TrackedObject, TrackedPose};

/// Synchronous, frame-snapshot queries the locomotion core needs from the host.
///
/// Implementations must return the same answers for the whole frame; the
/// core never polls hardware.
pub trait InputSource {
    /// `true` while `control` is held.
    fn is_pressed(&self, control: Control) -> bool;

    /// `true` only on the frame `control` went down.
    fn was_pressed_this_tick(&self, control: Control) -> bool;

    /// `true` only on the frame `control` went up.
    fn was_released_this_tick(&self, control: Control) -> bool;

    /// Pose of `object` this frame, or `None` if it is not tracked.
    fn tracked_pose(&self, object: TrackedObject) -> Option<TrackedPose>;
}

/// Button state plus tracked poses for one frame.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Controller buttons.
    pub buttons: ButtonState,
    /// Tracked object poses.
    pub poses: PoseTable,
}

impl InputFrame {
    /// Creates an empty frame: nothing pressed, nothing tracked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a button transition.
    pub fn push_button(&mut self, event: RawButtonEvent) {
        self.buttons.process(event);
    }

    /// Records a tracked pose.
    pub fn set_pose(&mut self, object: TrackedObject, pose: TrackedPose) {
        self.poses.set(object, pose);
    }

    /// Ends the frame: clears button edges, keeps levels and poses.
    pub fn end_frame(&mut self) {
        self.buttons.clear_transients();
    }
}

impl InputSource for InputFrame {
    fn is_pressed(&self, control: Control) -> bool {
        self.buttons.is_pressed(control)
    }

    fn was_pressed_this_tick(&self, control: Control) -> bool {
        self.buttons.just_pressed(control)
    }

    fn was_released_this_tick(&self, control: Control) -> bool {
        self.buttons.just_released(control)
    }

    fn tracked_pose(&self, object: TrackedObject) -> Option<TrackedPose> {
        self.poses.get(object)
    }
}
