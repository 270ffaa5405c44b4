//! Poses of tracked physical objects (head, controllers, trackers).

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A tracked physical object whose pose the host samples each frame.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum TrackedObject {
    /// Head-mounted display.
    Head,
    /// Left-hand controller.
    LeftHand,
    /// Right-hand controller.
    RightHand,
    /// Any additional tracker, identified by the host.
    Tracker(u32),
}

/// World-space pose snapshot of a tracked object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPose {
    /// Position in meters.
    pub position: Vec3,
    /// Forward axis of the object. Not required to be normalized.
    pub forward: Vec3,
}

impl TrackedPose {
    /// Creates a pose from a position and a forward axis.
    #[must_use]
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    /// A pose at `position` facing `-Z`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::NEG_Z)
    }
}

/// A single world coordinate axis.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal, right.
    X,
    /// Vertical, up.
    Y,
    /// Horizontal, back.
    Z,
}

impl Axis {
    /// Extracts this axis' component from `v`.
    #[must_use]
    pub fn component(self, v: Vec3) -> f32 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }

    /// Unit vector along this axis.
    #[must_use]
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }
}

/// Per-frame table of tracked poses.
///
/// Objects the host did not report this frame are simply absent.
#[derive(Debug, Clone, Default)]
pub struct PoseTable {
    poses: HashMap<TrackedObject, TrackedPose>,
}

impl PoseTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the pose of `object`, replacing any earlier sample.
    pub fn set(&mut self, object: TrackedObject, pose: TrackedPose) {
        self.poses.insert(object, pose);
    }

    /// Forgets `object` (e.g. tracking was lost).
    pub fn remove(&mut self, object: TrackedObject) {
        self.poses.remove(&object);
    }

    /// Looks up the last pose recorded for `object`.
    #[must_use]
    pub fn get(&self, object: TrackedObject) -> Option<TrackedPose> {
        self.poses.get(&object).copied()
    }
}
