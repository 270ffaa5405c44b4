//! The actor the controller moves, and orientation as Euler angles.

use glam::{EulerRot, Quat, Vec3};

/// Orientation as Euler angles in degrees: `x` pitch, `y` yaw, `z` roll.
///
/// Applied yaw first, then pitch, then roll, which keeps yaw a pure heading
/// around world up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles(pub Vec3);

impl EulerAngles {
    /// No rotation.
    pub const ZERO: Self = Self(Vec3::ZERO);

    /// Builds angles from pitch, yaw and roll in degrees.
    #[must_use]
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self(Vec3::new(pitch, yaw, roll))
    }

    /// A pure heading change of `yaw` degrees.
    #[must_use]
    pub fn from_yaw(yaw: f32) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// Heading (in degrees) of a horizontal direction, measured so that
    /// `-Z` is 0° and `-X` is +90°. `None` if `forward` has no horizontal
    /// extent.
    #[must_use]
    pub fn yaw_of(forward: Vec3) -> Option<f32> {
        let flat = Vec3::new(forward.x, 0.0, forward.z);
        if !flat.is_finite() || flat.length_squared() < 1e-12 {
            return None;
        }
        Some((-flat.x).atan2(-flat.z).to_degrees())
    }

    #[must_use]
    pub fn pitch(self) -> f32 {
        self.0.x
    }

    #[must_use]
    pub fn yaw(self) -> f32 {
        self.0.y
    }

    #[must_use]
    pub fn roll(self) -> f32 {
        self.0.z
    }

    /// Converts to a rotation quaternion.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw().to_radians(),
            self.pitch().to_radians(),
            self.roll().to_radians(),
        )
    }
}

/// Mutable view of the actor being moved.
///
/// Implemented by the host's scene node. Forward is `-Z` in the actor's
/// local frame, up is `+Y` in world space.
pub trait ActorTransform {
    /// Moves the actor by a world-space offset.
    fn translate(&mut self, offset: Vec3);

    /// Replaces the actor's orientation.
    fn set_orientation(&mut self, orientation: EulerAngles);

    /// World-space position.
    fn position(&self) -> Vec3;

    /// World-space forward axis (unit length).
    fn forward(&self) -> Vec3;
}

/// Plain position + rotation actor, usable by hosts without a scene graph
/// and by tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// World-space position in meters.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// An unrotated actor at `position`.
    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// An actor at `position` facing the given Euler angles.
    #[must_use]
    pub fn new(position: Vec3, orientation: EulerAngles) -> Self {
        Self {
            position,
            rotation: orientation.to_quat(),
        }
    }
}

impl ActorTransform for Transform {
    fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    fn set_orientation(&mut self, orientation: EulerAngles) {
        self.rotation = orientation.to_quat();
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}
