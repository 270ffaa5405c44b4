//! Orientation capability of a technique.

use strider_input::{InputSource, TrackedObject};

use crate::transform::EulerAngles;

/// Whether, and how, a technique re-orients the actor before moving it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OrientationMode {
    /// The technique never touches orientation. Asking it for one is a
    /// programming error.
    #[default]
    Unsupported,
    /// Always applies the same Euler angles.
    Fixed(EulerAngles),
    /// Heading follows a tracked object's horizontal forward axis.
    FollowYaw(TrackedObject),
}

impl OrientationMode {
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Orientation before the first tick.
    pub fn initialize<I>(&self, input: &I) -> EulerAngles
    where
        I: InputSource + ?Sized,
    {
        self.resolve(input, EulerAngles::ZERO)
            .unwrap_or(EulerAngles::ZERO)
    }

    /// Orientation for this tick, or `None` when unsupported.
    ///
    /// `FollowYaw` keeps `previous` while its object is untracked or points
    /// straight up or down.
    pub fn resolve<I>(&self, input: &I, previous: EulerAngles) -> Option<EulerAngles>
    where
        I: InputSource + ?Sized,
    {
        match *self {
            Self::Unsupported => None,
            Self::Fixed(angles) => Some(angles),
            Self::FollowYaw(object) => Some(
                input
                    .tracked_pose(object)
                    .and_then(|pose| EulerAngles::yaw_of(pose.forward))
                    .map_or(previous, EulerAngles::from_yaw),
            ),
        }
    }
}
