//! Movement direction strategies.
//!
//! Every strategy produces either a unit vector or nothing. Inputs whose
//! magnitude is below [`MIN_DIRECTION_LENGTH`] are degenerate: the
//! controller keeps its previous direction and does not move that tick.

use glam::Vec3;
use strider_config::{ForwardUpdate, Plane};
use strider_input::{InputSource, TrackedObject};
use tracing::trace;

use crate::transform::ActorTransform;

/// Shortest vector that is still normalized into a direction.
pub const MIN_DIRECTION_LENGTH: f32 = 1e-6;

/// Normalizes `v`, or `None` if it is too short or not finite.
#[must_use]
pub fn checked_normalize(v: Vec3) -> Option<Vec3> {
    if !v.is_finite() {
        return None;
    }
    let length = v.length();
    (length >= MIN_DIRECTION_LENGTH).then(|| v / length)
}

/// Drops the vertical component.
#[must_use]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Result of a per-tick direction update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectionSample {
    /// A fresh unit direction.
    Valid(Vec3),
    /// The strategy does not update after initialization.
    Unchanged,
    /// No usable direction this tick.
    Degenerate,
}

/// How the movement direction is derived each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DirectionStrategy {
    /// The actor's own forward axis.
    ForwardVector { update: ForwardUpdate },
    /// From `start` towards `end`. [`Plane::Walk`] removes the vertical part
    /// before normalizing.
    TwoPointDifference {
        start: TrackedObject,
        end: TrackedObject,
        plane: Plane,
    },
    /// The forward axis of `reference` flattened onto the ground plane.
    ProjectedForward { reference: TrackedObject },
}

impl DirectionStrategy {
    /// Direction to start with, computed once before the first tick.
    pub fn initialize<I, A>(&self, actor: &A, input: &I) -> Option<Vec3>
    where
        I: InputSource + ?Sized,
        A: ActorTransform + ?Sized,
    {
        self.compute(actor, input)
    }

    /// Per-tick update.
    pub fn update<I, A>(&self, actor: &A, input: &I) -> DirectionSample
    where
        I: InputSource + ?Sized,
        A: ActorTransform + ?Sized,
    {
        if let Self::ForwardVector {
            update: ForwardUpdate::InitOnly,
        } = self
        {
            return DirectionSample::Unchanged;
        }
        match self.compute(actor, input) {
            Some(direction) => DirectionSample::Valid(direction),
            None => {
                trace!(strategy = ?self, "degenerate direction, keeping previous");
                DirectionSample::Degenerate
            }
        }
    }

    fn compute<I, A>(&self, actor: &A, input: &I) -> Option<Vec3>
    where
        I: InputSource + ?Sized,
        A: ActorTransform + ?Sized,
    {
        match *self {
            Self::ForwardVector { .. } => checked_normalize(actor.forward()),
            Self::TwoPointDifference { start, end, plane } => {
                let start = input.tracked_pose(start)?.position;
                let end = input.tracked_pose(end)?.position;
                let difference = end - start;
                match plane {
                    Plane::Fly => checked_normalize(difference),
                    Plane::Walk => checked_normalize(flatten(difference)),
                }
            }
            Self::ProjectedForward { reference } => {
                let forward = input.tracked_pose(reference)?.forward;
                checked_normalize(flatten(forward))
            }
        }
    }
}
