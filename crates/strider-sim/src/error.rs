use strider_config::ConfigError;
use strider_input::TrackedObject;
use strider_locomotion::LocomotionError;

/// Anything that stops a simulator session from starting.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("technique could not be armed: {0}")]
    Locomotion(#[from] LocomotionError),

    #[error("tick rate must be at least 1 Hz")]
    ZeroTickRate,

    #[error("session duration must be a non-negative number of seconds, got {0}")]
    InvalidDuration(f32),

    /// A pose driver was configured with a NaN or infinite number.
    #[error("pose driver for {object:?} has a non-finite {field}")]
    NonFiniteDriver {
        object: TrackedObject,
        field: &'static str,
    },

    #[error("could not determine a configuration directory")]
    NoConfigDir,
}
