//! Configuration system for Strider.
//!
//! Settings persist to disk as `config.ron`: the armed locomotion technique,
//! the headless simulator script, and debug options. Supports CLI overrides
//! via clap, hot-reload detection, and forward/backward compatible
//! serialization.

mod cli;
mod config;
mod error;
mod locomotion;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, DriverKind, PoseDriverConfig, ScriptedPress, SimulatorConfig,
};
pub use error::ConfigError;
pub use locomotion::{
    DirectionConfig, ForwardUpdate, IN_PLACE_INITIAL_SAMPLE, IN_PLACE_SPEED_KMH,
    IN_PLACE_THRESHOLD_MPS, LocomotionConfig, OrientationConfig, Plane, SpeedConfig,
    TWO_POINT_THRESHOLD_M, TechniqueKind, TriggerConfig,
};
