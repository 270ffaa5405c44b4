//! Top-level configuration with RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strider_input::{Axis, Control, SimulatorBindings, TrackedObject};

use crate::error::ConfigError;
use crate::locomotion::LocomotionConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The technique to arm.
    pub locomotion: LocomotionConfig,
    /// Headless simulator settings.
    pub simulator: SimulatorConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// A scripted button transition at a given simulation tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScriptedPress {
    /// Zero-based tick the transition is delivered on.
    pub tick: u64,
    /// The control that changes.
    pub control: Control,
    /// `true` for press, `false` for release.
    pub pressed: bool,
}

/// How a scripted tracked object moves over time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DriverKind {
    /// Fixed pose.
    Static {
        position: [f32; 3],
        forward: [f32; 3],
    },
    /// Sinusoidal motion along one axis around `center`.
    Oscillate {
        center: [f32; 3],
        forward: [f32; 3],
        axis: Axis,
        amplitude_m: f32,
        frequency_hz: f32,
    },
    /// Constant-velocity motion from `origin`.
    Linear {
        origin: [f32; 3],
        forward: [f32; 3],
        velocity_mps: [f32; 3],
    },
}

/// Binds a motion driver to a tracked object.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PoseDriverConfig {
    /// Which object the driver moves.
    pub object: TrackedObject,
    /// How it moves.
    pub driver: DriverKind,
}

/// Headless simulator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Host frame rate the simulator ticks at.
    pub tick_rate_hz: u32,
    /// Length of a session in seconds.
    pub duration_s: f32,
    /// Keyboard stand-ins for controller buttons.
    pub key_bindings: SimulatorBindings,
    /// Button timeline.
    pub presses: Vec<ScriptedPress>,
    /// Tracked object motion.
    pub drivers: Vec<PoseDriverConfig>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        const FORWARD: [f32; 3] = [0.0, 0.0, -1.0];
        Self {
            tick_rate_hz: 90,
            duration_s: 10.0,
            key_bindings: SimulatorBindings::default(),
            presses: vec![
                ScriptedPress {
                    tick: 90,
                    control: Control::RIGHT_TRIGGER,
                    pressed: true,
                },
                ScriptedPress {
                    tick: 540,
                    control: Control::RIGHT_TRIGGER,
                    pressed: false,
                },
            ],
            drivers: vec![
                PoseDriverConfig {
                    object: TrackedObject::Head,
                    driver: DriverKind::Static {
                        position: [0.0, 1.7, 0.0],
                        forward: FORWARD,
                    },
                },
                PoseDriverConfig {
                    object: TrackedObject::LeftHand,
                    driver: DriverKind::Static {
                        position: [-0.25, 1.2, -0.3],
                        forward: FORWARD,
                    },
                },
                PoseDriverConfig {
                    object: TrackedObject::RightHand,
                    driver: DriverKind::Oscillate {
                        center: [0.25, 1.2, -0.3],
                        forward: FORWARD,
                        axis: Axis::Z,
                        amplitude_m: 0.15,
                        frequency_hz: 1.0,
                    },
                },
            ],
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter override (e.g. "debug", "info,strider_locomotion=trace").
    pub log_level: String,
    /// Also write a JSON log file in debug builds.
    pub log_to_file: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

const CONFIG_FILE: &str = "config.ron";

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized)
            .map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    ///
    /// A running controller is not rebuilt by this; the host decides when to
    /// re-arm a technique with the new settings.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = std::fs::read_to_string(config_dir.join(CONFIG_FILE))
            .map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
