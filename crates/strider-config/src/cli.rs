//! Command-line argument parsing for the simulator.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;
use crate::locomotion::{LocomotionConfig, TechniqueKind};

/// Strider command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "strider-sim", about = "Headless locomotion simulator")]
pub struct CliArgs {
    /// Technique preset to arm (walk, walk-steady, difference-fly,
    /// difference-walk, arm-swinging, constant-speed-wip). Replaces the
    /// whole locomotion section.
    #[arg(long)]
    pub technique: Option<TechniqueKind>,

    /// Session length in seconds.
    #[arg(long)]
    pub duration: Option<f32>,

    /// Simulated host frame rate.
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for the JSON log file (debug builds only).
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(kind) = args.technique {
            self.locomotion = LocomotionConfig::preset(kind);
        }
        if let Some(duration) = args.duration {
            self.simulator.duration_s = duration;
        }
        if let Some(rate) = args.tick_rate {
            self.simulator.tick_rate_hz = rate;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
