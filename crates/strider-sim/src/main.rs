//! The `strider-sim` binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use strider_config::{CliArgs, Config};
use strider_sim::{Session, SimError};
use tracing::{error, info};

const APP_NAME: &str = "strider";

fn config_dir(args: &CliArgs) -> Result<PathBuf, SimError> {
    if let Some(dir) = &args.config {
        return Ok(dir.clone());
    }
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(SimError::NoConfigDir)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match config_dir(&args) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = args
        .log_dir
        .clone()
        .unwrap_or_else(|| config_dir.join("logs"));
    strider_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match Session::run(&config) {
        Ok(report) => {
            info!(
                technique = report.technique,
                ticks = report.ticks,
                moving_ticks = report.moving_ticks,
                degenerate_ticks = report.degenerate_ticks,
                distance_m = report.distance,
                final_position = %report.final_position,
                "report"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
