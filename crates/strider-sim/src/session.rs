//! A headless run of one technique against a scripted input timeline.

use glam::Vec3;
use strider_config::Config;
use strider_input::InputFrame;
use strider_locomotion::{LocomotionController, Transform};
use tracing::info;

use crate::clock::FixedStepClock;
use crate::error::SimError;
use crate::script::InputScript;

/// What happened during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionReport {
    /// Preset name of the armed technique.
    pub technique: &'static str,
    /// Ticks run.
    pub ticks: u64,
    /// Ticks on which the actor moved.
    pub moving_ticks: u64,
    /// Ticks whose direction sample was unusable.
    pub degenerate_ticks: u64,
    /// Path length travelled, in meters.
    pub distance: f32,
    /// Where the actor ended up.
    pub final_position: Vec3,
}

/// Controller, actor and scripted input advanced together on a fixed clock.
pub struct Session {
    clock: FixedStepClock,
    controller: LocomotionController,
    actor: Transform,
    frame: InputFrame,
    script: InputScript,
    total_ticks: u64,
    report: SessionReport,
}

impl Session {
    /// Arms the configured technique against the script's poses at time zero.
    ///
    /// # Errors
    ///
    /// Fails on a zero tick rate, a negative or non-finite duration, a bad
    /// pose driver, or a technique that does not validate.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        let sim = &config.simulator;
        if sim.tick_rate_hz == 0 {
            return Err(SimError::ZeroTickRate);
        }
        if !sim.duration_s.is_finite() || sim.duration_s < 0.0 {
            return Err(SimError::InvalidDuration(sim.duration_s));
        }
        let total_ticks = (f64::from(sim.duration_s) * f64::from(sim.tick_rate_hz)).round() as u64;

        let script = InputScript::from_config(sim)?;
        let mut frame = InputFrame::new();
        script.apply_poses(0.0, &mut frame);

        let actor = Transform::default();
        let controller = LocomotionController::from_config(&config.locomotion, &actor, &frame)?;

        info!(
            technique = controller.label(),
            tick_rate_hz = sim.tick_rate_hz,
            ticks = total_ticks,
            "session ready"
        );

        Ok(Self {
            clock: FixedStepClock::new(sim.tick_rate_hz),
            report: SessionReport {
                technique: controller.label(),
                ticks: 0,
                moving_ticks: 0,
                degenerate_ticks: 0,
                distance: 0.0,
                final_position: actor.position,
            },
            controller,
            actor,
            frame,
            script,
            total_ticks,
        })
    }

    /// Builds a session from `config` and runs it to the end.
    ///
    /// # Errors
    ///
    /// See [`Session::new`].
    pub fn run(config: &Config) -> Result<SessionReport, SimError> {
        Ok(Self::new(config)?.run_to_end())
    }

    /// Feeds one host frame of `frame_time` seconds and runs the ticks that
    /// fit, stopping at the configured duration. Returns the ticks run.
    pub fn advance(&mut self, frame_time: f64) -> u32 {
        let Self {
            clock,
            controller,
            actor,
            frame,
            script,
            total_ticks,
            report,
        } = self;
        let remaining = total_ticks.saturating_sub(clock.tick_count());
        let frame_time = frame_time.min(remaining as f64 * clock.step());

        clock.advance(frame_time, |dt, sim_time, tick| {
            script.apply(tick, sim_time as f32, frame);
            let outcome = controller.on_tick(&*frame, actor, dt as f32);
            frame.end_frame();

            report.ticks += 1;
            if outcome.moving {
                report.moving_ticks += 1;
                report.distance += outcome.displacement.length();
            }
            if outcome.degenerate_direction {
                report.degenerate_ticks += 1;
            }
        })
    }

    /// Runs the remaining ticks at one tick per host frame.
    #[must_use]
    pub fn run_to_end(mut self) -> SessionReport {
        while !self.is_finished() {
            if self.advance(self.clock.step()) == 0 {
                break;
            }
        }
        let report = self.report();
        info!(
            technique = report.technique,
            ticks = report.ticks,
            moving_ticks = report.moving_ticks,
            distance_m = report.distance,
            "session finished"
        );
        report
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.clock.tick_count() >= self.total_ticks
    }

    /// Report so far.
    #[must_use]
    pub fn report(&self) -> SessionReport {
        SessionReport {
            final_position: self.actor.position,
            ..self.report
        }
    }

    #[must_use]
    pub fn controller(&self) -> &LocomotionController {
        &self.controller
    }

    #[must_use]
    pub fn controller_mut(&mut self) -> &mut LocomotionController {
        &mut self.controller
    }
}
