//! Fixed-step host clock.
//!
//! Frame times go into an accumulator and come out as whole ticks of a fixed
//! length, so the locomotion controller always sees the same `dt` however
//! uneven the host frames are.

use tracing::warn;

/// Default tick rate, a common headset refresh rate.
pub const DEFAULT_TICK_RATE_HZ: u32 = 90;

/// Longest frame fed into the accumulator, in seconds. Longer frames are
/// clamped and the simulation slows down instead of catching up.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator turning variable frame times into fixed ticks.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    step: f64,
    accumulator: f64,
    total_sim_time: f64,
    tick_count: u64,
}

impl FixedStepClock {
    /// A clock ticking `tick_rate_hz` times per simulated second.
    ///
    /// A rate of zero is treated as one tick per second.
    #[must_use]
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            step: 1.0 / f64::from(tick_rate_hz.max(1)),
            accumulator: 0.0,
            total_sim_time: 0.0,
            tick_count: 0,
        }
    }

    /// Feeds one host frame of `frame_time` seconds and runs `on_step(dt,
    /// sim_time, tick)` once per whole tick that fits. `sim_time` is the time
    /// at the start of the tick and `tick` its zero-based index.
    ///
    /// Returns the number of ticks run.
    pub fn advance(&mut self, frame_time: f64, mut on_step: impl FnMut(f64, f64, u64)) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.step {
            on_step(self.step, self.total_sim_time, self.tick_count);
            self.total_sim_time += self.step;
            self.accumulator -= self.step;
            self.tick_count += 1;
            steps += 1;
        }
        steps
    }

    /// Tick length in seconds.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated seconds covered by the ticks run so far.
    #[must_use]
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE_HZ)
    }
}
