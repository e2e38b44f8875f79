//! Simulation domain: fixed-timestep accumulator.

use std::time::Duration;

use bevy::prelude::*;

use crate::content::SimulationDefaults;

/// Accumulates render-tick time and hands it out in whole fixed steps.
///
/// The clock also owns simulation time: it only moves forward when a step is
/// taken, so every timestamp in the combat core (attack expiry, debounce,
/// end-lag) is measured in simulated seconds.
#[derive(Resource, Debug, Clone)]
pub struct StepClock {
    step: Duration,
    max_frame_time: Duration,
    accumulator: Duration,
    time: Time,
    steps_taken: u64,
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(
            Duration::from_secs_f32(1.0 / 60.0),
            Duration::from_millis(100),
        )
    }
}

impl StepClock {
    pub fn new(step: Duration, max_frame_time: Duration) -> Self {
        Self {
            step,
            max_frame_time,
            accumulator: Duration::ZERO,
            time: Time::default(),
            steps_taken: 0,
        }
    }

    pub fn from_defaults(defaults: &SimulationDefaults) -> Self {
        Self::new(
            Duration::from_secs_f32(defaults.time_step),
            Duration::from_secs_f32(defaults.max_frame_time),
        )
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn max_frame_time(&self) -> Duration {
        self.max_frame_time
    }

    /// Time carried over to the next tick.
    pub fn remainder(&self) -> Duration {
        self.accumulator
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Simulated seconds since the battle started.
    pub fn elapsed_secs(&self) -> f64 {
        self.time.elapsed_secs_f64()
    }

    /// Add one render tick's worth of time and return how many whole steps
    /// are now due. The tick is clamped to `max_frame_time` first so a stall
    /// cannot trigger a runaway catch-up.
    pub fn accumulate(&mut self, delta: Duration) -> u32 {
        self.accumulator += delta.min(self.max_frame_time);

        let mut due = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            due += 1;
        }
        due
    }

    /// Move simulation time forward by one step and return the clock to
    /// expose as the generic [`Time`] while that step runs.
    pub fn advance(&mut self) -> Time {
        self.time.advance_by(self.step);
        self.steps_taken += 1;
        self.time.as_generic()
    }
}
