//! Fixed timestep accumulator for drivers
//!
//! Frame time goes in, a whole number of simulation steps comes out.

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;

#[derive(Debug, Clone)]
pub struct TickClock {
    step: Duration,
    accumulator: Duration,
}

impl TickClock {
    /// Clock producing `rate_hz` steps per second; a rate of 0 is clamped to 1
    pub fn new(rate_hz: u32) -> Self {
        Self {
            step: Duration::from_secs(1) / rate_hz.max(1),
            accumulator: Duration::ZERO,
        }
    }

    /// Length of one step
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Add elapsed frame time and return how many steps to run now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Drop backlog we refused to simulate (e.g. after a long stall)
        if steps == MAX_SUBSTEPS && self.accumulator >= self.step {
            log::debug!("Tick clock dropping {:?} of backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        steps
    }

    /// Time left until the next step is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
