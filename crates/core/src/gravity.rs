//! Gravity timer - decides when the driver should run a soft drop
//!
//! The timer accumulates elapsed milliseconds and reports how many times it
//! fired. It never touches game state itself.

use crate::scoring::drop_interval_ms;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityTimer {
    interval_ms: u32,
    elapsed_ms: u32,
    running: bool,
}

impl GravityTimer {
    /// Running timer with the interval for `level`
    pub fn new(level: u32) -> Self {
        Self {
            interval_ms: drop_interval_ms(level),
            elapsed_ms: 0,
            running: true,
        }
    }

    /// Timer that will not fire until rescheduled
    pub fn stopped(level: u32) -> Self {
        Self {
            running: false,
            ..Self::new(level)
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cancel and restart with a new interval
    pub fn reschedule(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        self.elapsed_ms = 0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    /// Add `elapsed_ms` and return whether the interval elapsed.
    ///
    /// Fires at most once per call; the surplus carries over, capped at one
    /// further interval.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms < self.interval_ms {
            return false;
        }
        self.elapsed_ms = (self.elapsed_ms - self.interval_ms).min(self.interval_ms);
        true
    }
}
