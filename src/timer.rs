//! Attempt timer
//!
//! The timer counts whole seconds while it runs. It never moves backwards,
//! and stopping it keeps the last value so the results screen can show it.
//! It does not own a clock: the orchestrator schedules one tick alarm per
//! second and feeds each one to [`Timer::tick`], so drift over long attempts
//! is accepted rather than corrected.

use serde::{Deserialize, Serialize};

/// Elapsed-seconds counter driven by external ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    seconds: u64,
    running: bool,
}

impl Timer {
    /// Creates a stopped timer at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting from the current value
    ///
    /// # Returns
    ///
    /// `true` if the timer was stopped before this call
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.running, true)
    }

    /// Stops counting, keeping the current value
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stops the timer and clears it back to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the timer by one second
    ///
    /// # Returns
    ///
    /// The new value if the timer is running, `None` otherwise
    pub fn tick(&mut self) -> Option<u64> {
        if self.running {
            self.seconds = self.seconds.saturating_add(1);
            Some(self.seconds)
        } else {
            None
        }
    }

    /// Whether the timer is currently counting
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whole seconds counted so far
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    /// The current value as a `mm:ss` clock
    pub fn clock(&self) -> String {
        format_clock(self.seconds)
    }
}

/// Formats a number of seconds as `mm:ss`
///
/// Minutes are not wrapped into hours, so an attempt longer than an hour
/// shows as e.g. `75:02`.
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_only_while_running() {
        let mut timer = Timer::new();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.seconds(), 0);

        assert!(timer.start());
        assert_eq!(timer.tick(), Some(1));
        assert_eq!(timer.tick(), Some(2));
    }

    #[test]
    fn test_stop_retains_value() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();
        timer.tick();
        timer.tick();
        timer.stop();

        assert!(!timer.is_running());
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.seconds(), 3);
    }

    #[test]
    fn test_start_twice_reports_already_running() {
        let mut timer = Timer::new();
        assert!(timer.start());
        assert!(!timer.start());
    }

    #[test]
    fn test_reset() {
        let mut timer = Timer::new();
        timer.start();
        timer.tick();
        timer.reset();

        assert_eq!(timer.seconds(), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(4502), "75:02");
    }
}
