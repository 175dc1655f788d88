//! Pre-quiz countdown
//!
//! Counts down from a fixed number (3-2-1 by default) one step per alarm
//! and then reports completion exactly once.

use serde::{Deserialize, Serialize};

use crate::latch::Latch;

/// Outcome of advancing the countdown by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Still counting; the number now on screen
    Remaining(u8),
    /// The countdown just finished
    Complete,
    /// The countdown had already finished; nothing to do
    Idle,
}

/// A self-terminating countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u8,
    done: Latch,
}

impl Countdown {
    /// Creates a countdown showing `from`
    pub fn new(from: u8) -> Self {
        Self {
            remaining: from,
            done: Latch::new(),
        }
    }

    /// The number currently shown
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Whether completion has already been reported
    pub fn is_complete(&self) -> bool {
        self.done.is_fired()
    }

    /// Moves the countdown on by one step
    pub fn advance(&mut self) -> Step {
        if self.remaining > 1 {
            self.remaining -= 1;
            Step::Remaining(self.remaining)
        } else {
            self.remaining = 0;
            if self.done.fire() {
                Step::Complete
            } else {
                Step::Idle
            }
        }
    }
}
