//! One-shot latches
//!
//! A latch guards side effects that must happen at most once, such as
//! writing the participant-access record or submitting a finished attempt,
//! no matter how many times the surrounding view re-renders.

use serde::{Deserialize, Serialize};

/// A boolean that can be fired exactly once until it is reset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Latch {
    fired: bool,
}

impl Latch {
    /// Creates an unfired latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the latch
    ///
    /// # Returns
    ///
    /// `true` the first time it is called, `false` on every later call
    /// until [`Latch::reset`] is called.
    pub fn fire(&mut self) -> bool {
        !std::mem::replace(&mut self.fired, true)
    }

    /// Whether the latch has already fired
    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Re-arms the latch
    pub fn reset(&mut self) {
        self.fired = false;
    }
}
