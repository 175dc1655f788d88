//! Boss transition screen
//!
//! Shown for a fixed time before a run of boss questions starts. The screen
//! itself only needs to know whether it has already signalled completion.

use serde::{Deserialize, Serialize};

use crate::latch::Latch;

/// State of a boss transition screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossTransition {
    done: Latch,
}

impl BossTransition {
    /// Creates a transition that has not completed yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals that the display time has elapsed
    ///
    /// # Returns
    ///
    /// `true` only on the first call
    pub fn complete(&mut self) -> bool {
        self.done.fire()
    }

    /// Whether completion has already been signalled
    pub fn is_complete(&self) -> bool {
        self.done.is_fired()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_completes_once() {
        let mut transition = BossTransition::new();
        assert!(!transition.is_complete());
        assert!(transition.complete());
        assert!(transition.is_complete());
        assert!(!transition.complete());
    }
}
