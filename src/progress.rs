//! Progress indicator
//!
//! A pure description of how far through the question set the participant
//! is. It keeps no state of its own; the orchestrator builds a fresh one for
//! every question it shows.

use serde::Serialize;

use crate::question::Difficulty;

/// Proportional progress through the question set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// 1-based position of the current question
    pub position: usize,
    /// Total number of questions
    pub total: usize,
    /// Difficulty of the current question, for colouring the bar
    pub phase: Difficulty,
    /// Fill fraction in `[0, 1]`
    pub fill: f64,
}

impl Progress {
    /// Computes the progress for a position in a set of `total` questions
    ///
    /// A `total` of zero yields an empty bar, and a position past the end is
    /// clamped to a full one.
    pub fn new(position: usize, total: usize, phase: Difficulty) -> Self {
        let fill = if total == 0 {
            0.
        } else {
            (position as f64 / total as f64).clamp(0., 1.)
        };

        Self {
            position,
            total,
            phase,
            fill,
        }
    }

    /// The fill as a whole percentage
    pub fn percent(&self) -> u8 {
        (self.fill * 100.).round() as u8
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_fill_proportional() {
        let progress = Progress::new(3, 12, Difficulty::Standard);
        assert!((progress.fill - 0.25).abs() < f64::EPSILON);
        assert_eq!(progress.percent(), 25);
    }

    #[test]
    fn test_zero_total() {
        let progress = Progress::new(0, 0, Difficulty::Standard);
        assert!(progress.fill.abs() < f64::EPSILON);
        assert_eq!(progress.percent(), 0);

        let progress = Progress::new(4, 0, Difficulty::Boss);
        assert_eq!(progress.percent(), 0);
    }

    #[test]
    fn test_clamped_past_end() {
        let progress = Progress::new(20, 15, Difficulty::Boss);
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_rounding() {
        assert_eq!(Progress::new(1, 3, Difficulty::Standard).percent(), 33);
        assert_eq!(Progress::new(2, 3, Difficulty::Standard).percent(), 67);
        assert_eq!(Progress::new(15, 15, Difficulty::Boss).percent(), 100);
    }
}
