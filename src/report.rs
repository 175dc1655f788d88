//! Results summary and downloadable report
//!
//! The summary is computed once from the finished answer log and is the
//! single source for every number shown on the results screen, written to
//! the report, or submitted to the backend.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use enum_map::EnumMap;
use itertools::Itertools;
use serde::Serialize;

use crate::{
    answer::AnswerLog,
    constants,
    identity::ParticipantIdentity,
    question::{Difficulty, QuestionSet},
    timer::format_clock,
};

/// Performance band of a finished attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
pub enum Performance {
    /// 70% or better
    #[display("Excellent!")]
    Excellent,
    /// 50% or better
    #[display("Good Job!")]
    Good,
    /// Below 50%
    #[display("Keep Practicing!")]
    KeepPracticing,
}

impl Performance {
    /// Band for a percentage score
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= constants::performance::EXCELLENT_PERCENTAGE {
            Self::Excellent
        } else if percentage >= constants::performance::GOOD_PERCENTAGE {
            Self::Good
        } else {
            Self::KeepPracticing
        }
    }
}

/// Rounds `100 * correct / total` half up, without going through floats
///
/// A total of zero scores zero.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (correct as u64 * 200 + total as u64) / (total as u64 * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Score, accuracy and time of a finished attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    /// Number of correct answers
    pub correct: usize,
    /// Number of questions in the set
    pub total: usize,
    /// `correct / total` as a rounded percentage
    pub percentage: u32,
    /// Whole seconds the attempt took
    pub elapsed_seconds: u64,
    /// `elapsed_seconds` as `mm:ss`
    pub clock: String,
    /// Performance band
    pub performance: Performance,
    /// Number of questions of each difficulty
    pub breakdown: EnumMap<Difficulty, usize>,
}

impl ResultSummary {
    /// Summarizes an attempt
    pub fn new(answers: &AnswerLog, questions: &QuestionSet, elapsed_seconds: u64) -> Self {
        let correct = answers.correct_count();
        let total = questions.len();
        let percentage = percentage(correct, total);

        Self {
            correct,
            total,
            percentage,
            elapsed_seconds,
            clock: format_clock(elapsed_seconds),
            performance: Performance::from_percentage(percentage),
            breakdown: EnumMap::from_fn(|difficulty| questions.count(difficulty)),
        }
    }

    /// Minutes part of the elapsed time
    pub fn minutes(&self) -> u64 {
        self.elapsed_seconds / 60
    }

    /// Seconds part of the elapsed time
    pub fn seconds(&self) -> u64 {
        self.elapsed_seconds % 60
    }
}

/// Plain-text report of a finished attempt
pub struct Report;

impl Report {
    const RULE: &'static str =
        "------------------------------------------------------------";

    /// Renders the downloadable report document
    ///
    /// # Arguments
    ///
    /// * `summary` - The attempt summary; every number comes from here
    /// * `identity` - The participant the report is for
    /// * `generated_at` - Timestamp printed in the header
    pub fn render(
        summary: &ResultSummary,
        identity: &ParticipantIdentity,
        generated_at: DateTime<Utc>,
    ) -> String {
        let mut doc = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(doc, "QUIZ RESULT SUMMARY");
        let _ = writeln!(doc, "Course {} - Week {}", identity.course_id, identity.week);
        let _ = writeln!(
            doc,
            "Generated on: {}",
            generated_at.format("%m/%d/%Y at %I:%M:%S %p")
        );
        let _ = writeln!(doc);

        let _ = writeln!(doc, "Student Details");
        let _ = writeln!(doc, "{}", Self::RULE);
        let _ = writeln!(doc, "{:<18}{}", "Name:", identity.name);
        let _ = writeln!(doc, "{:<18}{}", "Email:", identity.email);
        if let Some(mobile) = &identity.mobile {
            let _ = writeln!(doc, "{:<18}{mobile}", "Mobile:");
        }
        if let Some(college) = &identity.college {
            let _ = writeln!(doc, "{:<18}{college}", "College:");
        }
        let _ = writeln!(doc);

        let _ = writeln!(doc, "Score: {}%  {}", summary.percentage, summary.performance);
        let _ = writeln!(doc);

        let _ = writeln!(doc, "Quiz Performance");
        let _ = writeln!(doc, "{}", Self::RULE);
        let _ = writeln!(doc, "{:<18}{}", "Total Questions:", summary.total);
        let _ = writeln!(doc, "{:<18}{}", "Correct Answers:", summary.correct);
        let _ = writeln!(doc, "{:<18}{}%", "Accuracy:", summary.percentage);
        let _ = writeln!(
            doc,
            "{:<18}{}m {}s",
            "Time Taken:",
            summary.minutes(),
            summary.seconds()
        );
        let _ = writeln!(doc);

        let _ = writeln!(doc, "Quiz Breakdown");
        let _ = writeln!(doc, "{}", Self::RULE);
        for (difficulty, count) in &summary.breakdown {
            if *count > 0 {
                let _ = writeln!(
                    doc,
                    "  * {difficulty}: {}",
                    pluralizer::pluralize("question", *count as isize, true)
                );
            }
        }
        let _ = writeln!(doc);

        let _ = writeln!(doc, "{}", Self::RULE);
        let _ = writeln!(doc, "Thank you for participating in the quiz!");
        let _ = writeln!(doc, "This document was generated automatically.");

        doc
    }

    /// File name to offer the report download under
    ///
    /// Runs of whitespace in the participant name become single underscores.
    pub fn file_name(identity: &ParticipantIdentity, generated_at: DateTime<Utc>) -> String {
        format!(
            "Quiz_Report_{}_{}.txt",
            identity.name.split_whitespace().join("_"),
            generated_at.timestamp_millis()
        )
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::question::tests::question;
    use chrono::TimeZone;

    fn identity() -> ParticipantIdentity {
        ParticipantIdentity {
            name: "Ada  King Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            mobile: None,
            college: Some("Analytical College".to_string()),
            course_id: "3".to_string(),
            week: "2".to_string(),
        }
    }

    fn set(standard: usize, boss: usize) -> QuestionSet {
        QuestionSet::new(
            (0..standard + boss)
                .map(|i| {
                    let difficulty = if i < standard {
                        Difficulty::Standard
                    } else {
                        Difficulty::Boss
                    };
                    question(&format!("q{i}"), i as i64, difficulty)
                })
                .collect(),
        )
        .unwrap()
    }

    fn answer_all(questions: &QuestionSet, correct: usize) -> AnswerLog {
        let mut log = AnswerLog::new();
        for (i, q) in questions.iter().enumerate() {
            let choice = if i < correct { "A" } else { "B" };
            log.record(i, q, choice, 1).unwrap();
        }
        log
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(15, 15), 100);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(7, 15), 47);
    }

    #[test]
    fn test_performance_bands() {
        assert_eq!(Performance::from_percentage(100), Performance::Excellent);
        assert_eq!(Performance::from_percentage(70), Performance::Excellent);
        assert_eq!(Performance::from_percentage(69), Performance::Good);
        assert_eq!(Performance::from_percentage(50), Performance::Good);
        assert_eq!(Performance::from_percentage(49), Performance::KeepPracticing);
    }

    #[test]
    fn test_summary() {
        let questions = set(8, 7);
        let answers = answer_all(&questions, 12);
        let summary = ResultSummary::new(&answers, &questions, 125);

        assert_eq!(summary.correct, 12);
        assert_eq!(summary.total, 15);
        assert_eq!(summary.percentage, 80);
        assert_eq!(summary.performance, Performance::Excellent);
        assert_eq!(summary.clock, "02:05");
        assert_eq!(summary.minutes(), 2);
        assert_eq!(summary.seconds(), 5);
        assert_eq!(summary.breakdown[Difficulty::Standard], 8);
        assert_eq!(summary.breakdown[Difficulty::Boss], 7);
    }

    #[test]
    fn test_render_matches_summary() {
        let questions = set(8, 7);
        let answers = answer_all(&questions, 9);
        let summary = ResultSummary::new(&answers, &questions, 61);
        let generated_at = Utc.with_ymd_and_hms(2026, 3, 4, 15, 6, 7).unwrap();

        let doc = Report::render(&summary, &identity(), generated_at);

        assert!(doc.contains("Generated on: 03/04/2026 at 03:06:07 PM"));
        assert!(doc.contains("Ada  King Lovelace"));
        assert!(doc.contains("College:          Analytical College"));
        assert!(!doc.contains("Mobile:"));
        assert!(doc.contains("Score: 60%  Good Job!"));
        assert!(doc.contains("Correct Answers:  9"));
        assert!(doc.contains("Total Questions:  15"));
        assert!(doc.contains("Time Taken:       1m 1s"));
        assert!(doc.contains("Standard Round: 8 questions"));
        assert!(doc.contains("Final Boss Round: 7 questions"));
    }

    #[test]
    fn test_render_skips_empty_difficulty() {
        let questions = set(1, 0);
        let answers = answer_all(&questions, 0);
        let summary = ResultSummary::new(&answers, &questions, 0);
        let doc = Report::render(&summary, &identity(), Utc::now());

        assert!(doc.contains("Standard Round: 1 question"));
        assert!(!doc.contains("Final Boss Round"));
        assert!(doc.contains("Keep Practicing!"));
    }

    #[test]
    fn test_file_name() {
        let generated_at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            Report::file_name(&identity(), generated_at),
            "Quiz_Report_Ada_King_Lovelace_1700000000123.txt"
        );
    }
}
