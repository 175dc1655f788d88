//! Answer records and the per-attempt answer log

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::question::Question;

/// The participant's answer to one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Identifier of the answered question
    pub question_id: String,
    /// Identifier of the chosen choice
    pub choice: String,
    /// Whether the choice was correct
    pub is_correct: bool,
    /// Whole seconds spent on the question
    pub time_taken: u64,
}

impl AnswerRecord {
    /// Evaluates a choice against a question
    pub fn new(question: &Question, choice: &str, time_taken: u64) -> Self {
        Self {
            question_id: question.id.clone(),
            choice: choice.to_owned(),
            is_correct: question.is_correct(choice),
            time_taken,
        }
    }
}

/// Attempt to record an answer out of sequence
#[derive(Debug, Error, PartialEq, Eq)]
#[error("answer for question {given} recorded while question {expected} is due")]
pub struct OutOfSequence {
    /// Index of the question that is due
    pub expected: usize,
    /// Index the caller tried to answer
    pub given: usize,
}

/// Append-only log of the answers given during one attempt
///
/// Entry `i` always answers question `i`: [`AnswerLog::record`] only accepts
/// the next index, so answers can be neither skipped nor reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnswerLog {
    records: Vec<AnswerRecord>,
}

impl AnswerLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the answer to the question at `index`
    ///
    /// # Errors
    ///
    /// Returns [`OutOfSequence`] unless `index` equals the number of answers
    /// already recorded.
    pub fn record(
        &mut self,
        index: usize,
        question: &Question,
        choice: &str,
        time_taken: u64,
    ) -> Result<&AnswerRecord, OutOfSequence> {
        if index != self.records.len() {
            return Err(OutOfSequence {
                expected: self.records.len(),
                given: index,
            });
        }
        self.records
            .push(AnswerRecord::new(question, choice, time_taken));
        Ok(&self.records[index])
    }

    /// Number of answers recorded
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no answer has been recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of correct answers
    pub fn correct_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_correct).count()
    }

    /// The recorded answers in question order
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    /// Forgets every answer
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::question::{Difficulty, tests::question};

    #[test]
    fn test_record_evaluates_choice() {
        let q = question("q1", 1, Difficulty::Standard);
        let mut log = AnswerLog::new();

        let record = log.record(0, &q, "A", 4).unwrap();
        assert!(record.is_correct);
        assert_eq!(record.question_id, "q1");
        assert_eq!(record.time_taken, 4);

        let q2 = question("q2", 2, Difficulty::Standard);
        assert!(!log.record(1, &q2, "C", 2).unwrap().is_correct);
        assert_eq!(log.correct_count(), 1);
    }

    #[test]
    fn test_record_rejects_out_of_sequence() {
        let q = question("q1", 1, Difficulty::Standard);
        let mut log = AnswerLog::new();

        assert_eq!(
            log.record(1, &q, "A", 0).unwrap_err(),
            OutOfSequence {
                expected: 0,
                given: 1
            }
        );
        log.record(0, &q, "A", 0).unwrap();
        assert!(log.record(0, &q, "A", 0).is_err());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_clear() {
        let q = question("q1", 1, Difficulty::Standard);
        let mut log = AnswerLog::new();
        log.record(0, &q, "B", 0).unwrap();
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.correct_count(), 0);
    }
}
