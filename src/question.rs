//! Questions and question sets
//!
//! A question is a prompt with a handful of labeled choices and the
//! identifier of the correct one. Questions arrive from the repository as a
//! flat list; [`QuestionSet`] is the validated, ordered form the
//! orchestrator works with, and it is never empty.

use enum_map::Enum;
use garde::Validate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// Difficulty tag of a question
///
/// Boss questions get their own screen treatment and a transition screen
/// before a run of them starts.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Enum,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Regular question
    #[default]
    #[display("Standard Round")]
    Standard,
    /// Elevated difficulty question
    #[display("Final Boss Round")]
    Boss,
}

impl Difficulty {
    /// Maps a backend difficulty tag onto a difficulty
    ///
    /// Only `boss` (case-insensitive) is a boss question; anything else,
    /// including a missing tag, is standard.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(tag) if tag.trim().eq_ignore_ascii_case("boss") => Self::Boss,
            _ => Self::Standard,
        }
    }
}

/// One selectable option of a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Choice {
    /// Identifier submitted when this choice is picked (e.g. `A`)
    #[garde(length(min = 1))]
    pub id: String,
    /// Text shown to the participant
    #[garde(length(max = constants::question::MAX_CHOICE_LENGTH))]
    pub text: String,
}

/// A single multiple choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Question {
    /// Backend identifier of the question
    #[garde(length(min = 1))]
    pub id: String,
    /// The question text
    #[garde(length(
        min = constants::question::MIN_PROMPT_LENGTH,
        max = constants::question::MAX_PROMPT_LENGTH
    ))]
    pub prompt: String,
    /// The available choices, in display order
    #[garde(
        length(
            min = constants::question::MIN_CHOICE_COUNT,
            max = constants::question::MAX_CHOICE_COUNT
        ),
        dive
    )]
    pub choices: Vec<Choice>,
    /// Identifier of the correct choice
    #[garde(skip)]
    pub correct_choice: String,
    /// Difficulty tag
    #[garde(skip)]
    pub difficulty: Difficulty,
    /// Ordering key, ascending
    #[garde(skip)]
    pub order: i64,
}

impl Question {
    /// Checks a submitted choice against the correct one
    ///
    /// The comparison is an exact, case-sensitive match.
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_choice
    }

    /// Whether the given identifier names one of this question's choices
    pub fn has_choice(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c.id == choice)
    }

    /// Whether this is a boss question
    pub fn is_boss(&self) -> bool {
        self.difficulty == Difficulty::Boss
    }
}

/// Reasons a fetched question list cannot be used
#[derive(Debug, Error)]
pub enum Error {
    /// The backend returned no questions
    #[error("no questions in set")]
    Empty,
    /// A question failed validation
    #[error("question {id} is invalid: {report}")]
    Invalid {
        /// Identifier of the offending question
        id: String,
        /// What failed
        report: garde::Report,
    },
    /// A question's correct choice is not one of its choices
    #[error("question {id} names correct choice {choice:?} which is not offered")]
    UnknownCorrectChoice {
        /// Identifier of the offending question
        id: String,
        /// The correct choice identifier as fetched
        choice: String,
    },
}

/// An ordered, validated, non-empty list of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Builds a question set from fetched questions
    ///
    /// Questions are sorted by their ordering key; questions sharing a key
    /// keep the order they were fetched in.
    ///
    /// # Errors
    ///
    /// Fails if the list is empty, if any question is invalid, or if any
    /// question's correct choice is not among its choices.
    pub fn new(questions: Vec<Question>) -> Result<Self, Error> {
        if questions.is_empty() {
            return Err(Error::Empty);
        }

        for question in &questions {
            question.validate().map_err(|report| Error::Invalid {
                id: question.id.clone(),
                report,
            })?;
            if !question.has_choice(&question.correct_choice) {
                return Err(Error::UnknownCorrectChoice {
                    id: question.id.clone(),
                    choice: question.correct_choice.clone(),
                });
            }
        }

        Ok(Self {
            questions: questions
                .into_iter()
                .sorted_by_key(|q| q.order)
                .collect_vec(),
        })
    }

    /// Number of questions in the set
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false`; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// The question at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Iterates over the questions in order
    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// Number of questions of the given difficulty
    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.questions
            .iter()
            .filter(|q| q.difficulty == difficulty)
            .count()
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn choices() -> Vec<Choice> {
        ["A", "B", "C", "D"]
            .into_iter()
            .map(|id| Choice {
                id: id.to_string(),
                text: format!("Option {id}"),
            })
            .collect()
    }

    pub(crate) fn question(id: &str, order: i64, difficulty: Difficulty) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Question {id}?"),
            choices: choices(),
            correct_choice: "A".to_string(),
            difficulty,
            order,
        }
    }

    #[test]
    fn test_is_correct_exact_match() {
        let q = question("q1", 1, Difficulty::Standard);
        assert!(q.is_correct("A"));
        assert!(!q.is_correct("a"));
        assert!(!q.is_correct("A "));
        assert!(!q.is_correct("B"));
    }

    #[test]
    fn test_difficulty_from_tag() {
        assert_eq!(Difficulty::from_tag(Some("boss")), Difficulty::Boss);
        assert_eq!(Difficulty::from_tag(Some("BOSS")), Difficulty::Boss);
        assert_eq!(Difficulty::from_tag(Some("standard")), Difficulty::Standard);
        assert_eq!(Difficulty::from_tag(Some("hard")), Difficulty::Standard);
        assert_eq!(Difficulty::from_tag(None), Difficulty::Standard);
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(Difficulty::Standard.to_string(), "Standard Round");
        assert_eq!(Difficulty::Boss.to_string(), "Final Boss Round");
    }

    #[test]
    fn test_set_sorted_by_order() {
        let set = QuestionSet::new(vec![
            question("c", 3, Difficulty::Boss),
            question("a", 1, Difficulty::Standard),
            question("b", 2, Difficulty::Standard),
        ])
        .unwrap();

        assert_eq!(set.iter().map(|q| q.id.as_str()).collect_vec(), ["a", "b", "c"]);
        assert_eq!(set.count(Difficulty::Standard), 2);
        assert_eq!(set.count(Difficulty::Boss), 1);
    }

    #[test]
    fn test_set_sort_is_stable() {
        let set = QuestionSet::new(vec![
            question("first", 1, Difficulty::Standard),
            question("second", 1, Difficulty::Standard),
        ])
        .unwrap();

        assert_eq!(set.get(0).unwrap().id, "first");
        assert_eq!(set.get(1).unwrap().id, "second");
    }

    #[test]
    fn test_set_rejects_empty() {
        assert!(matches!(QuestionSet::new(vec![]), Err(Error::Empty)));
    }

    #[test]
    fn test_set_rejects_invalid_question() {
        let mut q = question("q1", 1, Difficulty::Standard);
        q.prompt = String::new();
        assert!(matches!(
            QuestionSet::new(vec![q]),
            Err(Error::Invalid { id, .. }) if id == "q1"
        ));

        let mut q = question("q2", 1, Difficulty::Standard);
        q.choices.truncate(1);
        q.correct_choice = "A".to_string();
        assert!(matches!(QuestionSet::new(vec![q]), Err(Error::Invalid { .. })));
    }

    #[test]
    fn test_set_rejects_unknown_correct_choice() {
        let mut q = question("q1", 1, Difficulty::Standard);
        q.correct_choice = "E".to_string();
        assert!(matches!(
            QuestionSet::new(vec![q]),
            Err(Error::UnknownCorrectChoice { choice, .. }) if choice == "E"
        ));
    }
}
