//! Backend data access
//!
//! Everything the quiz needs from the hosted data store goes through the
//! [`QuizRepository`] trait, so the orchestrator never sees the store's
//! protocol. Futures are not `Send`: the engine runs on a single-threaded
//! browser event loop.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::{
    answer::{AnswerLog, AnswerRecord},
    identity::ParticipantIdentity,
    question::Question,
    report::ResultSummary,
};

/// Errors reported by a repository
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status
    #[error("backend returned status {0}")]
    Status(u16),
    /// The response body could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Record of a participant opening a quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantAccess {
    /// Participant name
    pub name: String,
    /// Participant email
    pub email: String,
    /// Course identifier
    pub course_id: String,
    /// Week identifier
    pub week: String,
}

impl From<&ParticipantIdentity> for ParticipantAccess {
    fn from(identity: &ParticipantIdentity) -> Self {
        Self {
            name: identity.name.clone(),
            email: identity.email.clone(),
            course_id: identity.course_id.clone(),
            week: identity.week.clone(),
        }
    }
}

/// A finished attempt, as written to the backend
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptSubmission {
    /// Unique identifier of this attempt
    pub attempt_id: Uuid,
    /// Participant name
    pub name: String,
    /// Participant email
    pub email: String,
    /// Optional mobile number
    pub mobile: Option<String>,
    /// Optional college name
    pub college: Option<String>,
    /// Course identifier
    pub course_id: String,
    /// Week identifier
    pub week: String,
    /// Score as a rounded percentage
    pub score: u32,
    /// Number of correct answers
    pub correct_answers: usize,
    /// Number of questions in the set
    pub total_questions: usize,
    /// Whole seconds the attempt took
    pub time_taken: u64,
    /// Every answer, in question order
    pub answers: Vec<AnswerRecord>,
    /// Submission time in milliseconds since the Unix epoch
    pub submitted_at: u64,
}

impl AttemptSubmission {
    /// Assembles the submission for a finished attempt
    pub fn new(
        identity: &ParticipantIdentity,
        summary: &ResultSummary,
        answers: &AnswerLog,
    ) -> Self {
        let submitted_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default();

        Self {
            attempt_id: Uuid::new_v4(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            mobile: identity.mobile.clone(),
            college: identity.college.clone(),
            course_id: identity.course_id.clone(),
            week: identity.week.clone(),
            score: summary.percentage,
            correct_answers: summary.correct,
            total_questions: summary.total,
            time_taken: summary.elapsed_seconds,
            answers: answers.records().to_vec(),
            submitted_at,
        }
    }
}

/// Narrow interface to the hosted data store
#[async_trait(?Send)]
pub trait QuizRepository {
    /// Fetches the questions of a quiz
    ///
    /// Order does not matter; the caller sorts by each question's ordering
    /// key. An empty list is a valid response.
    async fn fetch_questions(&self, course_id: &str, week: &str) -> Result<Vec<Question>, Error>;

    /// Whether a quiz is currently enabled
    ///
    /// Quizzes with no availability record are reported as inactive.
    async fn is_quiz_active(&self, course_id: &str, week: &str) -> Result<bool, Error>;

    /// Persists a finished attempt
    async fn submit_result(&self, submission: &AttemptSubmission) -> Result<(), Error>;

    /// Records that a participant opened a quiz
    async fn record_participant(&self, access: &ParticipantAccess) -> Result<(), Error>;
}

/// Repository backed by in-process maps
///
/// Useful for demos and tests. Failures can be injected per operation, and
/// every call is counted so callers can check what was attempted.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    questions: HashMap<(String, String), Vec<Question>>,
    active: HashMap<(String, String), bool>,
    submissions: RefCell<Vec<AttemptSubmission>>,
    accesses: RefCell<Vec<ParticipantAccess>>,
    fetch_count: Cell<usize>,
    fail_fetch: bool,
    fail_submit: bool,
    fail_record: bool,
}

impl InMemoryRepository {
    /// Creates an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the questions of a quiz
    pub fn with_questions(
        mut self,
        course_id: &str,
        week: &str,
        questions: Vec<Question>,
    ) -> Self {
        self.questions
            .insert((course_id.to_owned(), week.to_owned()), questions);
        self
    }

    /// Sets the availability flag of a quiz
    pub fn with_active(mut self, course_id: &str, week: &str, active: bool) -> Self {
        self.active
            .insert((course_id.to_owned(), week.to_owned()), active);
        self
    }

    /// Makes every question fetch fail
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Makes every result submission fail
    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    /// Makes every participant-access write fail
    pub fn failing_record(mut self) -> Self {
        self.fail_record = true;
        self
    }

    /// Number of question fetches attempted
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.get()
    }

    /// Submissions stored so far
    pub fn submissions(&self) -> Vec<AttemptSubmission> {
        self.submissions.borrow().clone()
    }

    /// Participant-access records stored so far
    pub fn accesses(&self) -> Vec<ParticipantAccess> {
        self.accesses.borrow().clone()
    }
}

#[async_trait(?Send)]
impl QuizRepository for InMemoryRepository {
    async fn fetch_questions(&self, course_id: &str, week: &str) -> Result<Vec<Question>, Error> {
        self.fetch_count.set(self.fetch_count.get() + 1);
        if self.fail_fetch {
            return Err(Error::Transport("fetch disabled".to_owned()));
        }
        Ok(self
            .questions
            .get(&(course_id.to_owned(), week.to_owned()))
            .cloned()
            .unwrap_or_default())
    }

    async fn is_quiz_active(&self, course_id: &str, week: &str) -> Result<bool, Error> {
        Ok(self
            .active
            .get(&(course_id.to_owned(), week.to_owned()))
            .copied()
            .unwrap_or(false))
    }

    async fn submit_result(&self, submission: &AttemptSubmission) -> Result<(), Error> {
        if self.fail_submit {
            return Err(Error::Status(503));
        }
        self.submissions.borrow_mut().push(submission.clone());
        Ok(())
    }

    async fn record_participant(&self, access: &ParticipantAccess) -> Result<(), Error> {
        if self.fail_record {
            return Err(Error::Status(500));
        }
        self.accesses.borrow_mut().push(access.clone());
        Ok(())
    }
}
