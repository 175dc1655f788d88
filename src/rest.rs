//! Hosted backend client
//!
//! Talks to a PostgREST-style data store (the REST interface exposed by
//! Supabase and similar hosts). Table rows are mapped onto the crate's types
//! here so nothing outside this module knows the schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    question::{Choice, Difficulty, Question},
    repository::{AttemptSubmission, Error, ParticipantAccess, QuizRepository},
};

const QUESTIONS_TABLE: &str = "quiz_questions";
const AVAILABILITY_TABLE: &str = "quiz_availability";
const RESULTS_TABLE: &str = "quiz_results";
const PARTICIPANTS_TABLE: &str = "quiz_participants";

/// Connection settings for the hosted backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestConfig {
    /// Project URL, e.g. `https://project.supabase.co`
    pub base_url: String,
    /// Anonymous API key sent with every request
    pub api_key: String,
}

/// A row of the questions table
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRow {
    /// Primary key; text or numeric depending on the schema
    pub id: serde_json::Value,
    /// Question text
    pub question: String,
    /// First option
    pub option_a: Option<String>,
    /// Second option
    pub option_b: Option<String>,
    /// Third option
    pub option_c: Option<String>,
    /// Fourth option
    pub option_d: Option<String>,
    /// Correct option, as a label (`A`) or as the option text
    pub correct_answer: String,
    /// Difficulty tag, `boss` for boss questions
    pub difficulty: Option<String>,
    /// Ordering key
    #[serde(default)]
    pub order_number: i64,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        let choices: Vec<Choice> = [
            ("A", row.option_a),
            ("B", row.option_b),
            ("C", row.option_c),
            ("D", row.option_d),
        ]
        .into_iter()
        .filter_map(|(id, text)| {
            text.map(|text| Choice {
                id: id.to_owned(),
                text,
            })
        })
        .collect();

        let correct_answer = row.correct_answer.trim();
        let correct_choice = choices
            .iter()
            .find(|c| c.id == correct_answer)
            .or_else(|| choices.iter().find(|c| c.text.trim() == correct_answer))
            .map_or_else(|| correct_answer.to_owned(), |c| c.id.clone());

        Self {
            id: match row.id {
                serde_json::Value::String(id) => id,
                other => other.to_string(),
            },
            prompt: row.question,
            choices,
            correct_choice,
            difficulty: Difficulty::from_tag(row.difficulty.as_deref()),
            order: row.order_number,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AvailabilityRow {
    is_active: Option<bool>,
}

/// [`QuizRepository`] over the backend's REST interface
#[derive(Debug, Clone)]
pub struct RestRepository {
    config: RestConfig,
    client: reqwest::Client,
}

impl RestRepository {
    /// Creates a client for the given backend
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// URL of a table endpoint
    pub fn endpoint(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{table}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn quiz_filter(course_id: &str, week: &str) -> [(&'static str, String); 2] {
        [
            ("course_id", format!("eq.{course_id}")),
            ("week", format!("eq.{week}")),
        ]
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.endpoint(table))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let response = self
            .request(reqwest::Method::GET, table)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }

    async fn insert<T: Serialize + ?Sized>(&self, table: &str, row: &T) -> Result<(), Error> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Status(status.as_u16()))
        }
    }
}

#[async_trait(?Send)]
impl QuizRepository for RestRepository {
    async fn fetch_questions(&self, course_id: &str, week: &str) -> Result<Vec<Question>, Error> {
        let [course, week] = Self::quiz_filter(course_id, week);
        let rows: Vec<QuestionRow> = self
            .select(
                QUESTIONS_TABLE,
                &[
                    ("select", "*".to_owned()),
                    course,
                    week,
                    ("order", "order_number.asc".to_owned()),
                ],
            )
            .await?;

        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn is_quiz_active(&self, course_id: &str, week: &str) -> Result<bool, Error> {
        let [course, week] = Self::quiz_filter(course_id, week);
        let rows: Vec<AvailabilityRow> = self
            .select(
                AVAILABILITY_TABLE,
                &[("select", "is_active".to_owned()), course, week],
            )
            .await?;

        Ok(rows
            .first()
            .and_then(|row| row.is_active)
            .unwrap_or(false))
    }

    async fn submit_result(&self, submission: &AttemptSubmission) -> Result<(), Error> {
        self.insert(RESULTS_TABLE, submission).await
    }

    async fn record_participant(&self, access: &ParticipantAccess) -> Result<(), Error> {
        self.insert(PARTICIPANTS_TABLE, access).await
    }
}
