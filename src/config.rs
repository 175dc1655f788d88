//! Runtime configuration for a quiz deployment
//!
//! The allow-lists and the fixed screen durations are a deployment concern,
//! so they live here instead of being baked into the orchestrator. Every
//! field has a default, and a partial JSON document only overrides what it
//! names.

use std::time::Duration;

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

type ValidationResult = garde::Result;

/// Errors produced while loading a configuration
#[derive(Debug, Error)]
pub enum Error {
    /// The document is not valid JSON for this structure
    #[error("malformed quiz configuration: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The document parsed but some values are out of bounds
    #[error("invalid quiz configuration: {0}")]
    Invalid(#[from] garde::Report),
}

/// Validates that a duration falls within specified bounds
///
/// # Arguments
///
/// * `field` - Name of the field being validated (for error messages)
/// * `val` - The duration value to validate
fn validate_millis<const MIN_MILLIS: u64, const MAX_MILLIS: u64>(
    field: &'static str,
    val: &Duration,
) -> ValidationResult {
    let millis = u64::try_from(val.as_millis()).unwrap_or(u64::MAX);
    if (MIN_MILLIS..=MAX_MILLIS).contains(&millis) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{field} is outside of the bounds [{MIN_MILLIS}ms,{MAX_MILLIS}ms]",
        )))
    }
}

fn validate_countdown_step(val: &Duration) -> ValidationResult {
    validate_millis::<
        { constants::countdown::MIN_STEP_MILLIS },
        { constants::countdown::MAX_STEP_MILLIS },
    >("countdown_step", val)
}

fn validate_boss_transition(val: &Duration) -> ValidationResult {
    validate_millis::<
        { constants::boss::MIN_TRANSITION_SECONDS * 1_000 },
        { constants::boss::MAX_TRANSITION_SECONDS * 1_000 },
    >("boss_transition", val)
}

/// Deployment settings for the quiz engine
///
/// Durations are (de)serialized as milliseconds.
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct QuizConfig {
    /// Course identifiers a participant may request
    #[garde(length(min = 1))]
    pub allowed_courses: Vec<String>,
    /// Week identifiers a participant may request
    #[garde(length(min = 1))]
    pub allowed_weeks: Vec<String>,
    /// Number the pre-quiz countdown starts from
    #[garde(range(min = 1, max = constants::countdown::MAX_FROM))]
    pub countdown_from: u8,
    /// Time between countdown steps
    #[garde(custom(|v, _| validate_countdown_step(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub countdown_step: Duration,
    /// How long the boss transition screen stays up
    #[garde(custom(|v, _| validate_boss_transition(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub boss_transition: Duration,
    /// Whether the backend availability flag must be set before loading
    #[garde(skip)]
    pub require_availability: bool,
    /// Whether to write a participant-access record when the quiz opens
    #[garde(skip)]
    pub record_participants: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            allowed_courses: constants::allow_list::COURSES
                .iter()
                .map(ToString::to_string)
                .collect(),
            allowed_weeks: constants::allow_list::WEEKS
                .iter()
                .map(ToString::to_string)
                .collect(),
            countdown_from: constants::countdown::DEFAULT_FROM,
            countdown_step: Duration::from_millis(constants::countdown::DEFAULT_STEP_MILLIS),
            boss_transition: Duration::from_secs(constants::boss::DEFAULT_TRANSITION_SECONDS),
            require_availability: false,
            record_participants: true,
        }
    }
}

impl QuizConfig {
    /// Parses and validates a configuration from JSON
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the JSON does not parse and
    /// [`Error::Invalid`] if a value is out of bounds.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Whether a course identifier is on the allow-list
    pub fn allows_course(&self, course_id: &str) -> bool {
        self.allowed_courses.iter().any(|c| c == course_id)
    }

    /// Whether a week identifier is on the allow-list
    pub fn allows_week(&self, week: &str) -> bool {
        self.allowed_weeks.iter().any(|w| w == week)
    }
}
