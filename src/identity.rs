//! Participant identity
//!
//! The host page passes who is taking the quiz, and which quiz, as URL query
//! parameters. [`InitiationParams`] holds those raw values and
//! [`ParticipantIdentity`] is the validated result, checked against the
//! deployment's allow-lists.

use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config::QuizConfig, constants};

type ValidationResult = garde::Result;

/// Errors produced while building a participant identity
#[derive(Debug, Error)]
pub enum Error {
    /// A required query parameter is missing or blank
    #[error("missing required parameter `{0}`")]
    Missing(&'static str),
    /// All parameters are present but some fail validation
    #[error("{0}")]
    Invalid(#[from] garde::Report),
}

/// Raw quiz initiation parameters as read from the page URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InitiationParams {
    /// Participant name
    pub name: Option<String>,
    /// Participant email
    pub email: Option<String>,
    /// Course identifier
    pub course_id: Option<String>,
    /// Week identifier
    pub week: Option<String>,
    /// Optional mobile number
    pub mobile: Option<String>,
    /// Optional college name
    pub college: Option<String>,
}

impl InitiationParams {
    /// Collects parameters from decoded key/value pairs
    ///
    /// Pairs are expected already percent-decoded, as handed out by the
    /// browser's `URLSearchParams`. The first occurrence of a key wins,
    /// unknown keys are ignored, and values are trimmed with blank values
    /// treated as absent.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "name" => &mut params.name,
                "email" => &mut params.email,
                "course_id" => &mut params.course_id,
                "week" => &mut params.week,
                "mobile" => &mut params.mobile,
                "college" => &mut params.college,
                _ => continue,
            };
            if slot.is_none() {
                *slot = non_blank(value.as_ref());
            }
        }

        params
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

#[allow(clippy::ptr_arg)]
fn allowed_course(value: &String, config: &QuizConfig) -> ValidationResult {
    if config.allows_course(value) {
        Ok(())
    } else {
        Err(garde::Error::new(format!("course {value:?} is not available")))
    }
}

#[allow(clippy::ptr_arg)]
fn allowed_week(value: &String, config: &QuizConfig) -> ValidationResult {
    if config.allows_week(value) {
        Ok(())
    } else {
        Err(garde::Error::new(format!("week {value:?} is not available")))
    }
}

/// Who is taking the quiz, and which quiz
///
/// Validated against a [`QuizConfig`], which supplies the course and week
/// allow-lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[garde(context(QuizConfig))]
pub struct ParticipantIdentity {
    /// Participant name
    #[garde(length(min = 1, max = constants::identity::MAX_NAME_LENGTH))]
    pub name: String,
    /// Participant email
    #[garde(length(min = 1, max = constants::identity::MAX_EMAIL_LENGTH))]
    pub email: String,
    /// Optional mobile number
    #[garde(length(max = constants::identity::MAX_MOBILE_LENGTH))]
    pub mobile: Option<String>,
    /// Optional college name
    #[garde(length(max = constants::identity::MAX_COLLEGE_LENGTH))]
    pub college: Option<String>,
    /// Course identifier
    #[garde(custom(allowed_course))]
    pub course_id: String,
    /// Week identifier
    #[garde(custom(allowed_week))]
    pub week: String,
}

impl ParticipantIdentity {
    /// Builds and validates an identity from initiation parameters
    ///
    /// Missing parameters are reported before anything is validated, course
    /// and week first since no quiz can be selected without them.
    ///
    /// # Errors
    ///
    /// [`Error::Missing`] names the first absent required parameter;
    /// [`Error::Invalid`] carries every validation failure.
    pub fn from_params(params: &InitiationParams, config: &QuizConfig) -> Result<Self, Error> {
        fn required(value: Option<&String>, name: &'static str) -> Result<String, Error> {
            value.cloned().ok_or(Error::Missing(name))
        }

        let course_id = required(params.course_id.as_ref(), "course_id")?;
        let week = required(params.week.as_ref(), "week")?;
        let name = required(params.name.as_ref(), "name")?;
        let email = required(params.email.as_ref(), "email")?;

        let identity = Self {
            name,
            email,
            mobile: params.mobile.clone(),
            college: params.college.clone(),
            course_id,
            week,
        };
        identity.validate_with(config)?;

        Ok(identity)
    }

    /// Fills in the optional contact details
    ///
    /// Blank values leave the current value untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] without modifying the identity if the new
    /// values fail validation.
    pub fn complete_details(
        &mut self,
        mobile: Option<&str>,
        college: Option<&str>,
        config: &QuizConfig,
    ) -> Result<(), Error> {
        let mut updated = self.clone();
        if let Some(mobile) = mobile.and_then(non_blank) {
            updated.mobile = Some(mobile);
        }
        if let Some(college) = college.and_then(non_blank) {
            updated.college = Some(college);
        }
        updated.validate_with(config)?;
        *self = updated;
        Ok(())
    }
}
