//! Quiz orchestration
//!
//! [`Quiz`] owns one participant's run through a weekly quiz: loading the
//! question set, the welcome screen, the pre-quiz countdown, the questions
//! themselves (with the boss transition in between rounds), and the results.
//!
//! Nothing in here sleeps or spawns. Anything that has to happen later is
//! handed to a scheduler as an [`AlarmMessage`] and comes back through
//! [`Quiz::receive_alarm`]. Every alarm and every pending load carries the
//! epoch it was issued in; restarting or disposing the quiz bumps the epoch,
//! so work belonging to an earlier attempt is recognised and dropped.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use thiserror::Error;

use crate::{
    answer::AnswerLog,
    boss::BossTransition,
    config::QuizConfig,
    constants,
    countdown::{Countdown, Step},
    identity::{self, InitiationParams, ParticipantIdentity},
    latch::Latch,
    progress::Progress,
    question::{self, Choice, Difficulty, Question, QuestionSet},
    report::ResultSummary,
    repository::{AttemptSubmission, ParticipantAccess, QuizRepository},
    session::Tunnel,
    timer::{Timer, format_clock},
};

/// Reasons a quiz cannot be taken
///
/// The display text is what the participant sees; it never contains
/// backend details.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum Error {
    /// A required initiation parameter is absent
    #[error("The quiz link is missing `{0}`. Please open the quiz from the link you were given.")]
    MissingParameter(String),
    /// Initiation parameters are present but invalid
    #[error("The quiz link is invalid: {0}")]
    InvalidParameters(String),
    /// The backend reports the quiz as switched off
    #[error(
        "The quiz for course {course_id}, week {week} is not available right now. Please check back later or contact your coordinator."
    )]
    Inactive {
        /// Requested course
        course_id: String,
        /// Requested week
        week: String,
    },
    /// The backend has no questions for the quiz
    #[error("No questions found for course {course_id}, week {week}.")]
    NoQuestions {
        /// Requested course
        course_id: String,
        /// Requested week
        week: String,
    },
    /// The questions could not be loaded
    #[error("Failed to load questions. Please try again later.")]
    LoadFailed(String),
}

impl From<identity::Error> for Error {
    fn from(error: identity::Error) -> Self {
        match error {
            identity::Error::Missing(name) => Self::MissingParameter(name.to_owned()),
            identity::Error::Invalid(report) => Self::InvalidParameters(report.to_string()),
        }
    }
}

/// Where the participant currently is in the quiz
#[derive(Debug, Clone)]
pub enum Phase {
    /// Waiting for initiation parameters and the question load
    CollectingIdentity,
    /// Questions loaded, waiting for the participant to start
    Welcome,
    /// Counting down before the first question
    Countdown(Countdown),
    /// A question is on screen
    InProgress,
    /// Between the last standard question and the first boss question
    BossTransition(BossTransition),
    /// Every question answered
    Results,
    /// Initialization failed; terminal for this quiz
    Failed(Error),
}

/// Delayed events scheduled by the quiz
///
/// Each carries the epoch it was scheduled in and is ignored if the quiz has
/// moved on to another epoch since.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Advance the pre-quiz countdown
    CountdownStep {
        /// Epoch the alarm belongs to
        epoch: u64,
    },
    /// End the boss transition screen
    BossTransitionDone {
        /// Epoch the alarm belongs to
        epoch: u64,
    },
    /// One second of attempt time has passed
    Tick {
        /// Epoch the alarm belongs to
        epoch: u64,
    },
}

impl AlarmMessage {
    /// The epoch the alarm was scheduled in
    pub fn epoch(&self) -> u64 {
        match self {
            Self::CountdownStep { epoch }
            | Self::BossTransitionDone { epoch }
            | Self::Tick { epoch } => *epoch,
        }
    }
}

/// Actions coming from the view
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum IncomingMessage {
    /// Leave the welcome screen and start the countdown
    Start,
    /// Answer the current question with a choice identifier
    Answer(String),
    /// Fill in the optional contact details on the welcome screen
    CompleteDetails {
        /// Mobile number
        #[serde(default)]
        mobile: Option<String>,
        /// College name
        #[serde(default)]
        college: Option<String>,
    },
    /// Take the quiz again from the results screen
    Restart,
}

/// Content of the welcome screen
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeMessage {
    /// Participant name
    pub name: String,
    /// Mobile number, if known
    pub mobile: Option<String>,
    /// College name, if known
    pub college: Option<String>,
    /// Course identifier
    pub course_id: String,
    /// Week identifier
    pub week: String,
    /// Number of questions in the quiz
    pub question_count: usize,
    /// Number of boss questions among them
    pub boss_count: usize,
}

/// A question as shown to the participant
///
/// The correct choice is deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionMessage {
    /// 0-based index of the question
    pub index: usize,
    /// Total number of questions
    pub count: usize,
    /// Question text
    pub prompt: String,
    /// Choices in display order
    pub choices: Vec<Choice>,
    /// Round the question belongs to
    pub difficulty: Difficulty,
    /// Progress bar for this question
    pub progress: Progress,
}

impl QuestionMessage {
    fn new(index: usize, count: usize, question: &Question) -> Self {
        Self {
            index,
            count,
            prompt: question.prompt.clone(),
            choices: question.choices.clone(),
            difficulty: question.difficulty,
            progress: Progress::new(index + 1, count, question.difficulty),
        }
    }
}

/// Incremental updates sent to the view
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub enum UpdateMessage {
    /// Identity accepted, questions are being fetched
    Loading,
    /// The quiz cannot be taken
    Failed {
        /// What went wrong
        error: Error,
        /// Text to show the participant
        message: String,
    },
    /// Show the welcome screen
    Welcome(WelcomeMessage),
    /// Show a countdown number
    Countdown(u8),
    /// Show a question
    Question(QuestionMessage),
    /// The attempt clock moved
    Clock {
        /// Elapsed whole seconds
        seconds: u64,
        /// Elapsed time as `mm:ss`
        clock: String,
    },
    /// Show the boss transition screen
    BossTransition {
        /// Index of the question just answered
        index: usize,
        /// Total number of questions
        count: usize,
        /// Number of boss questions ahead
        boss_count: usize,
    },
    /// Show the results screen
    Results(ResultSummary),
}

impl UpdateMessage {
    /// Converts the update message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Full state snapshots sent when the view (re)mounts
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub enum SyncMessage {
    /// No initiation parameters received yet
    CollectingIdentity,
    /// Questions are being fetched
    Loading,
    /// The quiz cannot be taken
    Failed {
        /// What went wrong
        error: Error,
        /// Text to show the participant
        message: String,
    },
    /// On the welcome screen
    Welcome(WelcomeMessage),
    /// Counting down
    Countdown(u8),
    /// Answering a question
    Question {
        /// The question on screen
        question: QuestionMessage,
        /// Elapsed time as `mm:ss`
        clock: String,
    },
    /// On the boss transition screen
    BossTransition {
        /// Index of the question just answered
        index: usize,
        /// Total number of questions
        count: usize,
        /// Elapsed time as `mm:ss`
        clock: String,
    },
    /// On the results screen
    Results(ResultSummary),
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// A question load waiting to be executed
///
/// Produced by [`Quiz::begin_load`] so the caller can run the backend
/// requests on its own executor without holding the quiz borrowed across
/// the await. The result goes back through [`Quiz::finish_load`].
#[derive(Debug, Clone)]
pub struct LoadRequest {
    epoch: u64,
    identity: ParticipantIdentity,
    record_participant: bool,
    check_availability: bool,
}

impl LoadRequest {
    /// The epoch the load was issued in
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The identity the questions are loaded for
    pub fn identity(&self) -> &ParticipantIdentity {
        &self.identity
    }

    /// Runs the backend requests for this load
    ///
    /// The participant-access record is best effort: a failure is logged and
    /// the load carries on. With availability checking on, an inactive quiz
    /// is reported before any question is fetched.
    ///
    /// # Errors
    ///
    /// Returns the [`Error`] the participant should see when the quiz cannot
    /// be taken.
    pub async fn execute<R: QuizRepository + ?Sized>(
        &self,
        repository: &R,
    ) -> Result<QuestionSet, Error> {
        let course_id = &self.identity.course_id;
        let week = &self.identity.week;

        if self.record_participant {
            let access = ParticipantAccess::from(&self.identity);
            if let Err(e) = repository.record_participant(&access).await {
                log::warn!(
                    "could not record participant access for course {course_id} week {week}: {e}"
                );
            }
        }

        if self.check_availability {
            match repository.is_quiz_active(course_id, week).await {
                Ok(true) => {}
                Ok(false) => {
                    log::info!("quiz for course {course_id} week {week} is inactive");
                    return Err(Error::Inactive {
                        course_id: course_id.clone(),
                        week: week.clone(),
                    });
                }
                Err(e) => {
                    log::error!("availability check failed for course {course_id} week {week}: {e}");
                    return Err(Error::LoadFailed(e.to_string()));
                }
            }
        }

        let questions = repository
            .fetch_questions(course_id, week)
            .await
            .map_err(|e| {
                log::error!("question fetch failed for course {course_id} week {week}: {e}");
                Error::LoadFailed(e.to_string())
            })?;

        QuestionSet::new(questions).map_err(|e| match e {
            question::Error::Empty => Error::NoQuestions {
                course_id: course_id.clone(),
                week: week.clone(),
            },
            e => {
                log::error!("rejecting question set for course {course_id} week {week}: {e}");
                Error::LoadFailed(e.to_string())
            }
        })
    }
}

/// One participant's session with a weekly quiz
pub struct Quiz {
    config: QuizConfig,
    identity: Option<ParticipantIdentity>,
    questions: Option<QuestionSet>,
    phase: Phase,
    /// Index of the question on screen; equals the question count on results
    cursor: usize,
    answers: AnswerLog,
    timer: Timer,
    /// Timer value when the current question appeared
    question_shown_at: u64,
    epoch: u64,
    participant_recorded: Latch,
    results_submitted: Latch,
}

impl Debug for Quiz {
    /// Custom debug implementation that avoids printing the question set
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quiz")
            .field("phase", &self.phase)
            .field("cursor", &self.cursor)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl Default for Quiz {
    fn default() -> Self {
        Self::new(QuizConfig::default())
    }
}

impl Quiz {
    /// Creates a quiz waiting for its initiation parameters
    ///
    /// # Arguments
    ///
    /// * `config` - Deployment settings; assumed already validated
    pub fn new(config: QuizConfig) -> Self {
        Self {
            config,
            identity: None,
            questions: None,
            phase: Phase::CollectingIdentity,
            cursor: 0,
            answers: AnswerLog::new(),
            timer: Timer::new(),
            question_shown_at: 0,
            epoch: 0,
            participant_recorded: Latch::new(),
            results_submitted: Latch::new(),
        }
    }

    /// The current phase
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The validated participant, once initiation parameters were accepted
    pub fn identity(&self) -> Option<&ParticipantIdentity> {
        self.identity.as_ref()
    }

    /// The loaded question set
    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    /// Index of the current question
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Answers given in the current attempt
    pub fn answers(&self) -> &AnswerLog {
        &self.answers
    }

    /// Whole seconds the current attempt has been running
    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.seconds()
    }

    /// The current epoch
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The deployment settings
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Validates the initiation parameters and prepares the question load
    ///
    /// Invalid parameters fail the quiz here, before any backend request.
    ///
    /// # Arguments
    ///
    /// * `params` - Raw parameters from the page URL
    /// * `tunnel` - Tunnel to the view
    ///
    /// # Returns
    ///
    /// The load to execute, or `None` if the parameters were rejected or the
    /// quiz is past identity collection
    pub fn begin_load<T: Tunnel>(
        &mut self,
        params: &InitiationParams,
        tunnel: &T,
    ) -> Option<LoadRequest> {
        if !matches!(self.phase, Phase::CollectingIdentity) || self.identity.is_some() {
            log::debug!("ignoring initiation parameters in phase {:?}", self.phase);
            return None;
        }

        match ParticipantIdentity::from_params(params, &self.config) {
            Ok(identity) => {
                let record_participant =
                    self.config.record_participants && self.participant_recorded.fire();
                self.identity = Some(identity.clone());
                tunnel.send_message(&UpdateMessage::Loading);

                Some(LoadRequest {
                    epoch: self.epoch,
                    identity,
                    record_participant,
                    check_availability: self.config.require_availability,
                })
            }
            Err(e) => {
                self.fail(e.into(), tunnel);
                None
            }
        }
    }

    /// Applies the outcome of a question load
    ///
    /// # Arguments
    ///
    /// * `epoch` - Epoch of the [`LoadRequest`] that produced the result
    /// * `result` - What [`LoadRequest::execute`] returned
    /// * `tunnel` - Tunnel to the view
    ///
    /// # Returns
    ///
    /// `false` if the result was stale and discarded
    pub fn finish_load<T: Tunnel>(
        &mut self,
        epoch: u64,
        result: Result<QuestionSet, Error>,
        tunnel: &T,
    ) -> bool {
        if epoch != self.epoch || !matches!(self.phase, Phase::CollectingIdentity) {
            log::debug!("discarding question load from epoch {epoch}");
            return false;
        }

        match result {
            Ok(questions) => {
                log::info!(
                    "loaded {} with {} boss",
                    pluralizer::pluralize("question", questions.len() as isize, true),
                    questions.count(Difficulty::Boss)
                );
                self.questions = Some(questions);
                self.phase = Phase::Welcome;
                if let Some(welcome) = self.welcome_message() {
                    tunnel.send_message(&UpdateMessage::Welcome(welcome));
                }
            }
            Err(e) => self.fail(e, tunnel),
        }

        true
    }

    /// Validates the parameters and loads the questions in one go
    ///
    /// Convenience over [`Quiz::begin_load`], [`LoadRequest::execute`] and
    /// [`Quiz::finish_load`] for callers that can hold the quiz across the
    /// await.
    pub async fn initialize<R: QuizRepository + ?Sized, T: Tunnel>(
        &mut self,
        params: &InitiationParams,
        repository: &R,
        tunnel: &T,
    ) {
        let Some(request) = self.begin_load(params, tunnel) else {
            return;
        };
        let result = request.execute(repository).await;
        self.finish_load(request.epoch(), result, tunnel);
    }

    /// Fills in the optional contact details from the welcome screen
    ///
    /// # Returns
    ///
    /// `Ok(false)` outside the welcome screen, where nothing changes
    ///
    /// # Errors
    ///
    /// Returns the validation failure and keeps the previous details.
    pub fn complete_details<T: Tunnel>(
        &mut self,
        mobile: Option<&str>,
        college: Option<&str>,
        tunnel: &T,
    ) -> Result<bool, identity::Error> {
        if !matches!(self.phase, Phase::Welcome) {
            return Ok(false);
        }
        let Some(identity) = &mut self.identity else {
            return Ok(false);
        };

        identity.complete_details(mobile, college, &self.config)?;

        if let Some(welcome) = self.welcome_message() {
            tunnel.send_message(&UpdateMessage::Welcome(welcome));
        }
        Ok(true)
    }

    /// Leaves the welcome screen and starts the countdown
    ///
    /// # Arguments
    ///
    /// * `schedule_message` - Function to schedule delayed messages for timing
    /// * `tunnel` - Tunnel to the view
    ///
    /// # Type Parameters
    ///
    /// * `T` - Type implementing the Tunnel trait
    /// * `S` - Function type for scheduling alarm messages
    pub fn start<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        mut schedule_message: S,
        tunnel: &T,
    ) {
        if !matches!(self.phase, Phase::Welcome) {
            return;
        }

        let countdown = Countdown::new(self.config.countdown_from);
        tunnel.send_message(&UpdateMessage::Countdown(countdown.remaining()));
        self.phase = Phase::Countdown(countdown);

        schedule_message(
            AlarmMessage::CountdownStep { epoch: self.epoch },
            self.config.countdown_step,
        );
    }

    /// Handles a scheduled alarm
    ///
    /// Alarms from an earlier epoch are ignored, as are alarms that no longer
    /// match the phase (a second completion of the same countdown, say).
    ///
    /// # Arguments
    ///
    /// * `message` - The alarm that fired
    /// * `schedule_message` - Function to schedule delayed messages for timing
    /// * `tunnel` - Tunnel to the view
    ///
    /// # Type Parameters
    ///
    /// * `T` - Type implementing the Tunnel trait
    /// * `S` - Function type for scheduling alarm messages
    pub fn receive_alarm<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        message: AlarmMessage,
        mut schedule_message: S,
        tunnel: &T,
    ) {
        let epoch = self.epoch;
        if message.epoch() != epoch {
            log::debug!("discarding {message:?} in epoch {epoch}");
            return;
        }

        match message {
            AlarmMessage::CountdownStep { .. } => {
                let step = match &mut self.phase {
                    Phase::Countdown(countdown) => countdown.advance(),
                    _ => return,
                };
                match step {
                    Step::Remaining(remaining) => {
                        tunnel.send_message(&UpdateMessage::Countdown(remaining));
                        schedule_message(
                            AlarmMessage::CountdownStep { epoch },
                            self.config.countdown_step,
                        );
                    }
                    Step::Complete => {
                        if self.timer.start() {
                            schedule_message(
                                AlarmMessage::Tick { epoch },
                                web_time::Duration::from_secs(constants::timer::TICK_SECONDS),
                            );
                        }
                        self.show_question(tunnel);
                    }
                    Step::Idle => {}
                }
            }
            AlarmMessage::BossTransitionDone { .. } => {
                let completed = match &mut self.phase {
                    Phase::BossTransition(transition) => transition.complete(),
                    _ => return,
                };
                if completed {
                    self.cursor += 1;
                    self.show_question(tunnel);
                }
            }
            AlarmMessage::Tick { .. } => {
                if let Some(seconds) = self.timer.tick() {
                    tunnel.send_message(&UpdateMessage::Clock {
                        seconds,
                        clock: format_clock(seconds),
                    });
                    schedule_message(
                        AlarmMessage::Tick { epoch },
                        web_time::Duration::from_secs(constants::timer::TICK_SECONDS),
                    );
                }
            }
        }
    }

    /// Answers the question on screen
    ///
    /// Moves on to the next question, to the boss transition when the next
    /// question opens the boss round, or to the results after the last one.
    ///
    /// # Arguments
    ///
    /// * `choice` - Identifier of the chosen choice
    /// * `schedule_message` - Function to schedule delayed messages for timing
    /// * `tunnel` - Tunnel to the view
    ///
    /// # Returns
    ///
    /// `false` if the answer was rejected: no question on screen, or a choice
    /// the question does not offer
    ///
    /// # Type Parameters
    ///
    /// * `T` - Type implementing the Tunnel trait
    /// * `S` - Function type for scheduling alarm messages
    pub fn answer<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        choice: &str,
        mut schedule_message: S,
        tunnel: &T,
    ) -> bool {
        if !matches!(self.phase, Phase::InProgress) {
            log::debug!("ignoring answer in phase {:?}", self.phase);
            return false;
        }
        let Some(questions) = &self.questions else {
            return false;
        };
        let Some(question) = questions.get(self.cursor) else {
            return false;
        };
        if !question.has_choice(choice) {
            log::warn!("rejecting choice {choice:?} for question {}", question.id);
            return false;
        }

        let time_taken = self.timer.seconds().saturating_sub(self.question_shown_at);
        if let Err(e) = self
            .answers
            .record(self.cursor, question, choice, time_taken)
        {
            log::error!("{e}");
            return false;
        }

        let next = self.cursor + 1;
        let is_last = next == questions.len();
        let opens_boss_round =
            !question.is_boss() && questions.get(next).is_some_and(Question::is_boss);
        let count = questions.len();
        let boss_count = questions.count(Difficulty::Boss);

        if is_last {
            self.finish(tunnel);
        } else if opens_boss_round {
            self.phase = Phase::BossTransition(BossTransition::new());
            tunnel.send_message(&UpdateMessage::BossTransition {
                index: self.cursor,
                count,
                boss_count,
            });
            schedule_message(
                AlarmMessage::BossTransitionDone { epoch: self.epoch },
                self.config.boss_transition,
            );
        } else {
            self.cursor = next;
            self.show_question(tunnel);
        }

        true
    }

    /// The results of the finished attempt
    ///
    /// # Returns
    ///
    /// `None` unless the quiz is on the results screen
    pub fn summary(&self) -> Option<ResultSummary> {
        if !matches!(self.phase, Phase::Results) {
            return None;
        }
        let questions = self.questions.as_ref()?;
        Some(ResultSummary::new(
            &self.answers,
            questions,
            self.timer.seconds(),
        ))
    }

    /// Claims the submission for the finished attempt
    ///
    /// Each attempt yields its submission at most once, however often this
    /// is called.
    ///
    /// # Returns
    ///
    /// `None` outside the results screen or if already claimed
    pub fn take_submission(&mut self) -> Option<AttemptSubmission> {
        let summary = self.summary()?;
        let identity = self.identity.as_ref()?;
        if !self.results_submitted.fire() {
            return None;
        }
        Some(AttemptSubmission::new(identity, &summary, &self.answers))
    }

    /// Persists the finished attempt
    ///
    /// There is no retry: a failed write is logged and the results screen
    /// stays as it is.
    ///
    /// # Returns
    ///
    /// `true` if a submission was written by this call
    pub async fn submit_results<R: QuizRepository + ?Sized>(&mut self, repository: &R) -> bool {
        let Some(submission) = self.take_submission() else {
            return false;
        };

        match repository.submit_result(&submission).await {
            Ok(()) => {
                log::info!(
                    "submitted attempt {} scoring {}%",
                    submission.attempt_id,
                    submission.score
                );
                true
            }
            Err(e) => {
                log::error!("failed to submit attempt {}: {e}", submission.attempt_id);
                false
            }
        }
    }

    /// Starts a new attempt from the results screen
    ///
    /// Keeps the identity and the loaded questions; clears answers, the
    /// clock and the submission latch, and invalidates pending alarms.
    pub fn restart<T: Tunnel>(&mut self, tunnel: &T) {
        if !matches!(self.phase, Phase::Results) {
            return;
        }

        self.epoch += 1;
        self.cursor = 0;
        self.answers.clear();
        self.timer.reset();
        self.question_shown_at = 0;
        self.results_submitted.reset();
        self.phase = Phase::Welcome;

        log::info!("restarting quiz in epoch {}", self.epoch);
        if let Some(welcome) = self.welcome_message() {
            tunnel.send_message(&UpdateMessage::Welcome(welcome));
        }
    }

    /// Tears the quiz down when the view goes away
    ///
    /// Pending loads and alarms are invalidated and the timer stops.
    pub fn dispose<T: Tunnel>(&mut self, tunnel: T) {
        self.epoch += 1;
        self.timer.stop();
        tunnel.close();
    }

    /// Dispatches an action coming from the view
    ///
    /// # Arguments
    ///
    /// * `message` - The action
    /// * `schedule_message` - Function to schedule delayed messages for timing
    /// * `tunnel` - Tunnel to the view
    ///
    /// # Type Parameters
    ///
    /// * `T` - Type implementing the Tunnel trait
    /// * `S` - Function type for scheduling alarm messages
    pub fn receive_message<T: Tunnel, S: FnMut(AlarmMessage, web_time::Duration)>(
        &mut self,
        message: IncomingMessage,
        schedule_message: S,
        tunnel: &T,
    ) {
        match message {
            IncomingMessage::Start => self.start(schedule_message, tunnel),
            IncomingMessage::Answer(choice) => {
                self.answer(&choice, schedule_message, tunnel);
            }
            IncomingMessage::CompleteDetails { mobile, college } => {
                if let Err(e) =
                    self.complete_details(mobile.as_deref(), college.as_deref(), tunnel)
                {
                    log::warn!("rejected contact details: {e}");
                }
            }
            IncomingMessage::Restart => self.restart(tunnel),
        }
    }

    /// Snapshot of the current state for a freshly mounted view
    pub fn state_message(&self) -> SyncMessage {
        match &self.phase {
            Phase::CollectingIdentity if self.identity.is_none() => {
                SyncMessage::CollectingIdentity
            }
            Phase::CollectingIdentity => SyncMessage::Loading,
            Phase::Failed(error) => SyncMessage::Failed {
                error: error.clone(),
                message: error.to_string(),
            },
            Phase::Welcome => self
                .welcome_message()
                .map_or(SyncMessage::Loading, SyncMessage::Welcome),
            Phase::Countdown(countdown) => SyncMessage::Countdown(countdown.remaining()),
            Phase::InProgress => self
                .question_message()
                .map_or(SyncMessage::Loading, |question| SyncMessage::Question {
                    question,
                    clock: self.timer.clock(),
                }),
            Phase::BossTransition(_) => SyncMessage::BossTransition {
                index: self.cursor,
                count: self.questions.as_ref().map_or(0, QuestionSet::len),
                clock: self.timer.clock(),
            },
            Phase::Results => self
                .summary()
                .map_or(SyncMessage::Loading, SyncMessage::Results),
        }
    }

    /// Sends the current state snapshot through the tunnel
    pub fn sync<T: Tunnel>(&self, tunnel: &T) {
        tunnel.send_state(&self.state_message());
    }

    fn welcome_message(&self) -> Option<WelcomeMessage> {
        let identity = self.identity.as_ref()?;
        let questions = self.questions.as_ref()?;

        Some(WelcomeMessage {
            name: identity.name.clone(),
            mobile: identity.mobile.clone(),
            college: identity.college.clone(),
            course_id: identity.course_id.clone(),
            week: identity.week.clone(),
            question_count: questions.len(),
            boss_count: questions.count(Difficulty::Boss),
        })
    }

    fn question_message(&self) -> Option<QuestionMessage> {
        let questions = self.questions.as_ref()?;
        let question = questions.get(self.cursor)?;
        Some(QuestionMessage::new(self.cursor, questions.len(), question))
    }

    fn show_question<T: Tunnel>(&mut self, tunnel: &T) {
        self.phase = Phase::InProgress;
        self.question_shown_at = self.timer.seconds();
        if let Some(question) = self.question_message() {
            tunnel.send_message(&UpdateMessage::Question(question));
        }
    }

    fn finish<T: Tunnel>(&mut self, tunnel: &T) {
        self.timer.stop();
        self.cursor = self.questions.as_ref().map_or(0, QuestionSet::len);
        self.phase = Phase::Results;

        if let Some(summary) = self.summary() {
            log::info!(
                "attempt finished: {}/{} correct in {}",
                summary.correct,
                summary.total,
                summary.clock
            );
            tunnel.send_message(&UpdateMessage::Results(summary));
        }
    }

    fn fail<T: Tunnel>(&mut self, error: Error, tunnel: &T) {
        log::warn!("quiz cannot be taken: {error}");
        tunnel.send_message(&UpdateMessage::Failed {
            message: error.to_string(),
            error: error.clone(),
        });
        self.phase = Phase::Failed(error);
    }
}
