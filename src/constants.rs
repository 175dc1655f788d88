//! Configuration constants for the quiz engine
//!
//! This module contains the limits, defaults and fixed durations used
//! throughout the engine to keep fetched data and participant input within
//! sane bounds.

/// Participant identity limits
pub mod identity {
    /// Maximum length of a participant name in bytes
    pub const MAX_NAME_LENGTH: usize = 100;
    /// Maximum length of a participant email in bytes
    pub const MAX_EMAIL_LENGTH: usize = 254;
    /// Maximum length of a mobile number
    pub const MAX_MOBILE_LENGTH: usize = 20;
    /// Maximum length of a college name
    pub const MAX_COLLEGE_LENGTH: usize = 200;
}

/// Question limits
pub mod question {
    /// Minimum length of a question prompt
    pub const MIN_PROMPT_LENGTH: usize = 1;
    /// Maximum length of a question prompt
    pub const MAX_PROMPT_LENGTH: usize = 500;
    /// Minimum number of choices offered for a question
    pub const MIN_CHOICE_COUNT: usize = 2;
    /// Maximum number of choices offered for a question
    pub const MAX_CHOICE_COUNT: usize = 8;
    /// Maximum length of a single choice text
    pub const MAX_CHOICE_LENGTH: usize = 200;
}

/// Pre-quiz countdown
pub mod countdown {
    /// Default number the countdown starts from
    pub const DEFAULT_FROM: u8 = 3;
    /// Largest configurable starting number
    pub const MAX_FROM: u8 = 10;
    /// Default time between countdown steps in milliseconds
    pub const DEFAULT_STEP_MILLIS: u64 = 1_000;
    /// Shortest configurable step in milliseconds
    pub const MIN_STEP_MILLIS: u64 = 200;
    /// Longest configurable step in milliseconds
    pub const MAX_STEP_MILLIS: u64 = 5_000;
}

/// Boss transition screen
pub mod boss {
    /// Default display time of the transition screen in seconds
    pub const DEFAULT_TRANSITION_SECONDS: u64 = 3;
    /// Shortest configurable display time in seconds
    pub const MIN_TRANSITION_SECONDS: u64 = 1;
    /// Longest configurable display time in seconds
    pub const MAX_TRANSITION_SECONDS: u64 = 10;
}

/// Attempt timer
pub mod timer {
    /// Interval between timer ticks in seconds
    pub const TICK_SECONDS: u64 = 1;
}

/// Allow-lists used when no configuration is supplied
pub mod allow_list {
    /// Course identifiers accepted by default
    pub const COURSES: [&str; 6] = ["1", "2", "3", "4", "7", "8"];
    /// Week identifiers accepted by default
    pub const WEEKS: [&str; 3] = ["1", "2", "3"];
}

/// Performance bands shown on the results screen
pub mod performance {
    /// Lowest percentage considered excellent
    pub const EXCELLENT_PERCENTAGE: u32 = 70;
    /// Lowest percentage considered good
    pub const GOOD_PERCENTAGE: u32 = 50;
}
