//! # Weekly Quiz Library
//!
//! This library provides the engine behind a weekly course quiz: a
//! participant opens a link naming a course and a week, answers a standard
//! round followed by a final boss round, and gets a scored, timed result
//! that is written back to a hosted backend and can be downloaded as a
//! report.
//!
//! The engine is view-agnostic. [`quiz::Quiz`] holds all state and talks to
//! the outside through three seams: a [`session::Tunnel`] for everything the
//! view should show, a scheduler closure for delayed events, and a
//! [`repository::QuizRepository`] for the backend.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::new_without_default)]

pub mod answer;
pub mod boss;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod identity;
pub mod latch;
pub mod progress;
pub mod question;
pub mod quiz;
pub mod report;
pub mod repository;
#[cfg(feature = "rest")]
pub mod rest;
pub mod session;
pub mod timer;

pub use config::QuizConfig;
pub use identity::{InitiationParams, ParticipantIdentity};
pub use quiz::{AlarmMessage, IncomingMessage, Phase, Quiz, SyncMessage, UpdateMessage};
pub use repository::{InMemoryRepository, QuizRepository};
pub use session::Tunnel;
