//! Job board backend centered on applicant-to-job keyword matching and the
//! application lifecycle it drives: apply, score, notify, transition.

pub mod applications;
pub mod config;
pub mod error;
pub mod matching;
pub mod notifications;
pub mod telemetry;
