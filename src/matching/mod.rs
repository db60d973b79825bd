//! Keyword-overlap matching between postings and applicants.
//!
//! Scoring only rewards literal keyword overlap; there is no semantic
//! similarity involved. Both functions here are pure so recruiters editing a
//! posting later can never retroactively change a stored score.

mod keywords;

pub use keywords::job_keywords;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::applications::domain::Job;

/// Result of comparing one applicant against one posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Share of job keywords found in the applicant's skills or resume, 0-100.
    pub score: u8,
    /// The job keywords that matched, deduplicated.
    pub matched_keywords: Vec<String>,
}

/// Scores an applicant's declared skills and free-text resume against a
/// posting's keyword set.
///
/// A keyword counts as matched when it appears in either the lowercased
/// skill set or the tokenized resume; a keyword is never counted twice. The
/// score is `round(100 * matched / max(1, total))` clamped to 100, so a
/// posting with no derivable keywords scores 0 instead of dividing by zero.
pub fn score_application(job: &Job, skills: &[String], resume_text: &str) -> MatchOutcome {
    let job_keywords = job_keywords(job);

    let skill_set: BTreeSet<String> = skills.iter().map(|skill| skill.to_lowercase()).collect();
    let resume_words: BTreeSet<String> = keywords::tokenize(resume_text).collect();

    let matched_keywords: Vec<String> = job_keywords
        .iter()
        .filter(|keyword| skill_set.contains(*keyword) || resume_words.contains(*keyword))
        .cloned()
        .collect();

    let possible = job_keywords.len().max(1);
    let raw = matched_keywords.len() as f64 / possible as f64 * 100.0;
    let score = (raw.round() as u8).min(100);

    MatchOutcome {
        score,
        matched_keywords,
    }
}
