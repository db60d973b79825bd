use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{ApplicationId, Job, JobId, UserId};

/// Requested ordering for the applicant listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending by match score; ties keep submission order.
    Match,
    /// Submission order as stored.
    #[default]
    Submission,
}

impl SortKey {
    /// Any key other than `match` falls back to submission order.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("match") => Self::Match,
            _ => Self::Submission,
        }
    }
}

/// Read-only projection of one application for the posting owner. Resume
/// text and cover letter stay available to recruiters; nothing here mutates
/// the stored record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub applicant: UserId,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Vec<String>,
    pub match_score: u8,
    pub matched_keywords: Vec<String>,
    pub status: &'static str,
    pub applied_at: DateTime<Utc>,
}

/// Applicant listing returned to the posting owner.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantRoster {
    pub job_id: JobId,
    pub title: String,
    pub applicants: Vec<ApplicationView>,
}

/// Projects and orders a job's applications on demand.
pub fn rank_applications(job: &Job, sort: SortKey) -> ApplicantRoster {
    let mut applicants: Vec<ApplicationView> = job
        .applications
        .iter()
        .map(|application| ApplicationView {
            id: application.id.clone(),
            applicant: application.applicant.clone(),
            cover_letter: application.cover_letter.clone(),
            resume_url: application.resume_url.clone(),
            skills: application.skills.clone(),
            match_score: application.match_score,
            matched_keywords: application.matched_keywords.clone(),
            status: application.status.label(),
            applied_at: application.applied_at,
        })
        .collect();

    if sort == SortKey::Match {
        // Vec::sort_by is stable, so equal scores keep submission order.
        applicants.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    }

    ApplicantRoster {
        job_id: job.id.clone(),
        title: job.title.clone(),
        applicants,
    }
}
