use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{
    Actor, Application, ApplicationId, ApplicationPayload, ApplicationStatus, Job, JobDraft, JobId,
    Role,
};
use super::notify::NotificationEmitter;
use super::ranking::{rank_applications, ApplicantRoster, SortKey};
use super::repository::{DirectoryError, JobStore, ProfileDirectory, StoreError};
use crate::matching;
use crate::notifications::NotificationStore;

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Service composing the job store, profile directory, match scorer, and
/// notification emitter.
///
/// Each operation is one sequential unit of work: the only suspension points
/// are the store calls, and scoring runs synchronously in between. The
/// duplicate-check-and-append atomicity is delegated to the store contract.
pub struct JobBoardService<S, N, P> {
    jobs: Arc<S>,
    profiles: Arc<P>,
    emitter: NotificationEmitter<N>,
}

impl<S, N, P> JobBoardService<S, N, P>
where
    S: JobStore + 'static,
    N: NotificationStore + 'static,
    P: ProfileDirectory + 'static,
{
    pub fn new(jobs: Arc<S>, notifications: Arc<N>, profiles: Arc<P>) -> Self {
        Self {
            jobs,
            profiles,
            emitter: NotificationEmitter::new(notifications),
        }
    }

    /// Publish a new posting. Recruiter capability required.
    pub fn post_job(&self, actor: &Actor, draft: JobDraft) -> Result<Job, BoardError> {
        if !matches!(actor.role, Role::Recruiter | Role::Admin) {
            return Err(BoardError::Forbidden("only recruiters can post jobs"));
        }

        let job = Job {
            id: next_job_id(),
            title: draft.title,
            company: draft.company,
            location: draft.location,
            description: draft.description,
            requirements: draft.requirements,
            tags: draft.tags,
            posted_by: actor.id.clone(),
            posted_at: Utc::now(),
            applications: Vec::new(),
        };

        Ok(self.jobs.insert_job(job)?)
    }

    /// Submit an application: snapshot skills, score, append, then notify the
    /// posting owner best-effort.
    pub fn submit_application(
        &self,
        actor: &Actor,
        job_id: &JobId,
        payload: ApplicationPayload,
    ) -> Result<Application, BoardError> {
        if actor.role != Role::Seeker {
            return Err(BoardError::Forbidden("only seekers can apply to jobs"));
        }

        let job = self.jobs.find_job(job_id)?.ok_or(BoardError::NotFound)?;

        // Courtesy pre-check; the store re-checks inside the conditional
        // append, which is what holds under concurrent submissions.
        if job.has_application_from(&actor.id) {
            return Err(BoardError::DuplicateApplication);
        }

        let ApplicationPayload {
            cover_letter,
            resume_url,
            resume_text,
            skills,
        } = payload;

        // Snapshot resolved exactly once: explicit skills win when non-empty,
        // otherwise the profile's current skills are copied in.
        let skills = if skills.is_empty() {
            self.profiles.skills_for(&actor.id)?
        } else {
            skills
        };

        let outcome =
            matching::score_application(&job, &skills, resume_text.as_deref().unwrap_or(""));

        let application = Application {
            id: next_application_id(),
            applicant: actor.id.clone(),
            cover_letter,
            resume_url,
            resume_text,
            skills,
            match_score: outcome.score,
            matched_keywords: outcome.matched_keywords,
            status: ApplicationStatus::Applied,
            applied_at: Utc::now(),
            notified: false,
        };

        self.jobs.append_application(job_id, application.clone())?;
        self.emitter.application_received(&job, &application);

        Ok(application)
    }

    /// Move an application to a new status and notify the applicant
    /// best-effort. The status value is validated before anything is read or
    /// written; there is no ordering constraint between statuses.
    pub fn transition_status(
        &self,
        actor: &Actor,
        job_id: &JobId,
        application_id: &ApplicationId,
        status_value: &str,
    ) -> Result<ApplicationStatus, BoardError> {
        let status = ApplicationStatus::parse(status_value)
            .ok_or_else(|| BoardError::InvalidStatus(status_value.to_string()))?;

        let job = self.jobs.find_job(job_id)?.ok_or(BoardError::NotFound)?;
        if !actor.can_manage(&job) {
            return Err(BoardError::Forbidden(
                "only the posting owner or an admin can change application status",
            ));
        }

        let application = job
            .application(application_id)
            .ok_or(BoardError::NotFound)?
            .clone();

        self.jobs.update_status(job_id, application_id, status)?;
        self.emitter.status_changed(&job, &application, status);

        Ok(status)
    }

    /// Read-only ranked projection of a job's applicants, authorized to the
    /// posting owner or an admin.
    pub fn list_applicants(
        &self,
        actor: &Actor,
        job_id: &JobId,
        sort: SortKey,
    ) -> Result<ApplicantRoster, BoardError> {
        let job = self.jobs.find_job(job_id)?.ok_or(BoardError::NotFound)?;
        if !actor.can_manage(&job) {
            return Err(BoardError::Forbidden(
                "only the posting owner or an admin can view applicants",
            ));
        }

        Ok(rank_applications(&job, sort))
    }
}

/// Error raised by the board service. Each condition stays distinct so the
/// transport layer can map it to a specific response.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("job or application not found")]
    NotFound,
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("you have already applied to this job")]
    DuplicateApplication,
    #[error("invalid application status: {0}")]
    InvalidStatus(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<StoreError> for BoardError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => Self::NotFound,
            StoreError::DuplicateApplication => Self::DuplicateApplication,
            StoreError::Unavailable(detail) => Self::Persistence(detail),
        }
    }
}

impl From<DirectoryError> for BoardError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::Unavailable(detail) => Self::Persistence(detail),
        }
    }
}
