use std::collections::HashMap;
use std::sync::Mutex;

use super::domain::{Application, ApplicationId, ApplicationStatus, Job, JobId, UserId};

/// Storage abstraction over job documents.
///
/// `append_application` is the atomicity seam: implementations must perform
/// the duplicate check and the append as a single conditional write on the
/// owning job document, so two concurrent submissions for the same
/// (job, applicant) pair can never both land. The core does no locking of its
/// own and delegates that invariant here.
pub trait JobStore: Send + Sync {
    fn find_job(&self, id: &JobId) -> Result<Option<Job>, StoreError>;

    fn insert_job(&self, job: Job) -> Result<Job, StoreError>;

    /// Conditional append: fails with [`StoreError::DuplicateApplication`]
    /// when the applicant already has an application on the job.
    fn append_application(
        &self,
        job_id: &JobId,
        application: Application,
    ) -> Result<(), StoreError>;

    fn update_status(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), StoreError>;
}

/// Error enumeration for job store failures. Transient trouble is kept
/// distinct from "not found" so callers can map them to different outcomes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("applicant already has an application on this job")]
    DuplicateApplication,
    #[error("job store unavailable: {0}")]
    Unavailable(String),
}

/// Profile lookup used to snapshot skills when a submission carries none.
pub trait ProfileDirectory: Send + Sync {
    /// Current skills on the user's profile; empty when none are on file.
    fn skills_for(&self, user: &UserId) -> Result<Vec<String>, DirectoryError>;
}

/// Error enumeration for profile directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("profile directory unavailable: {0}")]
    Unavailable(String),
}

/// Reference adapter keeping job documents behind one mutex.
///
/// The conditional append holds the lock across the duplicate check and the
/// push, which is exactly the whole-document atomic write the trait contract
/// asks a production store to provide.
#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: Mutex<HashMap<JobId, Job>>,
}

impl JobStore for InMemoryJobStore {
    fn find_job(&self, id: &JobId) -> Result<Option<Job>, StoreError> {
        let guard = self.jobs.lock().expect("job store mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_job(&self, job: Job) -> Result<Job, StoreError> {
        let mut guard = self.jobs.lock().expect("job store mutex poisoned");
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn append_application(
        &self,
        job_id: &JobId,
        application: Application,
    ) -> Result<(), StoreError> {
        let mut guard = self.jobs.lock().expect("job store mutex poisoned");
        let job = guard.get_mut(job_id).ok_or(StoreError::NotFound)?;

        if job.has_application_from(&application.applicant) {
            return Err(StoreError::DuplicateApplication);
        }

        job.applications.push(application);
        Ok(())
    }

    fn update_status(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        let mut guard = self.jobs.lock().expect("job store mutex poisoned");
        let job = guard.get_mut(job_id).ok_or(StoreError::NotFound)?;
        let application = job
            .applications
            .iter_mut()
            .find(|candidate| &candidate.id == application_id)
            .ok_or(StoreError::NotFound)?;

        application.status = status;
        Ok(())
    }
}

/// Reference adapter for profile skills; unknown users have nothing on file.
#[derive(Default)]
pub struct InMemoryProfiles {
    skills: Mutex<HashMap<UserId, Vec<String>>>,
}

impl InMemoryProfiles {
    pub fn set_skills(&self, user: UserId, skills: Vec<String>) {
        let mut guard = self.skills.lock().expect("profile mutex poisoned");
        guard.insert(user, skills);
    }
}

impl ProfileDirectory for InMemoryProfiles {
    fn skills_for(&self, user: &UserId) -> Result<Vec<String>, DirectoryError> {
        let guard = self.skills.lock().expect("profile mutex poisoned");
        Ok(guard.get(user).cloned().unwrap_or_default())
    }
}
