use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::applications::domain::{
    Actor, Application, ApplicationId, ApplicationPayload, ApplicationStatus, Job, JobDraft, JobId,
    Role, UserId,
};
use crate::applications::repository::{
    InMemoryJobStore, InMemoryProfiles, JobStore, StoreError,
};
use crate::applications::service::JobBoardService;
use crate::notifications::{
    InMemoryNotificationStore, Notification, NotificationError, NotificationId, NotificationStore,
};

pub(super) type Service = JobBoardService<InMemoryJobStore, InMemoryNotificationStore, InMemoryProfiles>;

pub(super) fn recruiter() -> Actor {
    Actor {
        id: UserId("rec-1".to_string()),
        role: Role::Recruiter,
    }
}

pub(super) fn admin() -> Actor {
    Actor {
        id: UserId("adm-1".to_string()),
        role: Role::Admin,
    }
}

pub(super) fn seeker(id: &str) -> Actor {
    Actor {
        id: UserId(id.to_string()),
        role: Role::Seeker,
    }
}

/// Six derivable keywords: senior, rust, engineer, tokio, postgresql, backend.
pub(super) fn draft() -> JobDraft {
    JobDraft {
        title: "Senior Rust Engineer".to_string(),
        company: "Acme Robotics".to_string(),
        location: Some("Remote".to_string()),
        description: "Own the ingestion pipeline.".to_string(),
        requirements: vec!["Rust".to_string(), "Tokio".to_string(), "PostgreSQL".to_string()],
        tags: vec!["backend".to_string()],
    }
}

pub(super) fn payload_with_skills(skills: &[&str]) -> ApplicationPayload {
    ApplicationPayload {
        skills: skills.iter().map(|s| s.to_string()).collect(),
        ..ApplicationPayload::default()
    }
}

pub(super) fn build_service() -> (
    Arc<Service>,
    Arc<InMemoryJobStore>,
    Arc<InMemoryNotificationStore>,
    Arc<InMemoryProfiles>,
) {
    let jobs = Arc::new(InMemoryJobStore::default());
    let notifications = Arc::new(InMemoryNotificationStore::default());
    let profiles = Arc::new(InMemoryProfiles::default());
    let service = Arc::new(JobBoardService::new(
        jobs.clone(),
        notifications.clone(),
        profiles.clone(),
    ));
    (service, jobs, notifications, profiles)
}

pub(super) fn post_standard_job(service: &Service) -> Job {
    service.post_job(&recruiter(), draft()).expect("job posts")
}

pub(super) fn stored_job(jobs: &InMemoryJobStore, id: &JobId) -> Job {
    jobs.find_job(id)
        .expect("store reachable")
        .expect("job present")
}

pub(super) fn stored_application(
    jobs: &InMemoryJobStore,
    job_id: &JobId,
    application_id: &ApplicationId,
) -> Application {
    stored_job(jobs, job_id)
        .application(application_id)
        .expect("application present")
        .clone()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Notification sink whose writes always fail, for best-effort coverage.
#[derive(Default)]
pub(super) struct FailingNotificationStore;

impl NotificationStore for FailingNotificationStore {
    fn create(&self, _notification: Notification) -> Result<(), NotificationError> {
        Err(NotificationError::Unavailable("sink offline".to_string()))
    }

    fn list_for(
        &self,
        _user: &UserId,
        _limit: usize,
    ) -> Result<Vec<Notification>, NotificationError> {
        Err(NotificationError::Unavailable("sink offline".to_string()))
    }

    fn mark_read(&self, _user: &UserId, _id: &NotificationId) -> Result<(), NotificationError> {
        Err(NotificationError::Unavailable("sink offline".to_string()))
    }
}

/// Job store that reports a duplicate on every append while delegating the
/// rest, simulating the conditional write losing a race the pre-check missed.
#[derive(Default)]
pub(super) struct RacingJobStore {
    inner: InMemoryJobStore,
}

impl JobStore for RacingJobStore {
    fn find_job(&self, id: &JobId) -> Result<Option<Job>, StoreError> {
        self.inner.find_job(id)
    }

    fn insert_job(&self, job: Job) -> Result<Job, StoreError> {
        self.inner.insert_job(job)
    }

    fn append_application(
        &self,
        _job_id: &JobId,
        _application: Application,
    ) -> Result<(), StoreError> {
        Err(StoreError::DuplicateApplication)
    }

    fn update_status(
        &self,
        job_id: &JobId,
        application_id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        self.inner.update_status(job_id, application_id, status)
    }
}

/// Job store that is down for every operation.
pub(super) struct UnavailableJobStore;

impl JobStore for UnavailableJobStore {
    fn find_job(&self, _id: &JobId) -> Result<Option<Job>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn insert_job(&self, _job: Job) -> Result<Job, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn append_application(
        &self,
        _job_id: &JobId,
        _application: Application,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn update_status(
        &self,
        _job_id: &JobId,
        _application_id: &ApplicationId,
        _status: ApplicationStatus,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}
