//! Application intake, scoring, lifecycle, and applicant ranking.
//!
//! A submission flows keyword extraction -> match scoring -> conditional
//! append on the owning job document -> fire-and-forget notification. A
//! status change flows straight into the ledger and then the same
//! fire-and-forget channel.

pub mod domain;
pub mod notify;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Actor, Application, ApplicationId, ApplicationPayload, ApplicationStatus, Job, JobDraft, JobId,
    Role, UserId,
};
pub use notify::NotificationEmitter;
pub use ranking::{rank_applications, ApplicantRoster, ApplicationView, SortKey};
pub use repository::{
    DirectoryError, InMemoryJobStore, InMemoryProfiles, JobStore, ProfileDirectory, StoreError,
};
pub use router::board_router;
pub use service::{BoardError, JobBoardService};
