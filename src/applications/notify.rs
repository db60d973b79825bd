use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use super::domain::{Application, ApplicationStatus, Job};
use crate::notifications::{Notification, NotificationKind, NotificationStore};

/// Fire-and-forget side channel for application events.
///
/// Emission always runs after the primary write has been persisted. A storage
/// failure here is logged and discarded, never surfaced to the caller of the
/// triggering operation, and never retried: the application state is already
/// correct and losing a notification is the accepted trade.
pub struct NotificationEmitter<N> {
    store: Arc<N>,
}

impl<N> NotificationEmitter<N>
where
    N: NotificationStore,
{
    pub fn new(store: Arc<N>) -> Self {
        Self { store }
    }

    /// Tells the posting owner a new application arrived.
    pub fn application_received(&self, job: &Job, application: &Application) {
        let mut meta = BTreeMap::new();
        meta.insert("job_id".to_string(), job.id.0.clone());
        meta.insert(
            "applicant_id".to_string(),
            application.applicant.0.clone(),
        );
        meta.insert(
            "match_score".to_string(),
            application.match_score.to_string(),
        );

        self.deliver(Notification::new(
            job.posted_by.clone(),
            NotificationKind::Application,
            format!("New application for {}", job.title),
            format!(
                "{} has applied for {}. Match: {}%",
                application.applicant.0, job.title, application.match_score
            ),
            Some(format!("/jobs/{}/applicants", job.id.0)),
            meta,
        ));
    }

    /// Tells the applicant their application moved to a new status.
    pub fn status_changed(&self, job: &Job, application: &Application, status: ApplicationStatus) {
        let mut meta = BTreeMap::new();
        meta.insert("job_id".to_string(), job.id.0.clone());
        meta.insert("application_id".to_string(), application.id.0.clone());
        meta.insert("status".to_string(), status.label().to_string());

        self.deliver(Notification::new(
            application.applicant.clone(),
            NotificationKind::StatusChange,
            format!("Application status updated: {}", status.label()),
            format!(
                "Your application for {} is now \"{}\"",
                job.title,
                status.label()
            ),
            Some(format!("/jobs/{}", job.id.0)),
            meta,
        ));
    }

    fn deliver(&self, notification: Notification) {
        let recipient = notification.user.0.clone();
        if let Err(err) = self.store.create(notification) {
            warn!(%err, %recipient, "failed to persist notification");
        }
    }
}
