//! Standalone notification records and their read side.
//!
//! Notifications are created only by the emitter in the applications module
//! and live independently of the job that caused them. Nothing mutates a
//! record after creation except the read flag, and only the recipient can
//! flip that.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::applications::domain::UserId;
use crate::applications::router::actor_from_headers;

/// Identifier wrapper for notification records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub String);

static NOTIFICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_notification_id() -> NotificationId {
    let id = NOTIFICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    NotificationId(format!("ntf-{id:06}"))
}

/// Event categories a notification can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Application,
    StatusChange,
}

impl NotificationKind {
    pub const fn label(self) -> &'static str {
        match self {
            NotificationKind::Application => "application",
            NotificationKind::StatusChange => "status_change",
        }
    }
}

/// Best-effort informational record addressed to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub read: bool,
    pub meta: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user: UserId,
        kind: NotificationKind,
        title: String,
        body: String,
        link: Option<String>,
        meta: BTreeMap<String, String>,
    ) -> Self {
        Self {
            id: next_notification_id(),
            user,
            kind,
            title,
            body,
            link,
            read: false,
            meta,
            created_at: Utc::now(),
        }
    }
}

/// Storage abstraction for notification records.
pub trait NotificationStore: Send + Sync {
    fn create(&self, notification: Notification) -> Result<(), NotificationError>;

    /// A user's notifications, newest first, bounded by `limit`.
    fn list_for(&self, user: &UserId, limit: usize) -> Result<Vec<Notification>, NotificationError>;

    /// Marks one of the recipient's notifications read. Anyone else's id
    /// resolves to `NotFound`.
    fn mark_read(&self, user: &UserId, id: &NotificationId) -> Result<(), NotificationError>;
}

/// Error enumeration for notification store failures.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification not found")]
    NotFound,
    #[error("notification store unavailable: {0}")]
    Unavailable(String),
}

/// Reference adapter storing notifications in creation order.
#[derive(Default)]
pub struct InMemoryNotificationStore {
    records: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationStore {
    /// Every stored record in creation order, for assertions in tests.
    pub fn all(&self) -> Vec<Notification> {
        self.records
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

impl NotificationStore for InMemoryNotificationStore {
    fn create(&self, notification: Notification) -> Result<(), NotificationError> {
        self.records
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }

    fn list_for(&self, user: &UserId, limit: usize) -> Result<Vec<Notification>, NotificationError> {
        let guard = self.records.lock().expect("notification mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| &record.user == user)
            .take(limit)
            .cloned()
            .collect())
    }

    fn mark_read(&self, user: &UserId, id: &NotificationId) -> Result<(), NotificationError> {
        let mut guard = self.records.lock().expect("notification mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| &record.id == id && &record.user == user)
            .ok_or(NotificationError::NotFound)?;

        record.read = true;
        Ok(())
    }
}

/// Router state for the notification read side.
pub struct NotificationsState<N> {
    pub store: Arc<N>,
    pub page_limit: usize,
}

impl<N> Clone for NotificationsState<N> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            page_limit: self.page_limit,
        }
    }
}

/// Router builder exposing a user's notification feed.
pub fn notification_router<N>(store: Arc<N>, page_limit: usize) -> Router
where
    N: NotificationStore + 'static,
{
    Router::new()
        .route("/api/v1/notifications", get(list_handler::<N>))
        .route(
            "/api/v1/notifications/:notification_id/read",
            post(mark_read_handler::<N>),
        )
        .with_state(NotificationsState { store, page_limit })
}

pub(crate) async fn list_handler<N>(
    State(state): State<NotificationsState<N>>,
    headers: HeaderMap,
) -> Response
where
    N: NotificationStore + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match state.store.list_for(&actor.id, state.page_limit) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

pub(crate) async fn mark_read_handler<N>(
    State(state): State<NotificationsState<N>>,
    headers: HeaderMap,
    Path(notification_id): Path<String>,
) -> Response
where
    N: NotificationStore + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match state
        .store
        .mark_read(&actor.id, &NotificationId(notification_id))
    {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(json!({ "message": "marked read" })),
        )
            .into_response(),
        Err(NotificationError::NotFound) => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": "notification not found" })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_for(user: &str, title: &str) -> Notification {
        Notification::new(
            UserId(user.to_string()),
            NotificationKind::Application,
            title.to_string(),
            "body".to_string(),
            None,
            BTreeMap::new(),
        )
    }

    #[test]
    fn list_returns_newest_first_and_respects_limit() {
        let store = InMemoryNotificationStore::default();
        store.create(record_for("u-1", "first")).expect("create");
        store.create(record_for("u-2", "other user")).expect("create");
        store.create(record_for("u-1", "second")).expect("create");
        store.create(record_for("u-1", "third")).expect("create");

        let listed = store
            .list_for(&UserId("u-1".to_string()), 2)
            .expect("list succeeds");

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].title, "third");
        assert_eq!(listed[1].title, "second");
    }

    #[test]
    fn mark_read_is_scoped_to_the_recipient() {
        let store = InMemoryNotificationStore::default();
        let record = record_for("u-1", "hello");
        let id = record.id.clone();
        store.create(record).expect("create");

        let stranger = store.mark_read(&UserId("u-2".to_string()), &id);
        assert!(matches!(stranger, Err(NotificationError::NotFound)));

        store
            .mark_read(&UserId("u-1".to_string()), &id)
            .expect("recipient can mark read");
        assert!(store.all()[0].read);
    }

    #[test]
    fn new_records_start_unread() {
        let record = record_for("u-1", "hello");
        assert!(!record.read);
        assert_eq!(record.kind.label(), "application");
    }
}
