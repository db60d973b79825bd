use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;

use super::domain::{Actor, ApplicationId, ApplicationPayload, JobDraft, JobId, Role, UserId};
use super::ranking::SortKey;
use super::repository::{JobStore, ProfileDirectory};
use super::service::{BoardError, JobBoardService};
use crate::notifications::NotificationStore;

/// Router builder exposing the job-board actions.
pub fn board_router<S, N, P>(service: Arc<JobBoardService<S, N, P>>) -> Router
where
    S: JobStore + 'static,
    N: NotificationStore + 'static,
    P: ProfileDirectory + 'static,
{
    Router::new()
        .route("/api/v1/jobs", post(post_job_handler::<S, N, P>))
        .route(
            "/api/v1/jobs/:job_id/applications",
            post(apply_handler::<S, N, P>),
        )
        .route(
            "/api/v1/jobs/:job_id/applicants",
            get(list_applicants_handler::<S, N, P>),
        )
        .route(
            "/api/v1/jobs/:job_id/applications/:application_id/status",
            patch(update_status_handler::<S, N, P>),
        )
        .with_state(service)
}

/// Reads the identity the upstream auth layer injected into the request.
/// Requests without a usable identity never reach the service.
pub(crate) fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, Response> {
    let id = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty());
    let role = headers
        .get("x-user-role")
        .and_then(|value| value.to_str().ok())
        .and_then(Role::parse);

    match (id, role) {
        (Some(id), Some(role)) => Ok(Actor {
            id: UserId(id.to_string()),
            role,
        }),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "error": "missing or invalid caller identity" })),
        )
            .into_response()),
    }
}

fn error_response(error: BoardError) -> Response {
    let status = match &error {
        BoardError::NotFound => StatusCode::NOT_FOUND,
        BoardError::Forbidden(_) => StatusCode::FORBIDDEN,
        BoardError::DuplicateApplication => StatusCode::CONFLICT,
        BoardError::InvalidStatus(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BoardError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}

pub(crate) async fn post_job_handler<S, N, P>(
    State(service): State<Arc<JobBoardService<S, N, P>>>,
    headers: HeaderMap,
    axum::Json(draft): axum::Json<JobDraft>,
) -> Response
where
    S: JobStore + 'static,
    N: NotificationStore + 'static,
    P: ProfileDirectory + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match service.post_job(&actor, draft) {
        Ok(job) => (StatusCode::CREATED, axum::Json(job)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn apply_handler<S, N, P>(
    State(service): State<Arc<JobBoardService<S, N, P>>>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
    axum::Json(payload): axum::Json<ApplicationPayload>,
) -> Response
where
    S: JobStore + 'static,
    N: NotificationStore + 'static,
    P: ProfileDirectory + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match service.submit_application(&actor, &JobId(job_id), payload) {
        Ok(application) => (
            StatusCode::CREATED,
            axum::Json(json!({
                "application_id": application.id,
                "match_score": application.match_score,
                "matched_keywords": application.matched_keywords,
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    sort: Option<String>,
}

pub(crate) async fn list_applicants_handler<S, N, P>(
    State(service): State<Arc<JobBoardService<S, N, P>>>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response
where
    S: JobStore + 'static,
    N: NotificationStore + 'static,
    P: ProfileDirectory + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    let sort = SortKey::parse(query.sort.as_deref());
    match service.list_applicants(&actor, &JobId(job_id), sort) {
        Ok(roster) => (StatusCode::OK, axum::Json(roster)).into_response(),
        Err(error) => error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusBody {
    status: String,
}

pub(crate) async fn update_status_handler<S, N, P>(
    State(service): State<Arc<JobBoardService<S, N, P>>>,
    headers: HeaderMap,
    Path((job_id, application_id)): Path<(String, String)>,
    axum::Json(body): axum::Json<StatusBody>,
) -> Response
where
    S: JobStore + 'static,
    N: NotificationStore + 'static,
    P: ProfileDirectory + 'static,
{
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response,
    };

    match service.transition_status(
        &actor,
        &JobId(job_id),
        &ApplicationId(application_id),
        &body.status,
    ) {
        Ok(status) => (
            StatusCode::OK,
            axum::Json(json!({
                "message": "status updated",
                "status": status.label(),
            })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}
