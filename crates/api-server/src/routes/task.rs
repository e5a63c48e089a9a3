//! Task API endpoints
//!
//! RESTful API for task CRUD operations. Mutating routes sit behind the
//! API-key gate; reads are public.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use tasks_core::task::{Task, TaskId, TaskPatch, STATUS_COMPLETED, STATUS_PENDING};
use tasks_core::Error;

use super::ErrorResponse;
use crate::middleware::require_api_key;
use crate::state::AppState;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub is_done: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct ListTasksQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

type RouteError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> RouteError {
    (status, Json(ErrorResponse::new(message)))
}

fn not_found() -> RouteError {
    error(StatusCode::NOT_FOUND, "task not found")
}

/// Ids are plain decimal digits that fit in 32 bits; signs are rejected
fn parse_id(raw: &str) -> Result<TaskId, RouteError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(error(StatusCode::BAD_REQUEST, "invalid id"));
    }
    raw.parse::<u32>()
        .map(TaskId::from)
        .map_err(|_| error(StatusCode::BAD_REQUEST, "invalid id"))
}

impl ListTasksQuery {
    /// Page and limit after falling back to defaults
    ///
    /// A limit below the default is replaced by the default, so pages
    /// smaller than ten cannot be requested.
    fn resolve(&self) -> (i64, i64) {
        let page = self
            .page
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let limit = self
            .limit
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|limit| *limit >= DEFAULT_LIMIT)
            .unwrap_or(DEFAULT_LIMIT);
        (page, limit)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/tasks - List tasks one page at a time
async fn list_tasks(
    State(state): State<AppState>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<Task>>>, RouteError> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let (page, limit) = query.resolve();

    let tasks = state
        .task_service()
        .list_tasks(page, limit)
        .await
        .map_err(|e| error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(DataResponse { data: tasks }))
}

/// POST /api/tasks - Create a new task
///
/// A whitespace-only title passes request validation and is rejected by the
/// service. That rejection is answered with 400 rather than the 500 used for
/// every other service error, so only store failures are 500.
async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Task>>), RouteError> {
    let validation_failed = |details: String| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Validation failed").with_details(details)),
        )
    };

    let Json(req) = body.map_err(|rejection| validation_failed(rejection.body_text()))?;
    if req.title.is_empty() {
        return Err(validation_failed("title must not be empty".to_string()));
    }

    let status = if req.is_done {
        STATUS_COMPLETED
    } else {
        STATUS_PENDING
    };
    let task = Task::new(req.title).with_status(status);

    let created = state
        .task_service()
        .create_task(task)
        .await
        .map_err(|e| match e {
            Error::TitleRequired => error(StatusCode::BAD_REQUEST, e.to_string()),
            _ => error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/tasks/{id} - Get a single task
async fn get_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DataResponse<Task>>, RouteError> {
    let id = parse_id(&raw_id)?;

    let task = state.task_service().get_task(id).await.map_err(|e| {
        if !e.is_not_found() {
            tracing::warn!("Failed to load task {}: {}", id, e);
        }
        not_found()
    })?;

    Ok(Json(DataResponse { data: task }))
}

/// PUT /api/tasks/{id} - Replace title, description and status
async fn update_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<DataResponse<Task>>, RouteError> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = body.map_err(|_| error(StatusCode::BAD_REQUEST, "invalid payload"))?;

    let updated = state
        .task_service()
        .update_task(id, patch)
        .await
        .map_err(|e| match e {
            Error::TaskNotFound(_) => not_found(),
            _ => error(StatusCode::BAD_REQUEST, e.to_string()),
        })?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/tasks/{id} - Soft-delete a task
async fn delete_task(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, RouteError> {
    let id = parse_id(&raw_id)?;

    state.task_service().delete_task(id).await.map_err(|e| {
        if !e.is_not_found() {
            tracing::warn!("Failed to delete task {}: {}", id, e);
        }
        not_found()
    })?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/tasks", get(list_tasks))
        .route("/api/tasks/{id}", get(get_task));

    let protected = Router::new()
        .route("/api/tasks", post(create_task))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
        .route_layer(axum::middleware::from_fn_with_state(state, require_api_key));

    public.merge(protected)
}
