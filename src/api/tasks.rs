//! Task API endpoints.
//!
//! Provides the board operations:
//! - List tasks (optionally one column)
//! - Create task
//! - Get task details
//! - Move task between columns
//! - Soft-delete task

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::task::{validate_title, TaskStatus};

use super::error_response;
use super::routes::AppState;
use super::types::{CreateTaskRequest, TaskResponse, UpdateStatusRequest};

/// Create task routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tasks))
        .route("/", post(create_task))
        .route("/:id", get(get_task))
        .route("/:id", delete(delete_task))
        .route("/:id/status", post(update_status))
}

#[derive(Debug, Deserialize)]
struct ListTasksQuery {
    /// Restrict the listing to one column.
    status: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /api/tasks - List all live tasks, optionally filtered by status.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<Vec<TaskResponse>>, (StatusCode, String)> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(raw.parse::<TaskStatus>().map_err(error_response)?),
        None => None,
    };

    let tasks = state.store.list(status).await.map_err(error_response)?;
    let responses: Vec<TaskResponse> = tasks.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

/// POST /api/tasks - Create a new task (default column: todo).
async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<TaskResponse>, (StatusCode, String)> {
    let title = validate_title(&req.title).map_err(error_response)?;
    let status = req.status.unwrap_or_default();

    let task = state
        .store
        .create(&title, status)
        .await
        .map_err(error_response)?;

    tracing::info!("Created task {} in {}", task.id, task.status);

    Ok(Json(task.into()))
}

/// GET /api/tasks/:id - Get task details.
async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, (StatusCode, String)> {
    let task = state.store.get(&id).await.map_err(error_response)?;
    Ok(Json(task.into()))
}

/// POST /api/tasks/:id/status - Move a task to another column.
async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<TaskResponse>, (StatusCode, String)> {
    let task = state
        .store
        .set_status(&id, req.status)
        .await
        .map_err(error_response)?;

    tracing::info!("Moved task {} to {}", task.id, task.status);

    Ok(Json(task.into()))
}

/// DELETE /api/tasks/:id - Soft-delete a task.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, String), (StatusCode, String)> {
    state.store.soft_delete(&id).await.map_err(error_response)?;

    tracing::info!("Deleted task {}", id);

    Ok((StatusCode::OK, format!("Task {} deleted", id)))
}
