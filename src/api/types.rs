//! Request and response types shared across API handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::StatusCounts;
use crate::task::{Task, TaskStatus};

/// Body for `POST /api/tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    /// Column to create the task in (defaults to `todo`).
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

/// Body for `POST /api/tasks/:id/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: TaskStatus,
}

/// Task as it appears on the wire. The soft-deletion marker never leaves
/// the server; deleted tasks are simply absent.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            status: task.status,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Response for `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Response for `GET /api/stats`: live task counts per board column.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub todo: u64,
    pub progress: u64,
    pub done: u64,
    pub total: u64,
}

impl From<StatusCounts> for StatsResponse {
    fn from(counts: StatusCounts) -> Self {
        Self {
            todo: counts.todo,
            progress: counts.progress,
            done: counts.done,
            total: counts.total(),
        }
    }
}
