//! Task domain types.
//!
//! A task is the single persisted entity: an opaque id, a bounded title, and
//! a board status. Tasks are mutated only through status transitions and
//! soft deletion; rows are never removed from the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Errors produced by the task domain and storage layer.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("title exceeds {TITLE_MAX_CHARS} characters")]
    TitleTooLong,

    #[error("unknown status '{0}' (expected todo, progress, or done)")]
    UnknownStatus(String),

    #[error("task {0} not found")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// Board column a task belongs to. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Progress,
    Done,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::Progress, TaskStatus::Done];

    /// Wire and SQL representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Progress => "progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "progress" => Ok(TaskStatus::Progress),
            "done" => Ok(TaskStatus::Done),
            other => Err(TaskError::UnknownStatus(other.to_string())),
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// A live (non-deleted) task. Soft-deleted rows never materialize as `Task`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Generate a new opaque task id.
pub fn new_task_id() -> String {
    format!("task-{}", Uuid::new_v4())
}

/// Validate and normalize a title: trimmed, non-empty, bounded.
pub fn validate_title(raw: &str) -> Result<String, TaskError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(TaskError::TitleTooLong);
    }
    Ok(title.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_rejects_unknown_label() {
        let err = "doing".parse::<TaskStatus>().unwrap_err();
        assert!(matches!(err, TaskError::UnknownStatus(s) if s == "doing"));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Progress).unwrap(),
            "\"progress\""
        );
    }

    #[test]
    fn validate_title_trims_whitespace() {
        assert_eq!(validate_title("  fix login  ").unwrap(), "fix login");
    }

    #[test]
    fn validate_title_rejects_empty() {
        assert!(matches!(validate_title("   "), Err(TaskError::EmptyTitle)));
    }

    #[test]
    fn validate_title_rejects_over_limit() {
        let long = "x".repeat(TITLE_MAX_CHARS + 1);
        assert!(matches!(validate_title(&long), Err(TaskError::TitleTooLong)));
        // Exactly at the limit is fine.
        let at_limit = "x".repeat(TITLE_MAX_CHARS);
        assert!(validate_title(&at_limit).is_ok());
    }

    #[test]
    fn task_ids_are_prefixed_and_unique() {
        let a = new_task_id();
        let b = new_task_id();
        assert!(a.starts_with("task-"));
        assert_ne!(a, b);
    }
}
