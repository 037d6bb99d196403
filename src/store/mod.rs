//! SQLite-backed task storage.
//!
//! [`TaskStore`] owns the connection behind a `tokio::sync::Mutex` and adapts
//! the stateless repository functions for handler use; absent rows come back
//! as [`TaskError::NotFound`] so the API layer only maps errors.

mod repository;

pub use repository::StatusCounts;

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::task::{Task, TaskError, TaskStatus};

const SCHEMA_VERSION: i32 = 1;

/// Create the schema if this database is older than the current revision.
pub(crate) fn init_schema(conn: &Connection) -> Result<(), TaskError> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version < SCHEMA_VERSION {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tasks (
                 id         TEXT PRIMARY KEY,
                 title      TEXT NOT NULL,
                 status     TEXT NOT NULL,
                 created_at TEXT NOT NULL,
                 updated_at TEXT NOT NULL,
                 deleted_at TEXT
             );
             CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
             PRAGMA user_version = 1;",
        )?;
    }
    Ok(())
}

/// Shared task store over a single SQLite connection.
#[derive(Debug)]
pub struct TaskStore {
    conn: Mutex<Connection>,
}

impl TaskStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self, TaskError> {
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        tracing::info!("Task store opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store. Contents vanish when the store is dropped.
    pub fn open_in_memory() -> Result<Self, TaskError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        tracing::info!("Task store opened in memory");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a task with a validated title.
    pub async fn create(&self, title: &str, status: TaskStatus) -> Result<Task, TaskError> {
        let conn = self.conn.lock().await;
        repository::insert_task(&conn, title, status)
    }

    /// Fetch a live task by id.
    pub async fn get(&self, id: &str) -> Result<Task, TaskError> {
        let conn = self.conn.lock().await;
        repository::fetch_task(&conn, id)?.ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// List live tasks, optionally restricted to one status.
    pub async fn list(&self, status: Option<TaskStatus>) -> Result<Vec<Task>, TaskError> {
        let conn = self.conn.lock().await;
        repository::list_tasks(&conn, status)
    }

    /// Move a live task to a new status.
    pub async fn set_status(&self, id: &str, status: TaskStatus) -> Result<Task, TaskError> {
        let conn = self.conn.lock().await;
        repository::set_status(&conn, id, status)?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Soft-delete a live task.
    pub async fn soft_delete(&self, id: &str) -> Result<(), TaskError> {
        let conn = self.conn.lock().await;
        if repository::soft_delete(&conn, id)? {
            Ok(())
        } else {
            Err(TaskError::NotFound(id.to_string()))
        }
    }

    /// Count live tasks per status.
    pub async fn status_counts(&self) -> Result<StatusCounts, TaskError> {
        let conn = self.conn.lock().await;
        repository::status_counts(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");

        let created = {
            let store = TaskStore::open(&path).unwrap();
            store.create("persisted", TaskStatus::Progress).await.unwrap()
        };

        let store = TaskStore::open(&path).unwrap();
        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched.title, "persisted");
        assert_eq!(fetched.status, TaskStatus::Progress);
    }

    #[tokio::test]
    async fn missing_rows_map_to_not_found() {
        let store = TaskStore::open_in_memory().unwrap();

        let err = store.get("task-missing").await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));

        let err = store
            .set_status("task-missing", TaskStatus::Done)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));

        let err = store.soft_delete("task-missing").await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }
}
