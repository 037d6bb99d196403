//! SQL data access for tasks.
//!
//! All functions take a `&Connection` and are stateless — pure translations
//! between Rust types and SQL. Soft-deleted rows (non-NULL `deleted_at`) are
//! invisible to every read here; deletion only ever sets the marker column.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::task::{new_task_id, Task, TaskError, TaskStatus};

/// Per-column live task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: u64,
    pub progress: u64,
    pub done: u64,
}

impl StatusCounts {
    pub fn total(self) -> u64 {
        self.todo + self.progress + self.done
    }
}

/// Insert a new task. The caller has already validated the title.
pub fn insert_task(conn: &Connection, title: &str, status: TaskStatus) -> Result<Task, TaskError> {
    let id = new_task_id();
    let now = to_sql_timestamp(Utc::now());
    conn.execute(
        "INSERT INTO tasks (id, title, status, created_at, updated_at, deleted_at)
         VALUES (?1, ?2, ?3, ?4, ?4, NULL)",
        params![id, title, status.as_str(), now],
    )?;

    fetch_task(conn, &id)?.ok_or_else(|| TaskError::NotFound(id))
}

/// Fetch a live task by id.
pub fn fetch_task(conn: &Connection, id: &str) -> Result<Option<Task>, TaskError> {
    let task = conn
        .query_row(
            "SELECT id, title, status, created_at, updated_at
             FROM tasks WHERE id = ?1 AND deleted_at IS NULL",
            params![id],
            task_from_row,
        )
        .optional()?;
    Ok(task)
}

/// List live tasks, optionally restricted to one status, in creation order.
pub fn list_tasks(conn: &Connection, status: Option<TaskStatus>) -> Result<Vec<Task>, TaskError> {
    let mut sql = String::from(
        "SELECT id, title, status, created_at, updated_at
         FROM tasks WHERE deleted_at IS NULL",
    );
    if status.is_some() {
        sql.push_str(" AND status = ?1");
    }
    // rowid breaks timestamp ties in insertion order
    sql.push_str(" ORDER BY created_at, rowid");

    let mut stmt = conn.prepare(&sql)?;
    let rows = match status {
        Some(s) => stmt.query_map(params![s.as_str()], task_from_row)?,
        None => stmt.query_map([], task_from_row)?,
    };

    let mut tasks = Vec::new();
    for row in rows {
        tasks.push(row?);
    }
    Ok(tasks)
}

/// Move a live task to a new status. Returns the updated task, or `None`
/// when the id is unknown or the task is soft-deleted.
pub fn set_status(
    conn: &Connection,
    id: &str,
    status: TaskStatus,
) -> Result<Option<Task>, TaskError> {
    let changed = conn.execute(
        "UPDATE tasks SET status = ?1, updated_at = ?2
         WHERE id = ?3 AND deleted_at IS NULL",
        params![status.as_str(), to_sql_timestamp(Utc::now()), id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    fetch_task(conn, id)
}

/// Soft-delete a live task. Returns false when the id is unknown or the
/// task was already deleted.
pub fn soft_delete(conn: &Connection, id: &str) -> Result<bool, TaskError> {
    let now = to_sql_timestamp(Utc::now());
    let changed = conn.execute(
        "UPDATE tasks SET deleted_at = ?1, updated_at = ?1
         WHERE id = ?2 AND deleted_at IS NULL",
        params![now, id],
    )?;
    Ok(changed > 0)
}

/// Count live tasks per status.
pub fn status_counts(conn: &Connection) -> Result<StatusCounts, TaskError> {
    let mut stmt = conn.prepare(
        "SELECT status, COUNT(*) FROM tasks WHERE deleted_at IS NULL GROUP BY status",
    )?;
    let rows = stmt.query_map([], |row| {
        let status: String = row.get(0)?;
        let count: u64 = row.get(1)?;
        Ok((status, count))
    })?;

    let mut counts = StatusCounts::default();
    for row in rows {
        let (status, count) = row?;
        match status.parse::<TaskStatus>() {
            Ok(TaskStatus::Todo) => counts.todo = count,
            Ok(TaskStatus::Progress) => counts.progress = count,
            Ok(TaskStatus::Done) => counts.done = count,
            // A stored label outside the enum is a corrupt row, not bad input.
            Err(e) => return Err(TaskError::Storage(conversion_failure(0, e))),
        }
    }
    Ok(counts)
}

/// Fixed-width RFC 3339 so lexicographic TEXT ordering matches time order.
fn to_sql_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let status_text: String = row.get(2)?;
    let status = status_text
        .parse::<TaskStatus>()
        .map_err(|e| conversion_failure(2, e))?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        status,
        created_at: timestamp_from_column(row, 3)?,
        updated_at: timestamp_from_column(row, 4)?,
    })
}

fn timestamp_from_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_failure(idx, e))
}

fn conversion_failure(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::init_schema;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn insert_returns_persisted_task() {
        let conn = setup_db();
        let task = insert_task(&conn, "Fix login", TaskStatus::Todo).unwrap();
        assert!(task.id.starts_with("task-"));
        assert_eq!(task.title, "Fix login");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.created_at, task.updated_at);

        let fetched = fetch_task(&conn, &task.id).unwrap().unwrap();
        assert_eq!(fetched.id, task.id);
        assert_eq!(fetched.status, TaskStatus::Todo);
    }

    #[test]
    fn fetch_unknown_id_is_none() {
        let conn = setup_db();
        assert!(fetch_task(&conn, "task-missing").unwrap().is_none());
    }

    #[test]
    fn list_orders_by_creation() {
        let conn = setup_db();
        let first = insert_task(&conn, "first", TaskStatus::Todo).unwrap();
        let second = insert_task(&conn, "second", TaskStatus::Done).unwrap();

        let all = list_tasks(&conn, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[test]
    fn list_filters_by_status() {
        let conn = setup_db();
        insert_task(&conn, "a", TaskStatus::Todo).unwrap();
        insert_task(&conn, "b", TaskStatus::Progress).unwrap();
        insert_task(&conn, "c", TaskStatus::Progress).unwrap();

        let in_progress = list_tasks(&conn, Some(TaskStatus::Progress)).unwrap();
        assert_eq!(in_progress.len(), 2);
        assert!(in_progress.iter().all(|t| t.status == TaskStatus::Progress));
    }

    #[test]
    fn set_status_moves_task_between_columns() {
        let conn = setup_db();
        let task = insert_task(&conn, "move me", TaskStatus::Todo).unwrap();

        let updated = set_status(&conn, &task.id, TaskStatus::Done)
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Done);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn set_status_unknown_id_is_none() {
        let conn = setup_db();
        assert!(set_status(&conn, "task-missing", TaskStatus::Done)
            .unwrap()
            .is_none());
    }

    #[test]
    fn soft_delete_hides_task_from_reads() {
        let conn = setup_db();
        let task = insert_task(&conn, "bye", TaskStatus::Todo).unwrap();

        assert!(soft_delete(&conn, &task.id).unwrap());
        assert!(fetch_task(&conn, &task.id).unwrap().is_none());
        assert!(list_tasks(&conn, None).unwrap().is_empty());

        // The row is still there, only marked.
        let raw: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM tasks WHERE id = ?1 AND deleted_at IS NOT NULL",
                params![task.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(raw, 1);
    }

    #[test]
    fn soft_delete_twice_reports_missing() {
        let conn = setup_db();
        let task = insert_task(&conn, "once", TaskStatus::Todo).unwrap();
        assert!(soft_delete(&conn, &task.id).unwrap());
        assert!(!soft_delete(&conn, &task.id).unwrap());
    }

    #[test]
    fn set_status_on_deleted_task_is_none() {
        let conn = setup_db();
        let task = insert_task(&conn, "gone", TaskStatus::Todo).unwrap();
        soft_delete(&conn, &task.id).unwrap();
        assert!(set_status(&conn, &task.id, TaskStatus::Done)
            .unwrap()
            .is_none());
    }

    #[test]
    fn counts_exclude_deleted_tasks() {
        let conn = setup_db();
        insert_task(&conn, "a", TaskStatus::Todo).unwrap();
        insert_task(&conn, "b", TaskStatus::Progress).unwrap();
        let doomed = insert_task(&conn, "c", TaskStatus::Done).unwrap();
        soft_delete(&conn, &doomed.id).unwrap();

        let counts = status_counts(&conn).unwrap();
        assert_eq!(counts.todo, 1);
        assert_eq!(counts.progress, 1);
        assert_eq!(counts.done, 0);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn corrupt_timestamp_surfaces_as_storage_error() {
        let conn = setup_db();
        conn.execute(
            "INSERT INTO tasks (id, title, status, created_at, updated_at, deleted_at)
             VALUES ('task-bad', 'bad', 'todo', 'not-a-date', 'not-a-date', NULL)",
            [],
        )
        .unwrap();

        let err = fetch_task(&conn, "task-bad").unwrap_err();
        assert!(matches!(err, TaskError::Storage(_)));
    }
}
