//! HTTP API: router assembly, task endpoints, and wire types.

pub mod routes;
pub mod tasks;
pub mod types;

use axum::http::StatusCode;

use crate::task::TaskError;

/// Map a domain error to an HTTP response tuple.
///
/// Storage failures are logged here and deliberately not echoed to clients.
pub(crate) fn error_response(err: TaskError) -> (StatusCode, String) {
    match err {
        TaskError::EmptyTitle | TaskError::TitleTooLong | TaskError::UnknownStatus(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        TaskError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        TaskError::Storage(e) => {
            tracing::error!("Storage error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage error".to_string(),
            )
        }
    }
}
