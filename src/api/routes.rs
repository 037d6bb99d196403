//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::TaskStore;

use super::tasks;
use super::types::{HealthResponse, StatsResponse};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: TaskStore,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store = TaskStore::open(&config.database_path)?;

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
    });

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/stats", get(get_stats))
        .nest("/api/tasks", tasks::routes())
        // Browser client: static assets, no build step
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    // Setup graceful shutdown on SIGTERM/SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for a shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Get per-column task counts.
async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    let counts = state
        .store
        .status_counts()
        .await
        .map_err(super::error_response)?;
    Ok(Json(counts.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    #[tokio::test]
    async fn health_reports_crate_version() {
        let Json(resp) = health().await;
        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn stats_counts_live_tasks() {
        let state = Arc::new(AppState {
            config: Config::default(),
            store: TaskStore::open_in_memory().unwrap(),
        });
        state.store.create("a", TaskStatus::Todo).await.unwrap();
        state.store.create("b", TaskStatus::Done).await.unwrap();
        let doomed = state.store.create("c", TaskStatus::Done).await.unwrap();
        state.store.soft_delete(&doomed.id).await.unwrap();

        let Json(stats) = get_stats(State(state)).await.unwrap();
        assert_eq!(stats.todo, 1);
        assert_eq!(stats.progress, 0);
        assert_eq!(stats.done, 1);
        assert_eq!(stats.total, 2);
    }
}
