//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::{SqliteTaskStore, StoreError, TaskStore};
use crate::task::{TaskDraft, TaskPatch, TaskRecord};

use super::types::{DeleteResponse, HealthResponse};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The task store backend
    pub store: Arc<dyn TaskStore>,
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store: Arc<dyn TaskStore> = Arc::new(SqliteTaskStore::new(config.db_path.clone()).await?);
    tracing::info!("Task store opened at {}", config.db_path.display());

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
    });

    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the router. Split out of [`serve`] so tests can mount it on an
/// ephemeral listener with their own store backend.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/tasks", get(list_tasks))
        .route("/api/tasks", post(create_task))
        .route("/api/tasks/:id", put(update_task))
        .route("/api/tasks/:id", delete(delete_task))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wait for shutdown signal.
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

/// Map a store fault onto a 500. The detail goes to the log, not the body.
fn internal_error(e: StoreError) -> (StatusCode, String) {
    tracing::error!("Store error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List all tasks, newest-created first.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaskRecord>>, (StatusCode, String)> {
    let tasks = state.store.list().await.map_err(internal_error)?;
    Ok(Json(tasks.iter().map(TaskRecord::from).collect()))
}

/// Create a new task.
async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<TaskDraft>,
) -> Result<(StatusCode, Json<TaskRecord>), (StatusCode, String)> {
    // Title presence is the only required-field constraint; enum membership
    // is already enforced by deserialization into the typed draft.
    if draft.title.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "title is required".to_string()));
    }

    tracing::debug!("Creating task: {}", draft.title);
    let task = state.store.create(draft).await.map_err(internal_error)?;
    Ok((StatusCode::CREATED, Json(TaskRecord::from(&task))))
}

/// Apply a partial update and return the full post-update record.
async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<TaskRecord>, (StatusCode, String)> {
    match state.store.update(&id, patch).await.map_err(internal_error)? {
        Some(task) => Ok(Json(TaskRecord::from(&task))),
        None => Err((StatusCode::NOT_FOUND, format!("Task {} not found", id))),
    }
}

/// Delete a task.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, (StatusCode, String)> {
    if state.store.delete(&id).await.map_err(internal_error)? {
        Ok(Json(DeleteResponse {
            message: "Task deleted".to_string(),
        }))
    } else {
        Err((StatusCode::NOT_FOUND, format!("Task {} not found", id)))
    }
}
