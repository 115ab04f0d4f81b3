//! Task storage module with pluggable backends.
//!
//! Supports:
//! - `memory`: In-memory storage (non-persistent, for testing)
//! - `sqlite`: SQLite database (the production backend)

mod memory;
mod sqlite;

pub use memory::InMemoryTaskStore;
pub use sqlite::SqliteTaskStore;

use crate::task::{Task, TaskDraft, TaskPatch};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by a task store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// Task store trait - implemented by all storage backends.
///
/// Every call is its own isolated operation: no multi-record transactions,
/// no cascading effects. A missing identifier on `update`/`delete` is a
/// distinct outcome (`None`/`false`), not an error.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Whether this store persists data across restarts.
    fn is_persistent(&self) -> bool;

    /// All tasks, newest-created first.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// A single task by identifier.
    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError>;

    /// Create a task: assigns the identifier and both timestamps
    /// (`created_at == updated_at` on the fresh record), applies the
    /// draft's defaults, starts in pending status.
    async fn create(&self, draft: TaskDraft) -> Result<Task, StoreError>;

    /// Merge the supplied fields into an existing record and refresh
    /// `updated_at`. Returns `None` when no task with `id` exists.
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Option<Task>, StoreError>;

    /// Remove the record permanently. Returns `false` (and has no side
    /// effect) when no task with `id` exists.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}

/// Apply a partial update to a task in place and refresh `updated_at`.
pub(crate) fn apply_patch(task: &mut Task, patch: TaskPatch) {
    if let Some(title) = patch.title {
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = Some(description);
    }
    if let Some(category) = patch.category {
        task.category = category;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(status) = patch.status {
        task.status = status;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = Some(due_date);
    }
    task.updated_at = chrono::Utc::now();
}

pub(crate) fn new_task(draft: TaskDraft) -> Task {
    let now = chrono::Utc::now();
    Task {
        id: uuid::Uuid::new_v4().to_string(),
        title: draft.title,
        description: draft.description,
        category: draft.category,
        priority: draft.priority,
        status: crate::task::Status::Pending,
        due_date: draft.due_date,
        created_at: now,
        updated_at: now,
    }
}
