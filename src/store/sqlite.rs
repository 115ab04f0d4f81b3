//! SQLite-backed task store.

use super::{apply_patch, new_task, StoreError, TaskStore};
use crate::task::{Category, Priority, Status, Task, TaskDraft, TaskPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

const SCHEMA: &str = r#"
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    category TEXT NOT NULL DEFAULT 'work',
    priority TEXT NOT NULL DEFAULT 'medium',
    status TEXT NOT NULL DEFAULT 'pending',
    due_date TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at DESC);
"#;

/// Task store on a single SQLite database file. All access is serialized
/// behind one connection lock; each call is one isolated statement, so
/// conflicting edits to the same identifier resolve last-write-wins.
pub struct SqliteTaskStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTaskStore {
    pub async fn new(db_path: PathBuf) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::Backend(format!("create store dir: {}", e)))?;
            }
        }

        // Open database in a blocking task
        let conn = tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path)?;
            conn.execute_batch(SCHEMA)?;
            Ok::<_, rusqlite::Error>(conn)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("task join error: {}", e)))??;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn row_to_task(row: &Row<'_>) -> Result<Task, rusqlite::Error> {
        let category: String = row.get("category")?;
        let priority: String = row.get("priority")?;
        let status: String = row.get("status")?;
        let due_date: Option<String> = row.get("due_date")?;
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;

        Ok(Task {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            category: Category::parse(&category).unwrap_or_default(),
            priority: Priority::parse(&priority).unwrap_or_default(),
            status: Status::parse(&status).unwrap_or_default(),
            due_date: due_date.as_deref().map(parse_stored_timestamp).transpose()?,
            created_at: parse_stored_timestamp(&created_at)?,
            updated_at: parse_stored_timestamp(&updated_at)?,
        })
    }
}

fn parse_stored_timestamp(value: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    fn is_persistent(&self) -> bool {
        true
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt =
            conn.prepare("SELECT * FROM tasks ORDER BY created_at DESC, rowid DESC")?;
        let tasks = stmt
            .query_map([], |row| Self::row_to_task(row))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let conn = self.conn.lock().await;
        let task = conn
            .query_row("SELECT * FROM tasks WHERE id = ?1", params![id], |row| {
                Self::row_to_task(row)
            })
            .optional()?;
        Ok(task)
    }

    async fn create(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = new_task(draft);
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO tasks (id, title, description, category, priority, status, due_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.title,
                task.description,
                task.category.as_str(),
                task.priority.as_str(),
                task.status.as_str(),
                task.due_date.map(|dt| dt.to_rfc3339()),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(task)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Option<Task>, StoreError> {
        // Single lock span: the read-merge-write below is atomic with
        // respect to other store calls.
        let conn = self.conn.lock().await;
        let existing = conn
            .query_row("SELECT * FROM tasks WHERE id = ?1", params![id], |row| {
                Self::row_to_task(row)
            })
            .optional()?;

        let Some(mut task) = existing else {
            return Ok(None);
        };
        apply_patch(&mut task, patch);

        conn.execute(
            "UPDATE tasks SET title = ?2, description = ?3, category = ?4, priority = ?5,
             status = ?6, due_date = ?7, updated_at = ?8 WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.category.as_str(),
                task.priority.as_str(),
                task.status.as_str(),
                task.due_date.map(|dt| dt.to_rfc3339()),
                task.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(Some(task))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let affected = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}
