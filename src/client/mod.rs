//! Client-side task state management.
//!
//! [`TaskManager`] owns the copy of the collection the UI renders from,
//! but treats the server as ground truth: every mutating call waits for
//! the server response and writes the server-confirmed record back into
//! local state. A locally fabricated task never becomes final state.
//!
//! Identifier normalization (`_id` -> `id`) and timestamp parsing happen
//! here, on every ingress path. Downstream code keys exclusively on `id`,
//! so skipping that mapping would corrupt silently.

mod api;
mod local;

pub use api::TaskApi;
pub use local::{LocalTaskCache, STORAGE_KEY};

use crate::task::{Task, TaskDraft, TaskPatch, TaskRecord};

pub struct TaskManager {
    api: TaskApi,
    cache: Option<LocalTaskCache>,
    tasks: Vec<Task>,
}

impl TaskManager {
    pub fn new(api: TaskApi) -> Self {
        Self {
            api,
            cache: None,
            tasks: Vec::new(),
        }
    }

    /// Attach a persisted fallback. The collection is written back to it
    /// after every successful mutation and can be restored at startup via
    /// [`TaskManager::restore_local`].
    pub fn with_cache(mut self, cache: LocalTaskCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The current collection, newest-created first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn normalize(records: Vec<TaskRecord>) -> anyhow::Result<Vec<Task>> {
        records
            .into_iter()
            .map(|r| r.into_task().map_err(Into::into))
            .collect()
    }

    fn persist(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save(&self.tasks) {
                tracing::warn!("Failed to persist task collection: {}", e);
            }
        }
    }

    /// Replace local state from the persisted fallback, for startup with
    /// no backend wired in. Corrupt state loads as empty.
    pub fn restore_local(&mut self) {
        if let Some(cache) = &self.cache {
            self.tasks = cache.load();
        }
    }

    /// Fetch the full collection and replace local state wholesale.
    ///
    /// On any transport or normalization fault the error is logged, local
    /// state is left exactly as it was, and the failure is returned for
    /// user-visible feedback.
    pub async fn load_all(&mut self) -> anyhow::Result<()> {
        let records = match self.api.list().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Task load failed: {:#}", e);
                return Err(e);
            }
        };

        match Self::normalize(records) {
            Ok(tasks) => {
                self.tasks = tasks;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Abandoning task load, malformed record: {:#}", e);
                Err(e)
            }
        }
    }

    /// Create a task and prepend the server-confirmed record, preserving
    /// descending-creation order.
    pub async fn create(&mut self, draft: TaskDraft) -> anyhow::Result<Task> {
        let record = match self.api.create(&draft).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Task create failed: {:#}", e);
                return Err(e);
            }
        };
        let task = record.into_task()?;
        self.tasks.insert(0, task.clone());
        self.persist();
        Ok(task)
    }

    /// Apply a partial update and replace the matching local record with
    /// the server-confirmed version. `Ok(None)` means the identifier no
    /// longer exists server-side; local state is untouched.
    pub async fn update(&mut self, id: &str, patch: TaskPatch) -> anyhow::Result<Option<Task>> {
        let record = match self.api.update(id, &patch).await {
            Ok(Some(record)) => record,
            Ok(None) => return Ok(None),
            Err(e) => {
                tracing::warn!("Task update failed: {:#}", e);
                return Err(e);
            }
        };

        let task = record.into_task()?;
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == id) {
            *slot = task.clone();
        }
        self.persist();
        Ok(Some(task))
    }

    /// Delete a task and remove it from local state on acknowledgement.
    /// `Ok(false)` means the identifier no longer exists server-side.
    pub async fn delete(&mut self, id: &str) -> anyhow::Result<bool> {
        let deleted = match self.api.delete(id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                tracing::warn!("Task delete failed: {:#}", e);
                return Err(e);
            }
        };
        if deleted {
            self.tasks.retain(|t| t.id != id);
            self.persist();
        }
        Ok(deleted)
    }
}
