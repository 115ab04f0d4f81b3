//! In-memory task store (non-persistent).

use super::{apply_patch, new_task, StoreError, TaskStore};
use crate::task::{Task, TaskDraft, TaskPatch};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    // Tasks keyed by id, each tagged with its insertion sequence so that
    // listing stays deterministic when two tasks share a creation instant.
    tasks: Arc<RwLock<HashMap<String, (u64, Task)>>>,
    next_seq: Arc<AtomicU64>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    fn is_persistent(&self) -> bool {
        false
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let mut tagged: Vec<(u64, Task)> = self.tasks.read().await.values().cloned().collect();
        tagged.sort_by(|(a_seq, a), (b_seq, b)| {
            b.created_at.cmp(&a.created_at).then(b_seq.cmp(a_seq))
        });
        Ok(tagged.into_iter().map(|(_, task)| task).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(id).map(|(_, task)| task.clone()))
    }

    async fn create(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        let task = new_task(draft);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.tasks
            .write()
            .await
            .insert(task.id.clone(), (seq, task.clone()));
        Ok(task)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        let Some((_, task)) = tasks.get_mut(id) else {
            return Ok(None);
        };
        apply_patch(task, patch);
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.tasks.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Status;

    #[tokio::test]
    async fn behaves_like_the_sqlite_store() {
        let store = InMemoryTaskStore::new();
        let task = store.create(TaskDraft::new("in memory")).await.unwrap();
        assert_eq!(task.created_at, task.updated_at);

        let updated = store
            .update(&task.id, TaskPatch::status(Status::InProgress))
            .await
            .unwrap()
            .expect("task exists");
        assert_eq!(updated.status, Status::InProgress);

        assert!(store.delete(&task.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
        assert!(store
            .update(&task.id, TaskPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn list_order_is_stable_for_same_instant_creations() {
        let store = InMemoryTaskStore::new();

        // Tight loop: several creations can land on the same clock tick,
        // where created_at alone cannot order them.
        let mut ids = Vec::new();
        for i in 0..20 {
            let task = store
                .create(TaskDraft::new(format!("task {}", i)))
                .await
                .unwrap();
            ids.push(task.id);
        }
        ids.reverse();

        for _ in 0..3 {
            let listed: Vec<String> =
                store.list().await.unwrap().into_iter().map(|t| t.id).collect();
            assert_eq!(listed, ids);
        }
    }
}
