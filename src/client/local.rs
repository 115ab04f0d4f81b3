//! Persisted fallback for the client-held collection.
//!
//! The full collection is serialized as a single JSON array under a fixed
//! storage key. Corrupt content is logged and discarded; the collection
//! then starts empty rather than propagating the failure.

use std::path::{Path, PathBuf};

use crate::task::Task;

/// Fixed storage key the collection lives under.
pub const STORAGE_KEY: &str = "tasknest-tasks";

#[derive(Debug, Clone)]
pub struct LocalTaskCache {
    storage_path: PathBuf,
}

impl LocalTaskCache {
    /// Cache file `<dir>/tasknest-tasks.json`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            storage_path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Load the persisted collection. A missing file is an empty
    /// collection; an unparseable one is discarded with a warning.
    pub fn load(&self) -> Vec<Task> {
        if !self.storage_path.exists() {
            return Vec::new();
        }

        let contents = match std::fs::read_to_string(&self.storage_path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Failed to read persisted tasks: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!("Discarding corrupt persisted tasks: {}", e);
                Vec::new()
            }
        }
    }

    /// Save the full collection, replacing whatever was there.
    pub fn save(&self, tasks: &[Task]) -> std::io::Result<()> {
        if let Some(parent) = self.storage_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(tasks)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        std::fs::write(&self.storage_path, contents)?;
        Ok(())
    }
}
