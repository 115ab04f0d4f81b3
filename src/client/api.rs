//! REST client for the task API (minimal adapter).
//!
//! Speaks the wire shapes from [`crate::task`]; normalization into the
//! canonical [`crate::task::Task`] happens in the state manager, not here.

use anyhow::Context;
use reqwest::StatusCode;

use crate::task::{TaskDraft, TaskPatch, TaskRecord};

#[derive(Clone)]
pub struct TaskApi {
    base_url: String,
    client: reqwest::Client,
}

impl TaskApi {
    /// `base_url` includes the `/api` prefix, e.g. `http://127.0.0.1:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /api/tasks
    pub async fn list(&self) -> anyhow::Result<Vec<TaskRecord>> {
        let url = format!("{}/tasks", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to call GET /tasks")?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("GET /tasks failed: {} - {}", status, text);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse task list response: {}", text))
    }

    /// POST /api/tasks
    pub async fn create(&self, draft: &TaskDraft) -> anyhow::Result<TaskRecord> {
        let url = format!("{}/tasks", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .context("Failed to call POST /tasks")?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("POST /tasks failed: {} - {}", status, text);
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse created task response: {}", text))
    }

    /// PUT /api/tasks/{id}. `Ok(None)` means the identifier did not exist.
    pub async fn update(&self, id: &str, patch: &TaskPatch) -> anyhow::Result<Option<TaskRecord>> {
        let url = format!("{}/tasks/{}", self.base_url, id);
        let resp = self
            .client
            .put(&url)
            .json(patch)
            .send()
            .await
            .context("Failed to call PUT /tasks/{id}")?;

        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            anyhow::bail!("PUT /tasks/{} failed: {} - {}", id, status, text);
        }

        let record = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse updated task response: {}", text))?;
        Ok(Some(record))
    }

    /// DELETE /api/tasks/{id}. `Ok(false)` means the identifier did not exist.
    pub async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        let url = format!("{}/tasks/{}", self.base_url, id);
        let resp = self
            .client
            .delete(&url)
            .send()
            .await
            .context("Failed to call DELETE /tasks/{id}")?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("DELETE /tasks/{} failed: {} - {}", id, status, text);
        }
        Ok(true)
    }
}
