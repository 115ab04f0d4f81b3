//! Task model and wire types.
//!
//! There is one canonical in-memory shape ([`Task`], chrono timestamps,
//! logical `id`) and one wire shape ([`TaskRecord`], the store's native
//! `_id` field and ISO-8601 text timestamps). Everything crossing the HTTP
//! boundary goes through `TaskRecord`; everything downstream of the client
//! keys on `Task::id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Task category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Personal,
    Health,
    Learning,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Work,
        Category::Personal,
        Category::Health,
        Category::Learning,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Health => "health",
            Category::Learning => "learning",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Task status. Transitions are unrestricted: any status can be set from
/// any other, there is no state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Status::Pending),
            "in-progress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }
}

/// A task as held in memory (client collection, store results, persisted
/// fallback). `id` is the logical identifier; `created_at <= updated_at`
/// always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a task. `title` is the only required
/// field; unspecified enums fall back to their defaults (work / medium),
/// status always starts as pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            category: Category::default(),
            priority: Priority::default(),
            due_date: None,
        }
    }
}

/// Partial update. `None` fields are left untouched by the store; there is
/// no way to clear a previously set optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Error converting a wire record into a [`Task`].
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed timestamp in field {field}: {source}")]
    Timestamp {
        field: &'static str,
        source: chrono::ParseError,
    },
}

/// A task as it appears on the wire: the store's native identifier field
/// (`_id`) and all timestamps as RFC 3339 text. The server serializes into
/// this shape at the API boundary; the client normalizes out of it on every
/// ingress path (list load, create echo, update echo).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, RecordError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| RecordError::Timestamp { field, source })
}

impl TaskRecord {
    /// Normalize the wire record into the canonical shape: `_id` becomes
    /// the logical `id` and every timestamp is parsed out of its text form.
    pub fn into_task(self) -> Result<Task, RecordError> {
        let due_date = self
            .due_date
            .as_deref()
            .map(|s| parse_timestamp("dueDate", s))
            .transpose()?;
        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            priority: self.priority,
            status: self.status,
            due_date,
            created_at: parse_timestamp("createdAt", &self.created_at)?,
            updated_at: parse_timestamp("updatedAt", &self.updated_at)?,
        })
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            category: task.category,
            priority: task.priority,
            status: task.status,
            due_date: task.due_date.map(|dt| dt.to_rfc3339()),
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_applies_defaults_for_missing_fields() {
        let draft: TaskDraft = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.category, Category::Work);
        assert_eq!(draft.priority, Priority::Medium);
        assert!(draft.description.is_none());
        assert!(draft.due_date.is_none());
    }

    #[test]
    fn status_uses_kebab_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            r#""in-progress""#
        );
        let status: Status = serde_json::from_str(r#""in-progress""#).unwrap();
        assert_eq!(status, Status::InProgress);
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        assert!(serde_json::from_str::<Category>(r#""chores""#).is_err());
        assert!(serde_json::from_str::<TaskDraft>(r#"{"title":"x","priority":"urgent"}"#).is_err());
    }

    #[test]
    fn record_normalizes_native_id_and_timestamps() {
        let json = r#"{
            "_id": "abc123",
            "title": "Write report",
            "category": "work",
            "priority": "high",
            "status": "pending",
            "createdAt": "2025-01-02T03:04:05.678Z",
            "updatedAt": "2025-01-02T03:04:05.678Z"
        }"#;
        let record: TaskRecord = serde_json::from_str(json).unwrap();
        let task = record.into_task().unwrap();
        assert_eq!(task.id, "abc123");
        assert_eq!(task.created_at, task.updated_at);
        assert_eq!(task.created_at.to_rfc3339(), "2025-01-02T03:04:05.678+00:00");
    }

    #[test]
    fn record_serializes_id_under_the_native_field() {
        let task = Task {
            id: "abc".to_string(),
            title: "x".to_string(),
            description: None,
            category: Category::Work,
            priority: Priority::Medium,
            status: Status::Pending,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(TaskRecord::from(&task)).unwrap();
        assert_eq!(json["_id"], "abc");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn record_with_malformed_timestamp_fails_to_normalize() {
        let record = TaskRecord {
            id: "abc".to_string(),
            title: "x".to_string(),
            description: None,
            category: Category::Work,
            priority: Priority::Medium,
            status: Status::Pending,
            due_date: None,
            created_at: "not-a-date".to_string(),
            updated_at: "2025-01-02T03:04:05Z".to_string(),
        };
        assert!(record.into_task().is_err());
    }

    #[test]
    fn record_round_trips_through_task() {
        let task = Task {
            id: "abc".to_string(),
            title: "Buy milk".to_string(),
            description: Some("semi-skimmed".to_string()),
            category: Category::Shopping,
            priority: Priority::Low,
            status: Status::InProgress,
            due_date: Some(Utc::now()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let record = TaskRecord::from(&task);
        assert_eq!(record.into_task().unwrap(), task);
    }
}
