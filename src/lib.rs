//! # TaskNest
//!
//! Personal task manager: a REST API over a SQLite-backed task store, plus
//! the typed client that keeps a UI-side copy of the collection in sync
//! with it.
//!
//! ## Data flow
//!
//! ```text
//! UI action
//!    │
//!    ▼
//! TaskManager ──HTTP──▶ api::serve ──▶ TaskStore (SQLite)
//!    │                                      │
//!    ◀── server-confirmed record ───────────┘
//!    │
//!    ▼
//! views::filter_tasks / views::collection_stats
//! ```
//!
//! ## Modules
//! - `task`: the canonical Task model and its wire shapes
//! - `store`: pluggable task store backends (SQLite, in-memory)
//! - `api`: the HTTP surface (`/api/tasks` CRUD)
//! - `client`: REST client, client-held state, persisted fallback
//! - `views`: pure filtering and statistics over the collection

pub mod api;
pub mod client;
pub mod config;
pub mod store;
pub mod task;
pub mod views;

pub use client::{LocalTaskCache, TaskApi, TaskManager};
pub use config::Config;
pub use store::{InMemoryTaskStore, SqliteTaskStore, TaskStore};
pub use task::{Category, Priority, Status, Task, TaskDraft, TaskPatch, TaskRecord};
