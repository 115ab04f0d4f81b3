//! HTTP API for TaskNest.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Health check
//! - `GET /api/tasks` - List all tasks, newest-created first
//! - `POST /api/tasks` - Create a task (title required), returns 201
//! - `PUT /api/tasks/{id}` - Partial update, returns the full post-update record
//! - `DELETE /api/tasks/{id}` - Hard delete, returns an acknowledgement message

mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
