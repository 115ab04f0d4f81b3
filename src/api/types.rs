//! API request and response types.
//!
//! The task shapes themselves ([`crate::task::TaskDraft`],
//! [`crate::task::TaskPatch`], [`crate::task::TaskRecord`]) live with the
//! model; only the envelope types are defined here.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Acknowledgement returned after a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
