//! Task models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use summit_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub workspace_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub due_at: Option<Timestamp>,
    pub assignee_id: Option<DbId>,
    /// Role string this task is scoped to; `NULL` shows under every scope.
    pub role_scope: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a task. Category and priority fall back to their
/// defaults; status always starts at `todo`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub due_at: Option<Timestamp>,
    pub assignee_id: Option<DbId>,
    pub role_scope: Option<String>,
}

/// DTO for patching a task. Status is absent here; it moves only
/// through the dedicated status endpoint so every transition is recorded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_at: Option<Timestamp>,
    pub assignee_id: Option<DbId>,
    pub role_scope: Option<String>,
}

/// DTO for the status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SetTaskStatus {
    pub status: String,
}
