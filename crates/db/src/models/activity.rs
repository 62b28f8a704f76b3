//! Activity feed models. Rows are append-only; workspace links null out
//! when the workspace is deleted so the feed keeps its history.

use serde::Serialize;
use sqlx::FromRow;
use summit_core::types::{DbId, Timestamp};

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub event_id: DbId,
    pub workspace_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    /// Dotted action name, e.g. `task.status_changed`.
    pub action: String,
    pub detail: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert shape for recording an activity. Built by handlers, never
/// deserialized from clients.
#[derive(Debug, Clone)]
pub struct RecordActivity {
    pub event_id: DbId,
    pub workspace_id: Option<DbId>,
    pub actor_user_id: Option<DbId>,
    pub action: String,
    pub detail: serde_json::Value,
}
