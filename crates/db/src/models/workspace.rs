//! Workspace models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use summit_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `workspaces` table.
///
/// `kind` and `status` are stored as text and CHECK-constrained by the
/// schema; parse them with `WorkspaceKind::parse` / `WorkspaceStatus::parse`
/// where typed values are needed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workspace {
    pub id: DbId,
    pub event_id: DbId,
    pub parent_id: Option<DbId>,
    pub kind: String,
    pub status: String,
    pub department_id: Option<String>,
    pub committee_id: Option<String>,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a workspace. What is required depends on the parent's
/// kind: departments take `department_id`, committees take `committee_id`,
/// teams take `name`, and a missing `parent_id` creates the event root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWorkspace {
    pub parent_id: Option<DbId>,
    pub department_id: Option<String>,
    pub committee_id: Option<String>,
    pub name: Option<String>,
}

/// Fully resolved insert row, built by the creation handler after catalog
/// and depth validation.
#[derive(Debug, Clone)]
pub struct NewWorkspace {
    pub event_id: DbId,
    pub parent_id: Option<DbId>,
    pub kind: String,
    pub department_id: Option<String>,
    pub committee_id: Option<String>,
    pub name: String,
}

/// DTO for renaming or archiving a workspace.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkspace {
    pub name: Option<String>,
    pub status: Option<String>,
}
