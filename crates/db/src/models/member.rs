//! Workspace membership models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use summit_core::types::{DbId, Timestamp};

/// A row from the `workspace_members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkspaceMember {
    pub id: DbId,
    pub workspace_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub status: String,
    pub joined_at: Timestamp,
    pub left_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for enrolling a user into a workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct AddMember {
    pub user_id: DbId,
    pub role: String,
}
