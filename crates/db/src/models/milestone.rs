//! Milestone models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use summit_core::types::{DbId, Timestamp};

/// A row from the `milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Milestone {
    pub id: DbId,
    pub event_id: DbId,
    pub workspace_id: Option<DbId>,
    pub title: String,
    pub due_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a milestone, optionally pinned to a workspace.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMilestone {
    pub workspace_id: Option<DbId>,
    pub title: String,
    pub due_at: Timestamp,
}
