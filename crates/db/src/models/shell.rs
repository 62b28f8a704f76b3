//! Shell preference models: the saved last-active tab per
//! (user, workspace, role scope).

use serde::Serialize;
use sqlx::FromRow;
use summit_core::types::{DbId, Timestamp};

/// A row from the `shell_preferences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShellPreference {
    pub id: DbId,
    pub user_id: DbId,
    pub workspace_id: DbId,
    pub role_scope: String,
    pub last_active_tab: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
