//! Resource models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use summit_core::types::{DbId, Timestamp};

/// A row from the `resources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub workspace_id: DbId,
    pub name: String,
    pub quantity: i64,
    pub available: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a resource; `available` defaults to the full quantity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResource {
    pub name: String,
    pub quantity: i64,
    pub available: Option<i64>,
}
