//! Budget line models and DTOs. Amounts are integer cents.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use summit_core::types::{DbId, Timestamp};

/// A row from the `budget_lines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BudgetLine {
    pub id: DbId,
    pub workspace_id: DbId,
    pub label: String,
    pub allocated_cents: i64,
    pub used_cents: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a budget line; `used_cents` defaults to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBudgetLine {
    pub label: String,
    pub allocated_cents: i64,
    pub used_cents: Option<i64>,
}
