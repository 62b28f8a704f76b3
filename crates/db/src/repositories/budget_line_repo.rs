//! Repository for the `budget_lines` table.

use sqlx::PgPool;
use summit_core::types::DbId;

use crate::models::budget::{BudgetLine, CreateBudgetLine};

/// Column list for `budget_lines` queries.
const COLUMNS: &str = "\
    id, workspace_id, label, allocated_cents, used_cents, created_at, updated_at";

/// Provides data access for budget lines.
pub struct BudgetLineRepo;

impl BudgetLineRepo {
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        input: &CreateBudgetLine,
    ) -> Result<BudgetLine, sqlx::Error> {
        let query = format!(
            "INSERT INTO budget_lines (workspace_id, label, allocated_cents, used_cents) \
             VALUES ($1, $2, $3, COALESCE($4, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BudgetLine>(&query)
            .bind(workspace_id)
            .bind(&input.label)
            .bind(input.allocated_cents)
            .bind(input.used_cents)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<BudgetLine>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM budget_lines WHERE workspace_id = $1 ORDER BY id");
        sqlx::query_as::<_, BudgetLine>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Every budget line under one event, for the dashboard rollup.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<BudgetLine>, sqlx::Error> {
        let query = format!(
            "SELECT b.id, b.workspace_id, b.label, b.allocated_cents, b.used_cents, \
                    b.created_at, b.updated_at \
             FROM budget_lines b \
             JOIN workspaces w ON w.id = b.workspace_id \
             WHERE w.event_id = $1 \
             ORDER BY b.id"
        );
        sqlx::query_as::<_, BudgetLine>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }
}
