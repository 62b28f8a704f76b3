//! Repository for the `resources` table.

use sqlx::PgPool;
use summit_core::types::DbId;

use crate::models::resource::{CreateResource, Resource};

/// Column list for `resources` queries.
const COLUMNS: &str = "\
    id, workspace_id, name, quantity, available, created_at, updated_at";

/// Provides data access for resources.
pub struct ResourceRepo;

impl ResourceRepo {
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        input: &CreateResource,
    ) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources (workspace_id, name, quantity, available) \
             VALUES ($1, $2, $3, COALESCE($4, $3)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(workspace_id)
            .bind(&input.name)
            .bind(input.quantity)
            .bind(input.available)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE workspace_id = $1 ORDER BY id");
        sqlx::query_as::<_, Resource>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Every resource under one event, for the dashboard rollup.
    pub async fn list_by_event(pool: &PgPool, event_id: DbId) -> Result<Vec<Resource>, sqlx::Error> {
        let query = format!(
            "SELECT r.id, r.workspace_id, r.name, r.quantity, r.available, \
                    r.created_at, r.updated_at \
             FROM resources r \
             JOIN workspaces w ON w.id = r.workspace_id \
             WHERE w.event_id = $1 \
             ORDER BY r.id"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }
}
