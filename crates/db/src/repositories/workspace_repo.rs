//! Repository for the `workspaces` table.

use sqlx::PgPool;
use summit_core::types::DbId;

use crate::models::workspace::{NewWorkspace, UpdateWorkspace, Workspace};

/// Column list for `workspaces` queries.
const COLUMNS: &str = "\
    id, event_id, parent_id, kind, status, department_id, committee_id, \
    name, created_at, updated_at";

/// Provides data access for workspaces.
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// Insert a validated workspace row.
    pub async fn create(pool: &PgPool, input: &NewWorkspace) -> Result<Workspace, sqlx::Error> {
        let query = format!(
            "INSERT INTO workspaces \
                 (event_id, parent_id, kind, department_id, committee_id, name) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(input.event_id)
            .bind(input.parent_id)
            .bind(&input.kind)
            .bind(&input.department_id)
            .bind(&input.committee_id)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE id = $1");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every workspace of one event, ascending id (stable tree order).
    pub async fn list_by_event(pool: &PgPool, event_id: DbId) -> Result<Vec<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE event_id = $1 ORDER BY id");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// `(id, parent_id)` pairs for one event, the input to depth checks and
    /// ancestor walks.
    pub async fn parent_links(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<(DbId, Option<DbId>)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, Option<DbId>)>(
            "SELECT id, parent_id FROM workspaces WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
    }

    /// Whether the event already has its root workspace.
    pub async fn has_root(pool: &PgPool, event_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM workspaces WHERE event_id = $1 AND kind = 'root')",
        )
        .bind(event_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// The event's root workspace, if it exists yet.
    pub async fn find_root(pool: &PgPool, event_id: DbId) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE event_id = $1 AND kind = 'root'");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(event_id)
            .fetch_optional(pool)
            .await
    }

    /// Partial update (rename / archive). Absent fields keep their values.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWorkspace,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "UPDATE workspaces SET \
                 name = COALESCE($2, name), \
                 status = COALESCE($3, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }
}
