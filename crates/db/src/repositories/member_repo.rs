//! Repository for the `workspace_members` table.

use sqlx::PgPool;
use summit_core::types::DbId;

use crate::models::member::{AddMember, WorkspaceMember};

/// Column list for `workspace_members` queries.
const COLUMNS: &str = "\
    id, workspace_id, user_id, role, status, joined_at, left_at, \
    created_at, updated_at";

/// Provides data access for workspace memberships.
pub struct MemberRepo;

impl MemberRepo {
    /// Enroll a user. Re-enrolling a removed user reactivates the existing
    /// row with the new role and clears `left_at`.
    pub async fn add(
        pool: &PgPool,
        workspace_id: DbId,
        input: &AddMember,
    ) -> Result<WorkspaceMember, sqlx::Error> {
        let query = format!(
            "INSERT INTO workspace_members (workspace_id, user_id, role) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_workspace_members_workspace_user DO UPDATE SET \
                 role = $3, \
                 status = 'active', \
                 joined_at = NOW(), \
                 left_at = NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkspaceMember>(&query)
            .bind(workspace_id)
            .bind(input.user_id)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Members of one workspace, active first, then by join date.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<WorkspaceMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workspace_members \
             WHERE workspace_id = $1 \
             ORDER BY status, joined_at, id"
        );
        sqlx::query_as::<_, WorkspaceMember>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Every membership under one event, for the dashboard rollup.
    pub async fn list_by_event(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<WorkspaceMember>, sqlx::Error> {
        let query = format!(
            "SELECT m.id, m.workspace_id, m.user_id, m.role, m.status, \
                    m.joined_at, m.left_at, m.created_at, m.updated_at \
             FROM workspace_members m \
             JOIN workspaces w ON w.id = m.workspace_id \
             WHERE w.event_id = $1 \
             ORDER BY m.id"
        );
        sqlx::query_as::<_, WorkspaceMember>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// The active membership of one user in one workspace, if any.
    pub async fn find_active(
        pool: &PgPool,
        workspace_id: DbId,
        user_id: DbId,
    ) -> Result<Option<WorkspaceMember>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workspace_members \
             WHERE workspace_id = $1 AND user_id = $2 AND status = 'active'"
        );
        sqlx::query_as::<_, WorkspaceMember>(&query)
            .bind(workspace_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Active role strings one user holds across a set of workspaces
    /// (a workspace and its ancestors, for capability checks).
    pub async fn active_roles_in(
        pool: &PgPool,
        user_id: DbId,
        workspace_ids: &[DbId],
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT role FROM workspace_members \
             WHERE user_id = $1 AND workspace_id = ANY($2) AND status = 'active'",
        )
        .bind(user_id)
        .bind(workspace_ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(role,)| role).collect())
    }

    /// Deactivate a membership (keeps the row for history). Returns the
    /// updated row, or `None` when there was no active membership.
    pub async fn remove(
        pool: &PgPool,
        workspace_id: DbId,
        user_id: DbId,
    ) -> Result<Option<WorkspaceMember>, sqlx::Error> {
        let query = format!(
            "UPDATE workspace_members SET \
                 status = 'inactive', \
                 left_at = NOW() \
             WHERE workspace_id = $1 AND user_id = $2 AND status = 'active' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkspaceMember>(&query)
            .bind(workspace_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
