//! Repository for the `tasks` table.

use sqlx::PgPool;
use summit_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list for `tasks` queries.
const COLUMNS: &str = "\
    id, workspace_id, title, description, category, priority, status, \
    due_at, assignee_id, role_scope, created_at, updated_at";

/// Provides data access for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task. Category and priority fall back to their column
    /// defaults via `COALESCE`; status always starts at `todo`.
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks \
                 (workspace_id, title, description, category, priority, \
                  due_at, assignee_id, role_scope) \
             VALUES ($1, $2, $3, COALESCE($4, 'general'), COALESCE($5, 'medium'), \
                     $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(workspace_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.priority)
            .bind(input.due_at)
            .bind(input.assignee_id)
            .bind(&input.role_scope)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Tasks of one workspace, optionally narrowed to a role scope. A
    /// scoped listing still includes unscoped (`NULL`) tasks.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
        role_scope: Option<&str>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        match role_scope {
            Some(scope) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM tasks \
                     WHERE workspace_id = $1 AND (role_scope = $2 OR role_scope IS NULL) \
                     ORDER BY id"
                );
                sqlx::query_as::<_, Task>(&query)
                    .bind(workspace_id)
                    .bind(scope)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query =
                    format!("SELECT {COLUMNS} FROM tasks WHERE workspace_id = $1 ORDER BY id");
                sqlx::query_as::<_, Task>(&query)
                    .bind(workspace_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Every task under one event, joined through the workspace tree.
    pub async fn list_by_event(pool: &PgPool, event_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT t.id, t.workspace_id, t.title, t.description, t.category, \
                    t.priority, t.status, t.due_at, t.assignee_id, t.role_scope, \
                    t.created_at, t.updated_at \
             FROM tasks t \
             JOIN workspaces w ON w.id = t.workspace_id \
             WHERE w.event_id = $1 \
             ORDER BY t.id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Partial update of task fields other than status.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 priority = COALESCE($4, priority), \
                 due_at = COALESCE($5, due_at), \
                 assignee_id = COALESCE($6, assignee_id), \
                 role_scope = COALESCE($7, role_scope) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(input.due_at)
            .bind(input.assignee_id)
            .bind(&input.role_scope)
            .fetch_optional(pool)
            .await
    }

    /// Move a task to a new (already validated) status.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("UPDATE tasks SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a task. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
