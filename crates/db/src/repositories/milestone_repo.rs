//! Repository for the `milestones` table.

use sqlx::PgPool;
use summit_core::types::DbId;

use crate::models::milestone::{CreateMilestone, Milestone};

/// Column list for `milestones` queries.
const COLUMNS: &str = "\
    id, event_id, workspace_id, title, due_at, completed_at, \
    created_at, updated_at";

/// Provides data access for milestones.
pub struct MilestoneRepo;

impl MilestoneRepo {
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateMilestone,
    ) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO milestones (event_id, workspace_id, title, due_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(event_id)
            .bind(input.workspace_id)
            .bind(&input.title)
            .bind(input.due_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM milestones WHERE id = $1");
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Not-yet-completed milestones, nearest due date first (overdue ones
    /// sort to the top).
    pub async fn upcoming(
        pool: &PgPool,
        event_id: DbId,
        limit: i64,
    ) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM milestones \
             WHERE event_id = $1 AND completed_at IS NULL \
             ORDER BY due_at, id \
             LIMIT $2"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(event_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Mark a milestone completed. Idempotent: an already-completed
    /// milestone keeps its original completion time.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE milestones SET completed_at = COALESCE(completed_at, NOW()) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
