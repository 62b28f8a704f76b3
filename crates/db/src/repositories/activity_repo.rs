//! Repository for the append-only `activities` table.

use sqlx::PgPool;

use crate::models::activity::{Activity, RecordActivity};

/// Column list for `activities` queries.
const COLUMNS: &str = "\
    id, event_id, workspace_id, actor_user_id, action, detail, \
    created_at, updated_at";

/// Provides data access for the activity feed.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append one activity row.
    pub async fn record(pool: &PgPool, input: &RecordActivity) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (event_id, workspace_id, actor_user_id, action, detail) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(input.event_id)
            .bind(input.workspace_id)
            .bind(input.actor_user_id)
            .bind(&input.action)
            .bind(&input.detail)
            .fetch_one(pool)
            .await
    }
}
