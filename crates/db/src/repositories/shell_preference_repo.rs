//! Repository for the `shell_preferences` table.

use sqlx::PgPool;
use summit_core::types::DbId;

use crate::models::shell::ShellPreference;

/// Column list for `shell_preferences` queries.
const COLUMNS: &str = "\
    id, user_id, workspace_id, role_scope, last_active_tab, \
    created_at, updated_at";

/// Provides data access for saved shell preferences.
pub struct ShellPreferenceRepo;

impl ShellPreferenceRepo {
    /// The saved preference for one (user, workspace, role scope) triple.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        workspace_id: DbId,
        role_scope: &str,
    ) -> Result<Option<ShellPreference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shell_preferences \
             WHERE user_id = $1 AND workspace_id = $2 AND role_scope = $3"
        );
        sqlx::query_as::<_, ShellPreference>(&query)
            .bind(user_id)
            .bind(workspace_id)
            .bind(role_scope)
            .fetch_optional(pool)
            .await
    }

    /// Save the last-active tab, last write wins.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        workspace_id: DbId,
        role_scope: &str,
        last_active_tab: &str,
    ) -> Result<ShellPreference, sqlx::Error> {
        let query = format!(
            "INSERT INTO shell_preferences (user_id, workspace_id, role_scope, last_active_tab) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_shell_preferences_user_workspace_scope DO UPDATE SET \
                 last_active_tab = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ShellPreference>(&query)
            .bind(user_id)
            .bind(workspace_id)
            .bind(role_scope)
            .bind(last_active_tab)
            .fetch_one(pool)
            .await
    }
}
