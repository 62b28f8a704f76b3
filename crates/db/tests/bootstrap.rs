use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    summit_db::health_check(&pool).await.unwrap();

    // Every table the backend touches must exist after migration.
    let tables = [
        "events",
        "workspaces",
        "tasks",
        "workspace_members",
        "budget_lines",
        "resources",
        "activities",
        "milestones",
        "shell_preferences",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The updated_at trigger must fire on every UPDATE.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    sqlx::query("INSERT INTO events (org_slug, slug, name) VALUES ('acme', 'summit', 'Summit')")
        .execute(&pool)
        .await
        .unwrap();

    let (before,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT updated_at FROM events WHERE slug = 'summit'")
            .fetch_one(&pool)
            .await
            .unwrap();

    // NOW() is transaction-start time; make sure the update lands in a
    // visibly later transaction.
    sqlx::query("SELECT pg_sleep(0.05)").execute(&pool).await.unwrap();

    sqlx::query("UPDATE events SET name = 'Summit 2026' WHERE slug = 'summit'")
        .execute(&pool)
        .await
        .unwrap();

    let (after,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT updated_at FROM events WHERE slug = 'summit'")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(after > before, "updated_at should advance on UPDATE");
}
