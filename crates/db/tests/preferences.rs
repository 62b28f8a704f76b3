//! Shell preference persistence: per-(user, workspace, scope) rows with
//! last-write-wins upserts.

use sqlx::PgPool;
use summit_db::models::event::CreateEvent;
use summit_db::models::workspace::NewWorkspace;
use summit_db::repositories::{EventRepo, ShellPreferenceRepo, WorkspaceRepo};

async fn seed_workspace(pool: &PgPool) -> i64 {
    let event = EventRepo::create(
        pool,
        &CreateEvent {
            org_slug: "acme".to_string(),
            name: "Summit".to_string(),
            slug: None,
            starts_at: None,
            ends_at: None,
        },
        "summit",
    )
    .await
    .unwrap();
    WorkspaceRepo::create(
        pool,
        &NewWorkspace {
            event_id: event.id,
            parent_id: None,
            kind: "root".to_string(),
            department_id: None,
            committee_id: None,
            name: "Summit".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upsert_is_last_write_wins(pool: PgPool) {
    let ws = seed_workspace(&pool).await;

    let first = ShellPreferenceRepo::upsert(&pool, 7, ws, "all", "tasks")
        .await
        .unwrap();
    assert_eq!(first.last_active_tab, "tasks");

    let second = ShellPreferenceRepo::upsert(&pool, 7, ws, "all", "budget")
        .await
        .unwrap();
    assert_eq!(second.id, first.id, "same triple reuses the row");
    assert_eq!(second.last_active_tab, "budget");

    let found = ShellPreferenceRepo::find(&pool, 7, ws, "all")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.last_active_tab, "budget");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_scopes_and_users_are_independent(pool: PgPool) {
    let ws = seed_workspace(&pool).await;

    ShellPreferenceRepo::upsert(&pool, 7, ws, "all", "tasks").await.unwrap();
    ShellPreferenceRepo::upsert(&pool, 7, ws, "venue_lead", "members")
        .await
        .unwrap();
    ShellPreferenceRepo::upsert(&pool, 8, ws, "all", "settings")
        .await
        .unwrap();

    let all = ShellPreferenceRepo::find(&pool, 7, ws, "all").await.unwrap().unwrap();
    let lead = ShellPreferenceRepo::find(&pool, 7, ws, "venue_lead")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(all.last_active_tab, "tasks");
    assert_eq!(lead.last_active_tab, "members");

    let other_user = ShellPreferenceRepo::find(&pool, 8, ws, "all").await.unwrap().unwrap();
    assert_eq!(other_user.last_active_tab, "settings");

    assert!(ShellPreferenceRepo::find(&pool, 9, ws, "all").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preferences_die_with_the_workspace(pool: PgPool) {
    let ws = seed_workspace(&pool).await;
    ShellPreferenceRepo::upsert(&pool, 7, ws, "all", "tasks").await.unwrap();

    sqlx::query("DELETE FROM workspaces WHERE id = $1")
        .bind(ws)
        .execute(&pool)
        .await
        .unwrap();

    assert!(ShellPreferenceRepo::find(&pool, 7, ws, "all").await.unwrap().is_none());
}
