//! Feed-shaped repositories: milestones, activities, budget/resource
//! defaults, and role-scoped task listings.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use summit_db::models::budget::CreateBudgetLine;
use summit_db::models::event::CreateEvent;
use summit_db::models::milestone::CreateMilestone;
use summit_db::models::resource::CreateResource;
use summit_db::models::task::CreateTask;
use summit_db::models::workspace::NewWorkspace;
use summit_db::models::activity::RecordActivity;
use summit_db::repositories::{
    ActivityRepo, BudgetLineRepo, EventRepo, MilestoneRepo, ResourceRepo, TaskRepo, WorkspaceRepo,
};

async fn seed(pool: &PgPool) -> (i64, i64) {
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
    let root = WorkspaceRepo::create(
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
    .unwrap();
    (event.id, root.id)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_upcoming_milestones_order_and_completion(pool: PgPool) {
    let (event, ws) = seed(&pool).await;
    let now = Utc::now();

    let far = MilestoneRepo::create(
        &pool,
        event,
        &CreateMilestone {
            workspace_id: Some(ws),
            title: "Doors open".to_string(),
            due_at: now + Duration::days(30),
        },
    )
    .await
    .unwrap();
    let near = MilestoneRepo::create(
        &pool,
        event,
        &CreateMilestone {
            workspace_id: None,
            title: "Venue contract signed".to_string(),
            due_at: now + Duration::days(3),
        },
    )
    .await
    .unwrap();
    let overdue = MilestoneRepo::create(
        &pool,
        event,
        &CreateMilestone {
            workspace_id: None,
            title: "Sponsor deck sent".to_string(),
            due_at: now - Duration::days(2),
        },
    )
    .await
    .unwrap();

    let upcoming = MilestoneRepo::upcoming(&pool, event, 10).await.unwrap();
    let ids: Vec<i64> = upcoming.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![overdue.id, near.id, far.id]);

    // Completion is idempotent and removes the row from the feed.
    let done = MilestoneRepo::complete(&pool, overdue.id).await.unwrap().unwrap();
    let completed_at = done.completed_at.unwrap();
    let again = MilestoneRepo::complete(&pool, overdue.id).await.unwrap().unwrap();
    assert_eq!(again.completed_at.unwrap(), completed_at);

    let upcoming = MilestoneRepo::upcoming(&pool, event, 10).await.unwrap();
    assert_eq!(upcoming.len(), 2);

    let limited = MilestoneRepo::upcoming(&pool, event, 1).await.unwrap();
    assert_eq!(limited[0].id, near.id);

    assert!(MilestoneRepo::complete(&pool, 9999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_rows_survive_workspace_deletion(pool: PgPool) {
    let (event, ws) = seed(&pool).await;

    let recorded = ActivityRepo::record(
        &pool,
        &RecordActivity {
            event_id: event,
            workspace_id: Some(ws),
            actor_user_id: Some(7),
            action: "task.status_changed".to_string(),
            detail: serde_json::json!({ "status": "done" }),
        },
    )
    .await
    .unwrap();
    assert_eq!(recorded.workspace_id, Some(ws));

    sqlx::query("DELETE FROM workspaces WHERE id = $1")
        .bind(ws)
        .execute(&pool)
        .await
        .unwrap();

    let (count, orphaned): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COUNT(*) FILTER (WHERE workspace_id IS NULL) FROM activities",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1, "the feed keeps its history");
    assert_eq!(orphaned, 1, "the workspace link nulls out");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_budget_and_resource_defaults(pool: PgPool) {
    let (_, ws) = seed(&pool).await;

    let line = BudgetLineRepo::create(
        &pool,
        ws,
        &CreateBudgetLine {
            label: "Catering".to_string(),
            allocated_cents: 250_000,
            used_cents: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(line.used_cents, 0);

    let chairs = ResourceRepo::create(
        &pool,
        ws,
        &CreateResource {
            name: "Chairs".to_string(),
            quantity: 120,
            available: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(chairs.available, 120, "defaults to the full quantity");

    let radios = ResourceRepo::create(
        &pool,
        ws,
        &CreateResource {
            name: "Radios".to_string(),
            quantity: 40,
            available: Some(25),
        },
    )
    .await
    .unwrap();
    assert_eq!(radios.available, 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_scoped_task_listing(pool: PgPool) {
    let (event, ws) = seed(&pool).await;

    TaskRepo::create(
        &pool,
        ws,
        &CreateTask {
            title: "For everyone".to_string(),
            ..CreateTask::default()
        },
    )
    .await
    .unwrap();
    TaskRepo::create(
        &pool,
        ws,
        &CreateTask {
            title: "Venue walkthrough".to_string(),
            role_scope: Some("venue_lead".to_string()),
            ..CreateTask::default()
        },
    )
    .await
    .unwrap();
    TaskRepo::create(
        &pool,
        ws,
        &CreateTask {
            title: "Sponsor outreach".to_string(),
            role_scope: Some("sponsorship_lead".to_string()),
            ..CreateTask::default()
        },
    )
    .await
    .unwrap();

    let all = TaskRepo::list_by_workspace(&pool, ws, None).await.unwrap();
    assert_eq!(all.len(), 3);

    // A scoped listing keeps unscoped tasks and drops other scopes.
    let venue = TaskRepo::list_by_workspace(&pool, ws, Some("venue_lead"))
        .await
        .unwrap();
    let titles: Vec<&str> = venue.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["For everyone", "Venue walkthrough"]);

    let by_event = TaskRepo::list_by_event(&pool, event).await.unwrap();
    assert_eq!(by_event.len(), 3);
}
