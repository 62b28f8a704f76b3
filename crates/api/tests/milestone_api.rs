//! HTTP-level integration tests for milestone creation and completion:
//! anchor selection, cross-event pins, and idempotent completion.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{auth_token, body_json, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;
use summit_db::models::event::CreateEvent;
use summit_db::models::member::AddMember;
use summit_db::models::workspace::NewWorkspace;
use summit_db::repositories::{EventRepo, MemberRepo, WorkspaceRepo};

const OWNER: i64 = 1;
const LEAD: i64 = 3;
const COORDINATOR: i64 = 4;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed event -> root -> operations -> venue with OWNER on the root and
/// LEAD/COORDINATOR on venue. Returns (event_id, root_id, venue_id).
async fn seed(pool: &PgPool) -> (i64, i64, i64) {
    let event = seed_event(pool, "devsummit-2026").await;

    let root = WorkspaceRepo::create(
        pool,
        &NewWorkspace {
            event_id: event,
            parent_id: None,
            kind: "root".to_string(),
            department_id: None,
            committee_id: None,
            name: "DevSummit 2026".to_string(),
        },
    )
    .await
    .unwrap();
    let ops = WorkspaceRepo::create(
        pool,
        &NewWorkspace {
            event_id: event,
            parent_id: Some(root.id),
            kind: "department".to_string(),
            department_id: Some("operations".to_string()),
            committee_id: None,
            name: "Operations".to_string(),
        },
    )
    .await
    .unwrap();
    let venue = WorkspaceRepo::create(
        pool,
        &NewWorkspace {
            event_id: event,
            parent_id: Some(ops.id),
            kind: "committee".to_string(),
            department_id: None,
            committee_id: Some("venue".to_string()),
            name: "Venue".to_string(),
        },
    )
    .await
    .unwrap();

    for (workspace_id, user_id, role) in [
        (root.id, OWNER, "owner"),
        (venue.id, LEAD, "venue_lead"),
        (venue.id, COORDINATOR, "venue_coordinator"),
    ] {
        MemberRepo::add(
            pool,
            workspace_id,
            &AddMember {
                user_id,
                role: role.to_string(),
            },
        )
        .await
        .unwrap();
    }

    (event, root.id, venue.id)
}

async fn seed_event(pool: &PgPool, slug: &str) -> i64 {
    EventRepo::create(
        pool,
        &CreateEvent {
            org_slug: "acme".to_string(),
            name: slug.to_string(),
            slug: None,
            starts_at: None,
            ends_at: None,
        },
        slug,
    )
    .await
    .unwrap()
    .id
}

fn due_in(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

async fn create_milestone(
    pool: &PgPool,
    event_id: i64,
    body: serde_json::Value,
    user_id: i64,
) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/events/{event_id}/milestones"),
        body,
        &auth_token(user_id),
    )
    .await
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn event_milestones_anchor_on_the_root(pool: PgPool) {
    let (event_id, _, _) = seed(&pool).await;

    let response = create_milestone(
        &pool,
        event_id,
        serde_json::json!({"title": "Speakers confirmed", "due_at": due_in(14)}),
        OWNER,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["event_id"], event_id);
    assert!(json["workspace_id"].is_null());
    assert_eq!(json["title"], "Speakers confirmed");
    assert!(json["completed_at"].is_null());

    let app = common::build_test_app(pool);
    let feed = body_json(
        get_auth(
            app,
            &format!("/api/v1/events/{event_id}/dashboard/activity-feed"),
            &auth_token(OWNER),
        )
        .await,
    )
    .await;
    let created = feed["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["action"] == "milestone.created")
        .expect("creation should be recorded");
    assert_eq!(created["detail"]["title"], "Speakers confirmed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pinned_milestones_anchor_on_their_workspace(pool: PgPool) {
    let (event_id, _, venue_id) = seed(&pool).await;

    // LEAD can pin to the committee they lead...
    let response = create_milestone(
        &pool,
        event_id,
        serde_json::json!({
            "workspace_id": venue_id,
            "title": "Walkthrough done",
            "due_at": due_in(7),
        }),
        LEAD,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["workspace_id"], venue_id);

    // ...but an event-level milestone anchors on the root, where LEAD
    // holds nothing.
    let response = create_milestone(
        &pool,
        event_id,
        serde_json::json!({"title": "Budget locked", "due_at": due_in(7)}),
        LEAD,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Coordinators cannot manage milestones anywhere.
    let response = create_milestone(
        &pool,
        event_id,
        serde_json::json!({
            "workspace_id": venue_id,
            "title": "Chairs counted",
            "due_at": due_in(7),
        }),
        COORDINATOR,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn creation_requires_a_root_workspace(pool: PgPool) {
    let event_id = seed_event(&pool, "barely-started").await;

    let response = create_milestone(
        &pool,
        event_id,
        serde_json::json!({"title": "Anything", "due_at": due_in(1)}),
        OWNER,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("no root workspace"),
        "unexpected error: {json}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pins_must_stay_inside_the_event(pool: PgPool) {
    let (event_id, _, _) = seed(&pool).await;
    let other_event = seed_event(&pool, "other-conf").await;
    let other_root = WorkspaceRepo::create(
        &pool,
        &NewWorkspace {
            event_id: other_event,
            parent_id: None,
            kind: "root".to_string(),
            department_id: None,
            committee_id: None,
            name: "Other Conf".to_string(),
        },
    )
    .await
    .unwrap();

    let response = create_milestone(
        &pool,
        event_id,
        serde_json::json!({
            "workspace_id": other_root.id,
            "title": "Wrong place",
            "due_at": due_in(3),
        }),
        OWNER,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("different event"),
        "unexpected error: {json}"
    );

    let response = create_milestone(
        &pool,
        event_id,
        serde_json::json!({
            "workspace_id": 999999,
            "title": "Nowhere",
            "due_at": due_in(3),
        }),
        OWNER,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_titles_are_rejected(pool: PgPool) {
    let (event_id, _, _) = seed(&pool).await;

    let response = create_milestone(
        &pool,
        event_id,
        serde_json::json!({"title": "   ", "due_at": due_in(3)}),
        OWNER,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_is_idempotent(pool: PgPool) {
    let (event_id, _, _) = seed(&pool).await;

    let created = body_json(
        create_milestone(
            &pool,
            event_id,
            serde_json::json!({"title": "Sponsors signed", "due_at": due_in(20)}),
            OWNER,
        )
        .await,
    )
    .await;
    let milestone_id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/milestones/{milestone_id}/complete"),
        serde_json::json!({}),
        &auth_token(OWNER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    let completed_at = first["completed_at"].as_str().unwrap().to_string();

    // A second completion keeps the original time and records nothing new.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/milestones/{milestone_id}/complete"),
        serde_json::json!({}),
        &auth_token(OWNER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["completed_at"].as_str().unwrap(), completed_at);

    let app = common::build_test_app(pool);
    let feed = body_json(
        get_auth(
            app,
            &format!("/api/v1/events/{event_id}/dashboard/activity-feed"),
            &auth_token(OWNER),
        )
        .await,
    )
    .await;
    let completions = feed["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| item["action"] == "milestone.completed")
        .count();
    assert_eq!(completions, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completing_an_unknown_milestone_404s(pool: PgPool) {
    seed(&pool).await;

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/v1/milestones/999999/complete",
        serde_json::json!({}),
        &auth_token(OWNER),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
