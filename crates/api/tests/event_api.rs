//! HTTP-level integration tests for event CRUD and slug derivation.

mod common;

use axum::http::StatusCode;
use common::{auth_token, body_json, get_auth, post_json_auth};
use sqlx::PgPool;

const USER: i64 = 1;

async fn create_event(pool: &PgPool, body: serde_json::Value) -> axum::response::Response {
    let app = common::build_test_app(pool.clone());
    post_json_auth(app, "/api/v1/events", body, &auth_token(USER)).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_derives_the_slug_from_the_name(pool: PgPool) {
    let response = create_event(
        &pool,
        serde_json::json!({"org_slug": "acme", "name": "DevSummit 2026"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["org_slug"], "acme");
    assert_eq!(json["slug"], "devsummit-2026");
    assert_eq!(json["name"], "DevSummit 2026");
    assert_eq!(json["status"], "active");

    // An explicit slug wins over derivation.
    let response = create_event(
        &pool,
        serde_json::json!({"org_slug": "acme", "name": "DevSummit 2027", "slug": " summit-27 "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["slug"], "summit-27");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn creation_validates_its_fields(pool: PgPool) {
    for body in [
        serde_json::json!({"org_slug": "acme", "name": "   "}),
        serde_json::json!({"org_slug": "  ", "name": "DevSummit"}),
        // A name of pure punctuation slugifies to nothing.
        serde_json::json!({"org_slug": "acme", "name": "!!!"}),
    ] {
        let response = create_event(&pool, body.clone()).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body should be rejected: {body}"
        );
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    // The same unslugifiable name is fine once a slug is supplied.
    let response = create_event(
        &pool,
        serde_json::json!({"org_slug": "acme", "name": "!!!", "slug": "bang"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slugs_are_unique_per_org(pool: PgPool) {
    let response = create_event(
        &pool,
        serde_json::json!({"org_slug": "acme", "name": "DevSummit 2026"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = create_event(
        &pool,
        serde_json::json!({"org_slug": "acme", "name": "DevSummit 2026"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");

    // Another org can reuse the slug.
    let response = create_event(
        &pool,
        serde_json::json!({"org_slug": "globex", "name": "DevSummit 2026"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_newest_first(pool: PgPool) {
    for name in ["First Summit", "Second Summit"] {
        let response =
            create_event(&pool, serde_json::json!({"org_slug": "acme", "name": name})).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/events", &auth_token(USER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let events = json.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["name"], "Second Summit");
    assert_eq!(events[1]["name"], "First Summit");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_by_id_roundtrips(pool: PgPool) {
    let created = body_json(
        create_event(
            &pool,
            serde_json::json!({"org_slug": "acme", "name": "DevSummit 2026"}),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/events/{id}"), &auth_token(USER)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["slug"], "devsummit-2026");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/events/999999", &auth_token(USER)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Event with id 999999 not found");
}
