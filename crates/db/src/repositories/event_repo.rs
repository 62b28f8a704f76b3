//! Repository for the `events` table.

use sqlx::PgPool;
use summit_core::types::DbId;

use crate::models::event::{CreateEvent, Event};

/// Column list for `events` queries.
const COLUMNS: &str = "\
    id, org_slug, slug, name, status, starts_at, ends_at, \
    created_at, updated_at";

/// Provides data access for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event. `slug` is the resolved value (caller derives it
    /// from the name when the DTO omits one).
    pub async fn create(
        pool: &PgPool,
        input: &CreateEvent,
        slug: &str,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (org_slug, slug, name, starts_at, ends_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.org_slug)
            .bind(slug)
            .bind(&input.name)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All events, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }
}
