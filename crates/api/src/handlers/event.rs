//! Handlers for the `/events` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use summit_core::error::CoreError;
use summit_core::shell::slugify;
use summit_core::types::DbId;
use summit_db::models::event::{CreateEvent, Event};
use summit_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/events
///
/// The slug defaults to the slugified name when the payload omits one.
pub async fn create(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "event name must not be empty",
        )));
    }
    if input.org_slug.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "org_slug must not be empty",
        )));
    }

    let slug = match input.slug.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => slugify(&input.name),
    };
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "event name does not produce a usable slug; provide one explicitly",
        )));
    }

    let event = EventRepo::create(&state.pool, &input, &slug).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events
pub async fn list(_auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(events))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(event))
}
