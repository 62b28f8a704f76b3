//! Route definitions for the `/tasks` resource.
//!
//! Listing and creation live under `/workspaces/{workspace_id}/tasks`;
//! mutations addressed by task id land here.

use axum::routing::{patch, put};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// PATCH  /{id}         -> update
/// DELETE /{id}         -> delete
/// PUT    /{id}/status  -> set_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", patch(task::update).delete(task::delete))
        .route("/{id}/status", put(task::set_status))
}
