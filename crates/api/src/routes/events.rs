//! Route definitions for the `/events` resource.
//!
//! Also nests workspace creation/listing, milestone creation, and the
//! dashboard widget endpoints under `/events/{event_id}/...`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{dashboard, event, milestone, workspace};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
///
/// GET    /{event_id}/workspaces             -> list_by_event
/// POST   /{event_id}/workspaces             -> create
///
/// POST   /{event_id}/milestones             -> create
///
/// GET    /{event_id}/dashboard/departments    -> departments
/// GET    /{event_id}/dashboard/health         -> event_health
/// GET    /{event_id}/dashboard/activity-feed  -> activity_feed
/// GET    /{event_id}/dashboard/milestones     -> upcoming_milestones
/// ```
pub fn router() -> Router<AppState> {
    let workspace_routes = Router::new().route(
        "/",
        get(workspace::list_by_event).post(workspace::create),
    );

    let milestone_routes = Router::new().route("/", post(milestone::create));

    let dashboard_routes = Router::new()
        .route("/departments", get(dashboard::departments))
        .route("/health", get(dashboard::event_health))
        .route("/activity-feed", get(dashboard::activity_feed))
        .route("/milestones", get(dashboard::upcoming_milestones));

    Router::new()
        .route("/", get(event::list).post(event::create))
        .route("/{id}", get(event::get_by_id))
        .nest("/{event_id}/workspaces", workspace_routes)
        .nest("/{event_id}/milestones", milestone_routes)
        .nest("/{event_id}/dashboard", dashboard_routes)
}
