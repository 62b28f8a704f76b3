//! Route definitions for the `/workspaces` resource.
//!
//! Workspace creation lives under `/events/{event_id}/workspaces`; this
//! router covers reads, settings updates, and the workspace-scoped
//! sub-resources (tasks, members, budgets, resources).

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{budget, member, resource, task, workspace};
use crate::state::AppState;

/// Routes mounted at `/workspaces`.
///
/// ```text
/// GET    /{id}                              -> get_by_id
/// PATCH  /{id}                              -> update
/// GET    /{id}/creation-options             -> creation_options
///
/// GET    /{workspace_id}/tasks              -> list
/// POST   /{workspace_id}/tasks              -> create
///
/// GET    /{workspace_id}/members            -> list
/// POST   /{workspace_id}/members            -> invite
/// DELETE /{workspace_id}/members/{user_id}  -> remove
/// GET    /{workspace_id}/assignable-roles   -> assignable
///
/// GET    /{workspace_id}/budgets            -> list
/// POST   /{workspace_id}/budgets            -> create
///
/// GET    /{workspace_id}/resources          -> list
/// POST   /{workspace_id}/resources          -> create
/// ```
pub fn router() -> Router<AppState> {
    let task_routes = Router::new().route("/", get(task::list).post(task::create));

    let member_routes = Router::new()
        .route("/", get(member::list).post(member::invite))
        .route("/{user_id}", delete(member::remove));

    let budget_routes = Router::new().route("/", get(budget::list).post(budget::create));

    let resource_routes = Router::new().route("/", get(resource::list).post(resource::create));

    Router::new()
        .route("/{id}", get(workspace::get_by_id).patch(workspace::update))
        .route("/{id}/creation-options", get(workspace::creation_options))
        .route("/{workspace_id}/assignable-roles", get(member::assignable))
        .nest("/{workspace_id}/tasks", task_routes)
        .nest("/{workspace_id}/members", member_routes)
        .nest("/{workspace_id}/budgets", budget_routes)
        .nest("/{workspace_id}/resources", resource_routes)
}
