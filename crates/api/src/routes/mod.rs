pub mod events;
pub mod health;
pub mod milestones;
pub mod shell;
pub mod tasks;
pub mod workspaces;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events                                          list, create
/// /events/{id}                                     get
/// /events/{event_id}/workspaces                    list, create (root or child)
/// /events/{event_id}/milestones                    create
/// /events/{event_id}/dashboard/departments         department rollups (GET)
/// /events/{event_id}/dashboard/health              event health widget (GET)
/// /events/{event_id}/dashboard/activity-feed       activity feed widget (GET)
/// /events/{event_id}/dashboard/milestones          upcoming milestones widget (GET)
///
/// /workspaces/{id}                                 get, update (PATCH)
/// /workspaces/{id}/creation-options                child creation options (GET)
/// /workspaces/{workspace_id}/tasks                 list, create
/// /workspaces/{workspace_id}/members               list, invite
/// /workspaces/{workspace_id}/members/{user_id}     remove (DELETE)
/// /workspaces/{workspace_id}/assignable-roles      grantable roles (GET)
/// /workspaces/{workspace_id}/budgets               list, add line
/// /workspaces/{workspace_id}/resources             list, add
///
/// /tasks/{id}                                      update (PATCH), delete
/// /tasks/{id}/status                               set status (PUT)
///
/// /milestones/{id}/complete                        complete (PUT)
///
/// /shell/state                                     resolve shell state (GET)
/// /shell/tab                                       switch tab (PUT)
/// /shell/role-scope                                switch role scope (PUT)
/// /shell/switch-workspace                          navigation target (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Event routes (also nests workspaces, milestones, and dashboard widgets).
        .nest("/events", events::router())
        // Workspace-scoped sub-resources (tasks, members, budgets, resources).
        .nest("/workspaces", workspaces::router())
        // Task mutations addressed by task id.
        .nest("/tasks", tasks::router())
        // Milestone completion.
        .nest("/milestones", milestones::router())
        // Shell state resolution and preferences.
        .nest("/shell", shell::router())
}
