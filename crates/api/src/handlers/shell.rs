//! Handlers for the workspace shell under `/shell`.
//!
//! The shell endpoints wrap the pure resolution logic in
//! `summit_core::shell`: resolve raw location inputs into a concrete
//! (workspace, tab, task, role scope) state, persist last-active tabs per
//! (user, workspace, role scope), and compute navigation targets for
//! workspace switches.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use summit_core::error::CoreError;
use summit_core::hierarchy::{WorkspaceKind, WorkspaceStatus};
use summit_core::rollup::{WorkspaceNode, WorkspaceTree};
use summit_core::shell::{
    apply_saved_tab, canonical_params, is_valid_tab, resolve_shell, workspace_path,
    CanonicalParams, NavigationTarget, ShellRequest, ShellState, ROLE_SCOPE_ALL,
};
use summit_core::types::DbId;
use summit_db::models::shell::ShellPreference;
use summit_db::repositories::{EventRepo, ShellPreferenceRepo, WorkspaceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Raw location inputs for `GET /shell/state`, mirroring what the client
/// URL carries.
#[derive(Debug, Deserialize)]
pub struct ShellStateQuery {
    pub workspace_id: Option<DbId>,
    pub query_workspace_id: Option<DbId>,
    pub route_workspace_id: Option<DbId>,
    pub tab: Option<String>,
    pub task_id: Option<DbId>,
    pub role_scope: Option<String>,
}

/// A resolved shell state plus the canonical query parameters for it.
#[derive(Debug, Serialize)]
pub struct ShellStateData {
    pub state: ShellState,
    /// Whether a saved last-active tab overrode the default.
    pub saved_tab_applied: bool,
    pub params: CanonicalParams,
}

/// Body for `PUT /shell/tab`.
#[derive(Debug, Deserialize)]
pub struct SwitchTab {
    pub workspace_id: DbId,
    pub tab: String,
    pub task_id: Option<DbId>,
    pub role_scope: Option<String>,
}

/// Body for `PUT /shell/role-scope`.
#[derive(Debug, Deserialize)]
pub struct SwitchRoleScope {
    pub workspace_id: DbId,
    pub role_scope: String,
    pub tab: Option<String>,
    pub task_id: Option<DbId>,
}

/// Body for `POST /shell/switch-workspace`.
#[derive(Debug, Deserialize)]
pub struct SwitchWorkspace {
    pub workspace_id: DbId,
}

/// Response for tab switches: the new state plus the stored preference.
#[derive(Debug, Serialize)]
pub struct ShellUpdate {
    pub state: ShellState,
    pub params: CanonicalParams,
    pub preference: ShellPreference,
}

// ---------------------------------------------------------------------------
// State resolution
// ---------------------------------------------------------------------------

/// GET /api/v1/shell/state
///
/// Resolves raw location inputs into a concrete shell state. When the
/// resolved tab is the default and the (user, workspace, role scope)
/// triple has a saved last-active tab, the saved tab wins.
pub async fn resolve(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ShellStateQuery>,
) -> AppResult<impl IntoResponse> {
    let request = ShellRequest {
        workspace_id: query.workspace_id,
        query_workspace_id: query.query_workspace_id,
        route_workspace_id: query.route_workspace_id,
        tab: query.tab,
        task_id: query.task_id,
        role_scope: query.role_scope,
    };
    let mut shell = resolve_shell(&request);

    let mut saved_tab_applied = false;
    if let Some(workspace_id) = shell.workspace_id {
        WorkspaceRepo::find_by_id(&state.pool, workspace_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Workspace",
                id: workspace_id,
            }))?;

        let saved =
            ShellPreferenceRepo::find(&state.pool, auth.user_id, workspace_id, &shell.role_scope)
                .await?;
        saved_tab_applied =
            apply_saved_tab(&mut shell, saved.as_ref().map(|p| p.last_active_tab.as_str()));
    }

    let params = canonical_params(&shell);
    Ok(Json(DataResponse {
        data: ShellStateData {
            state: shell,
            saved_tab_applied,
            params,
        },
    }))
}

// ---------------------------------------------------------------------------
// Tab and scope switches
// ---------------------------------------------------------------------------

/// PUT /api/v1/shell/tab
///
/// Switch the active tab and persist it as the last-active tab for the
/// (user, workspace, role scope) triple.
pub async fn switch_tab(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SwitchTab>,
) -> AppResult<impl IntoResponse> {
    if !is_valid_tab(&input.tab) {
        return Err(AppError::Core(CoreError::validation(format!(
            "unknown tab '{}'",
            input.tab
        ))));
    }

    WorkspaceRepo::find_by_id(&state.pool, input.workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: input.workspace_id,
        }))?;

    let role_scope = normalize_scope(input.role_scope.as_deref());
    let preference = ShellPreferenceRepo::upsert(
        &state.pool,
        auth.user_id,
        input.workspace_id,
        &role_scope,
        &input.tab,
    )
    .await?;

    let shell = ShellState {
        workspace_id: Some(input.workspace_id),
        tab: input.tab,
        task_id: input.task_id,
        role_scope,
    };
    let params = canonical_params(&shell);
    Ok(Json(DataResponse {
        data: ShellUpdate {
            state: shell,
            params,
            preference,
        },
    }))
}

/// PUT /api/v1/shell/role-scope
///
/// Switch the role scope. Without an explicit tab the new scope's saved
/// last-active tab is restored; with one, that tab is persisted under
/// the new scope.
pub async fn switch_role_scope(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SwitchRoleScope>,
) -> AppResult<impl IntoResponse> {
    let role_scope = input.role_scope.trim();
    if role_scope.is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "role_scope must not be blank",
        )));
    }

    WorkspaceRepo::find_by_id(&state.pool, input.workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: input.workspace_id,
        }))?;

    let request = ShellRequest {
        workspace_id: Some(input.workspace_id),
        tab: input.tab.clone(),
        task_id: input.task_id,
        role_scope: Some(role_scope.to_string()),
        ..ShellRequest::default()
    };
    let mut shell = resolve_shell(&request);

    let explicit_tab = input.tab.as_deref().is_some_and(is_valid_tab);
    let mut saved_tab_applied = false;
    if explicit_tab {
        ShellPreferenceRepo::upsert(
            &state.pool,
            auth.user_id,
            input.workspace_id,
            &shell.role_scope,
            &shell.tab,
        )
        .await?;
    } else {
        let saved = ShellPreferenceRepo::find(
            &state.pool,
            auth.user_id,
            input.workspace_id,
            &shell.role_scope,
        )
        .await?;
        saved_tab_applied =
            apply_saved_tab(&mut shell, saved.as_ref().map(|p| p.last_active_tab.as_str()));
    }

    let params = canonical_params(&shell);
    Ok(Json(DataResponse {
        data: ShellStateData {
            state: shell,
            saved_tab_applied,
            params,
        },
    }))
}

/// Blank or absent scopes collapse to the aggregate `all` scope.
fn normalize_scope(scope: Option<&str>) -> String {
    match scope.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => ROLE_SCOPE_ALL.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Workspace switching
// ---------------------------------------------------------------------------

/// POST /api/v1/shell/switch-workspace
///
/// Compute where the shell should navigate for a workspace switch. A
/// missing workspace or event degrades to the dashboard target instead
/// of erroring; stale ids are expected from long-lived clients.
pub async fn switch_workspace(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SwitchWorkspace>,
) -> AppResult<impl IntoResponse> {
    let Some(workspace) = WorkspaceRepo::find_by_id(&state.pool, input.workspace_id).await? else {
        tracing::warn!(
            workspace_id = input.workspace_id,
            "Switch target workspace not found, falling back to dashboard"
        );
        return Ok(Json(DataResponse {
            data: NavigationTarget::Dashboard,
        }));
    };

    let Some(event) = EventRepo::find_by_id(&state.pool, workspace.event_id).await? else {
        tracing::warn!(
            event_id = workspace.event_id,
            "Workspace event not found, falling back to dashboard"
        );
        return Ok(Json(DataResponse {
            data: NavigationTarget::Dashboard,
        }));
    };

    let rows = WorkspaceRepo::list_by_event(&state.pool, event.id).await?;
    let nodes: Vec<WorkspaceNode> = rows
        .into_iter()
        .filter_map(|w| {
            let kind = match WorkspaceKind::parse(&w.kind) {
                Ok(kind) => kind,
                Err(_) => {
                    tracing::warn!(workspace_id = w.id, kind = %w.kind, "Skipping workspace with unrecognized kind");
                    return None;
                }
            };
            let status = match WorkspaceStatus::parse(&w.status) {
                Ok(status) => status,
                Err(_) => {
                    tracing::warn!(workspace_id = w.id, status = %w.status, "Skipping workspace with unrecognized status");
                    return None;
                }
            };
            Some(WorkspaceNode {
                id: w.id,
                parent_id: w.parent_id,
                kind,
                status,
                department_id: w.department_id,
                name: w.name,
            })
        })
        .collect();

    let tree = WorkspaceTree::build(&nodes);
    let path = workspace_path(&tree, workspace.id);

    Ok(Json(DataResponse {
        data: NavigationTarget::Workspace {
            org_slug: event.org_slug,
            event_slug: event.slug,
            path,
        },
    }))
}
