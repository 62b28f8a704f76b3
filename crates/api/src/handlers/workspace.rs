//! Handlers for the `/workspaces` resource and workspace creation under
//! `/events/{event_id}/workspaces`.
//!
//! Creation enforces the hierarchy rules: one root per event, catalog-driven
//! departments and committees, free-form teams, and the depth cap.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use summit_core::depth::{can_create_child, MAX_WORKSPACE_DEPTH};
use summit_core::error::CoreError;
use summit_core::hierarchy::{child_options, committee, department, WorkspaceKind, WorkspaceStatus};
use summit_core::roles::{Capabilities, ROLE_OWNER};
use summit_core::types::DbId;
use summit_db::models::activity::RecordActivity;
use summit_db::models::event::Event;
use summit_db::models::member::AddMember;
use summit_db::models::workspace::{CreateWorkspace, NewWorkspace, UpdateWorkspace, Workspace};
use summit_db::repositories::{ActivityRepo, EventRepo, MemberRepo, WorkspaceRepo};

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// A workspace together with the caller's effective capabilities on it.
#[derive(Debug, Serialize)]
pub struct WorkspaceDetail {
    pub workspace: Workspace,
    pub capabilities: Capabilities,
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// POST /api/v1/events/{event_id}/workspaces
///
/// With no `parent_id` this creates the event's root workspace (one per
/// event) and enrolls the caller as its owner. With a `parent_id` it
/// creates the next level down: departments under the root, committees
/// under a department (both catalog-driven), free-form teams under a
/// committee.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateWorkspace>,
) -> AppResult<(StatusCode, Json<Workspace>)> {
    let event = EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;

    let workspace = match input.parent_id {
        None => create_root(&state, &auth, &event, &input).await?,
        Some(parent_id) => create_child(&state, &auth, &event, parent_id, &input).await?,
    };

    ActivityRepo::record(
        &state.pool,
        &RecordActivity {
            event_id: event.id,
            workspace_id: Some(workspace.id),
            actor_user_id: Some(auth.user_id),
            action: "workspace.created".to_string(),
            detail: json!({ "kind": workspace.kind, "name": workspace.name }),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(workspace)))
}

/// Create the event's root workspace and enroll the creator as owner.
async fn create_root(
    state: &AppState,
    auth: &AuthUser,
    event: &Event,
    input: &CreateWorkspace,
) -> Result<Workspace, AppError> {
    if WorkspaceRepo::has_root(&state.pool, event.id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "event {} already has a root workspace",
            event.id
        ))));
    }

    let name = match input.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => event.name.clone(),
    };

    let workspace = WorkspaceRepo::create(
        &state.pool,
        &NewWorkspace {
            event_id: event.id,
            parent_id: None,
            kind: WorkspaceKind::Root.as_str().to_string(),
            department_id: None,
            committee_id: None,
            name,
        },
    )
    .await?;

    MemberRepo::add(
        &state.pool,
        workspace.id,
        &AddMember {
            user_id: auth.user_id,
            role: ROLE_OWNER.to_string(),
        },
    )
    .await?;

    Ok(workspace)
}

/// Create a child workspace under `parent_id`, validating the parent, the
/// caller's capabilities, the depth cap, and the catalog rules for the
/// child level.
async fn create_child(
    state: &AppState,
    auth: &AuthUser,
    event: &Event,
    parent_id: DbId,
    input: &CreateWorkspace,
) -> Result<Workspace, AppError> {
    let parent = WorkspaceRepo::find_by_id(&state.pool, parent_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: parent_id,
        }))?;
    if parent.event_id != event.id {
        return Err(AppError::Core(CoreError::validation(
            "parent workspace belongs to a different event",
        )));
    }

    let caps = access::capabilities_for(&state.pool, auth.user_id, &parent).await?;
    access::require(caps.can_create_workspaces, "create workspaces here")?;

    let links: HashMap<DbId, Option<DbId>> =
        WorkspaceRepo::parent_links(&state.pool, event.id)
            .await?
            .into_iter()
            .collect();
    if !can_create_child(parent.id, &links) {
        return Err(AppError::Core(CoreError::validation(format!(
            "workspace nesting is limited to {MAX_WORKSPACE_DEPTH} levels"
        ))));
    }

    let parent_kind = WorkspaceKind::parse(&parent.kind)?;
    let options = child_options(parent_kind, parent.department_id.as_deref())?.ok_or_else(|| {
        AppError::Core(CoreError::validation(
            "team workspaces cannot have children",
        ))
    })?;

    let new = match options.kind {
        WorkspaceKind::Department => {
            let dept_id = input.department_id.as_deref().ok_or_else(|| {
                AppError::Core(CoreError::validation(
                    "department_id is required when creating under the event root",
                ))
            })?;
            let entry = department(dept_id).ok_or_else(|| {
                AppError::Core(CoreError::validation(format!(
                    "unknown department '{dept_id}'"
                )))
            })?;
            NewWorkspace {
                event_id: event.id,
                parent_id: Some(parent.id),
                kind: WorkspaceKind::Department.as_str().to_string(),
                department_id: Some(entry.id.to_string()),
                committee_id: None,
                name: entry.name.to_string(),
            }
        }
        WorkspaceKind::Committee => {
            let committee_id = input.committee_id.as_deref().ok_or_else(|| {
                AppError::Core(CoreError::validation(
                    "committee_id is required when creating under a department",
                ))
            })?;
            let entry = committee(committee_id).ok_or_else(|| {
                AppError::Core(CoreError::validation(format!(
                    "unknown committee '{committee_id}'"
                )))
            })?;
            if parent.department_id.as_deref() != Some(entry.department_id) {
                return Err(AppError::Core(CoreError::validation(format!(
                    "committee '{}' belongs to the '{}' department",
                    entry.id, entry.department_id
                ))));
            }
            NewWorkspace {
                event_id: event.id,
                parent_id: Some(parent.id),
                kind: WorkspaceKind::Committee.as_str().to_string(),
                department_id: None,
                committee_id: Some(entry.id.to_string()),
                name: entry.name.to_string(),
            }
        }
        WorkspaceKind::Team => {
            let name = input
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| {
                    AppError::Core(CoreError::validation("team workspaces need a name"))
                })?;
            NewWorkspace {
                event_id: event.id,
                parent_id: Some(parent.id),
                kind: WorkspaceKind::Team.as_str().to_string(),
                department_id: None,
                committee_id: None,
                name: name.to_string(),
            }
        }
        WorkspaceKind::Root => {
            return Err(AppError::InternalError(
                "child options resolved to a root kind".to_string(),
            ))
        }
    };

    Ok(WorkspaceRepo::create(&state.pool, &new).await?)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{event_id}/workspaces
///
/// Flat list of every workspace under an event, for the sidebar tree.
pub async fn list_by_event(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<Vec<Workspace>>> {
    EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;
    let workspaces = WorkspaceRepo::list_by_event(&state.pool, event_id).await?;
    Ok(Json(workspaces))
}

/// GET /api/v1/workspaces/{id}
///
/// Returns the workspace plus the caller's effective capabilities on it,
/// so the shell can decide which tabs and actions to show.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<WorkspaceDetail>> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }))?;
    let capabilities = access::capabilities_for(&state.pool, auth.user_id, &workspace).await?;
    Ok(Json(WorkspaceDetail {
        workspace,
        capabilities,
    }))
}

/// GET /api/v1/workspaces/{id}/creation-options
///
/// What may be created one level below this workspace: the department
/// catalog under a root, the matching committees under a department,
/// free-form teams under a committee, and `null` under a team.
pub async fn creation_options(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }))?;
    let kind = WorkspaceKind::parse(&workspace.kind)?;
    let options = child_options(kind, workspace.department_id.as_deref())?;
    Ok(Json(DataResponse { data: options }))
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

/// PATCH /api/v1/workspaces/{id}
///
/// Rename and/or change status. Requires settings-level capabilities
/// (manager or above). Archiving is recorded in the activity feed;
/// archived workspaces stay in every rollup.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWorkspace>,
) -> AppResult<Json<Workspace>> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }))?;

    let caps = access::capabilities_for(&state.pool, auth.user_id, &workspace).await?;
    access::require(caps.can_edit_settings, "edit workspace settings")?;

    if let Some(name) = input.name.as_deref() {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::validation(
                "workspace name must not be empty",
            )));
        }
    }
    if let Some(status) = input.status.as_deref() {
        WorkspaceStatus::parse(status)?;
    }

    let updated = WorkspaceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id,
        }))?;

    let was_archived = workspace.status != updated.status
        && updated.status == WorkspaceStatus::Archived.as_str();
    if was_archived {
        ActivityRepo::record(
            &state.pool,
            &RecordActivity {
                event_id: updated.event_id,
                workspace_id: Some(updated.id),
                actor_user_id: Some(auth.user_id),
                action: "workspace.archived".to_string(),
                detail: json!({ "name": updated.name }),
            },
        )
        .await?;
    }

    Ok(Json(updated))
}
