//! Handlers for workspace membership under `/workspaces/{workspace_id}/members`.
//!
//! Granting and removing roles is level-gated: a member can only manage
//! roles strictly below their own strongest level, and owner roles are
//! never granted over the API (the event creator gets one at root
//! creation).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use summit_core::error::CoreError;
use summit_core::roles::{assignable_for_level, best_level, role_level, RoleLevel, ROLE_OWNER};
use summit_core::types::DbId;
use summit_db::models::activity::RecordActivity;
use summit_db::models::member::{AddMember, WorkspaceMember};
use summit_db::repositories::{ActivityRepo, MemberRepo, WorkspaceRepo};

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/workspaces/{workspace_id}/members
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<Vec<WorkspaceMember>>> {
    WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;
    let members = MemberRepo::list_by_workspace(&state.pool, workspace_id).await?;
    Ok(Json(members))
}

/// POST /api/v1/workspaces/{workspace_id}/members
///
/// Enroll a user with a role strictly below the caller's own level.
/// Re-enrolling a removed user reactivates their membership with the
/// new role.
pub async fn invite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<AddMember>,
) -> AppResult<(StatusCode, Json<WorkspaceMember>)> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;

    let actor_level = access::member_authority(&state.pool, auth.user_id, &workspace).await?;

    let role = input.role.trim();
    if role.is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "role must not be empty",
        )));
    }
    if role == ROLE_OWNER {
        return Err(AppError::Core(CoreError::Forbidden(
            "The owner role cannot be granted".into(),
        )));
    }
    if !assignable_for_level(RoleLevel::Owner).contains(&role) {
        return Err(AppError::Core(CoreError::validation(format!(
            "unknown role '{role}'"
        ))));
    }
    if !assignable_for_level(actor_level).contains(&role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot grant a role at or above your own level".into(),
        )));
    }

    let member = MemberRepo::add(
        &state.pool,
        workspace_id,
        &AddMember {
            user_id: input.user_id,
            role: role.to_string(),
        },
    )
    .await?;

    ActivityRepo::record(
        &state.pool,
        &RecordActivity {
            event_id: workspace.event_id,
            workspace_id: Some(workspace.id),
            actor_user_id: Some(auth.user_id),
            action: "member.added".to_string(),
            detail: json!({ "user_id": member.user_id, "role": member.role }),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// DELETE /api/v1/workspaces/{workspace_id}/members/{user_id}
///
/// Deactivate a membership. The row is kept for history; re-enrollment
/// reuses it. Removing a member at or above your own level is refused,
/// which also means nobody can remove the last owner.
pub async fn remove(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((workspace_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<WorkspaceMember>> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;

    let actor_level = access::member_authority(&state.pool, auth.user_id, &workspace).await?;

    let target = MemberRepo::find_active(&state.pool, workspace_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Membership",
            id: user_id,
        }))?;
    if actor_level >= role_level(&target.role) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot remove a member at or above your own level".into(),
        )));
    }

    let removed = MemberRepo::remove(&state.pool, workspace_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Membership",
            id: user_id,
        }))?;

    ActivityRepo::record(
        &state.pool,
        &RecordActivity {
            event_id: workspace.event_id,
            workspace_id: Some(workspace.id),
            actor_user_id: Some(auth.user_id),
            action: "member.removed".to_string(),
            detail: json!({ "user_id": removed.user_id, "role": removed.role }),
        },
    )
    .await?;

    Ok(Json(removed))
}

/// GET /api/v1/workspaces/{workspace_id}/assignable-roles
///
/// The catalog roles the caller may grant on this workspace: everything
/// strictly below their strongest level on the ancestor chain, empty for
/// non-members.
pub async fn assignable(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;

    let roles = access::held_roles(&state.pool, auth.user_id, &workspace).await?;
    let assignable = best_level(&roles)
        .map(assignable_for_level)
        .unwrap_or_default();

    Ok(Json(DataResponse { data: assignable }))
}
