//! Handlers for resources under `/workspaces/{workspace_id}/resources`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use summit_core::error::CoreError;
use summit_core::types::DbId;
use summit_db::models::activity::RecordActivity;
use summit_db::models::resource::{CreateResource, Resource};
use summit_db::repositories::{ActivityRepo, ResourceRepo, WorkspaceRepo};

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/workspaces/{workspace_id}/resources
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<Vec<Resource>>> {
    WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;
    let resources = ResourceRepo::list_by_workspace(&state.pool, workspace_id).await?;
    Ok(Json(resources))
}

/// POST /api/v1/workspaces/{workspace_id}/resources
///
/// `available` defaults to the full quantity and may never exceed it.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<CreateResource>,
) -> AppResult<(StatusCode, Json<Resource>)> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;

    let caps = access::capabilities_for(&state.pool, auth.user_id, &workspace).await?;
    access::require(caps.can_manage_tasks, "manage resources here")?;

    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "resource name must not be empty",
        )));
    }
    if input.quantity < 0 {
        return Err(AppError::Core(CoreError::validation(
            "resource quantity must not be negative",
        )));
    }
    if let Some(available) = input.available {
        if available < 0 || available > input.quantity {
            return Err(AppError::Core(CoreError::validation(
                "available must be between 0 and the quantity",
            )));
        }
    }

    let resource = ResourceRepo::create(&state.pool, workspace_id, &input).await?;

    ActivityRepo::record(
        &state.pool,
        &RecordActivity {
            event_id: workspace.event_id,
            workspace_id: Some(workspace.id),
            actor_user_id: Some(auth.user_id),
            action: "resource.added".to_string(),
            detail: json!({ "name": resource.name, "quantity": resource.quantity }),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(resource)))
}
