//! Handlers for budget lines under `/workspaces/{workspace_id}/budgets`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use summit_core::error::CoreError;
use summit_core::types::DbId;
use summit_db::models::activity::RecordActivity;
use summit_db::models::budget::{BudgetLine, CreateBudgetLine};
use summit_db::repositories::{ActivityRepo, BudgetLineRepo, WorkspaceRepo};

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/workspaces/{workspace_id}/budgets
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<Vec<BudgetLine>>> {
    WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;
    let lines = BudgetLineRepo::list_by_workspace(&state.pool, workspace_id).await?;
    Ok(Json(lines))
}

/// POST /api/v1/workspaces/{workspace_id}/budgets
///
/// Money is settings-level: adding a line requires manager capabilities.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<CreateBudgetLine>,
) -> AppResult<(StatusCode, Json<BudgetLine>)> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;

    let caps = access::capabilities_for(&state.pool, auth.user_id, &workspace).await?;
    access::require(caps.can_edit_settings, "manage budgets here")?;

    if input.label.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "budget line label must not be empty",
        )));
    }
    if input.allocated_cents < 0 || input.used_cents.unwrap_or(0) < 0 {
        return Err(AppError::Core(CoreError::validation(
            "budget amounts must not be negative",
        )));
    }

    let line = BudgetLineRepo::create(&state.pool, workspace_id, &input).await?;

    ActivityRepo::record(
        &state.pool,
        &RecordActivity {
            event_id: workspace.event_id,
            workspace_id: Some(workspace.id),
            actor_user_id: Some(auth.user_id),
            action: "budget.line_added".to_string(),
            detail: json!({ "label": line.label, "allocated_cents": line.allocated_cents }),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(line)))
}
