//! Handlers for tasks under `/workspaces/{workspace_id}/tasks` and
//! `/tasks/{id}`.
//!
//! Status changes go through a dedicated endpoint so every transition
//! lands in the activity feed; the generic PATCH cannot touch status.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use summit_core::error::CoreError;
use summit_core::shell::ROLE_SCOPE_ALL;
use summit_core::task::{is_valid_category, validate_title, TaskPriority, TaskStatus};
use summit_core::types::DbId;
use summit_db::models::activity::RecordActivity;
use summit_db::models::task::{CreateTask, SetTaskStatus, Task, UpdateTask};
use summit_db::models::workspace::Workspace;
use summit_db::repositories::{ActivityRepo, TaskRepo, WorkspaceRepo};

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query params for the task list.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    /// Role scope to filter by. Absent or `all` shows everything;
    /// a specific role shows that role's tasks plus unscoped ones.
    pub role_scope: Option<String>,
}

/// GET /api/v1/workspaces/{workspace_id}/tasks?role_scope=venue_lead
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Query(params): Query<TaskListQuery>,
) -> AppResult<Json<Vec<Task>>> {
    WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;

    let scope = params
        .role_scope
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ROLE_SCOPE_ALL);
    let tasks = TaskRepo::list_by_workspace(&state.pool, workspace_id, scope).await?;
    Ok(Json(tasks))
}

/// POST /api/v1/workspaces/{workspace_id}/tasks
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, workspace_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Workspace",
            id: workspace_id,
        }))?;

    let caps = access::capabilities_for(&state.pool, auth.user_id, &workspace).await?;
    access::require(caps.can_manage_tasks, "manage tasks here")?;

    let title = validate_title(&input.title)?.to_string();
    if let Some(category) = input.category.as_deref() {
        if !is_valid_category(category) {
            return Err(AppError::Core(CoreError::validation(format!(
                "unknown task category '{category}'"
            ))));
        }
    }
    if let Some(priority) = input.priority.as_deref() {
        TaskPriority::parse(priority)?;
    }

    // Blank or `all` scopes mean the task is for everyone.
    let role_scope = input
        .role_scope
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ROLE_SCOPE_ALL)
        .map(str::to_string);

    let task = TaskRepo::create(
        &state.pool,
        workspace_id,
        &CreateTask {
            title,
            role_scope,
            ..input
        },
    )
    .await?;

    ActivityRepo::record(
        &state.pool,
        &RecordActivity {
            event_id: workspace.event_id,
            workspace_id: Some(workspace.id),
            actor_user_id: Some(auth.user_id),
            action: "task.created".to_string(),
            detail: json!({ "task_id": task.id, "title": task.title }),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/v1/tasks/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    let (task, workspace) = find_task_and_workspace(&state, id).await?;

    let caps = access::capabilities_for(&state.pool, auth.user_id, &workspace).await?;
    access::require(caps.can_manage_tasks, "manage tasks here")?;

    let mut input = input;
    if let Some(title) = input.title.as_deref() {
        input.title = Some(validate_title(title)?.to_string());
    }
    if let Some(priority) = input.priority.as_deref() {
        TaskPriority::parse(priority)?;
    }
    if let Some(scope) = input.role_scope.as_deref() {
        let trimmed = scope.trim();
        if trimmed.is_empty() || trimmed == ROLE_SCOPE_ALL {
            return Err(AppError::Core(CoreError::validation(
                "role_scope must be a specific role",
            )));
        }
        input.role_scope = Some(trimmed.to_string());
    }

    let updated = TaskRepo::update(&state.pool, task.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(updated))
}

/// PUT /api/v1/tasks/{id}/status
pub async fn set_status(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetTaskStatus>,
) -> AppResult<Json<Task>> {
    let status = TaskStatus::parse(&input.status)?;

    let (task, workspace) = find_task_and_workspace(&state, id).await?;
    let caps = access::capabilities_for(&state.pool, auth.user_id, &workspace).await?;
    access::require(caps.can_manage_tasks, "manage tasks here")?;

    let updated = TaskRepo::set_status(&state.pool, task.id, status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    ActivityRepo::record(
        &state.pool,
        &RecordActivity {
            event_id: workspace.event_id,
            workspace_id: Some(workspace.id),
            actor_user_id: Some(auth.user_id),
            action: "task.status_changed".to_string(),
            detail: json!({
                "task_id": updated.id,
                "title": updated.title,
                "from": task.status,
                "to": updated.status,
            }),
        },
    )
    .await?;

    Ok(Json(updated))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let (task, workspace) = find_task_and_workspace(&state, id).await?;

    let caps = access::capabilities_for(&state.pool, auth.user_id, &workspace).await?;
    access::require(caps.can_manage_tasks, "manage tasks here")?;

    let deleted = TaskRepo::delete(&state.pool, task.id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }

    ActivityRepo::record(
        &state.pool,
        &RecordActivity {
            event_id: workspace.event_id,
            workspace_id: Some(workspace.id),
            actor_user_id: Some(auth.user_id),
            action: "task.deleted".to_string(),
            detail: json!({ "task_id": task.id, "title": task.title }),
        },
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Load a task and its workspace, or 404.
///
/// A task pointing at a missing workspace is a corrupt row (the FK forbids
/// it), so that case maps to a 500 rather than a 404.
async fn find_task_and_workspace(
    state: &AppState,
    id: DbId,
) -> Result<(Task, Workspace), AppError> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    let workspace = WorkspaceRepo::find_by_id(&state.pool, task.workspace_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "task {} references missing workspace {}",
                task.id, task.workspace_id
            ))
        })?;
    Ok((task, workspace))
}
