//! Handlers for milestones under `/events/{event_id}/milestones` and
//! `/milestones/{id}/complete`.
//!
//! A milestone may be pinned to a workspace or belong to the event as a
//! whole. Permission checks anchor on the pinned workspace when there is
//! one, otherwise on the event root.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use summit_core::error::CoreError;
use summit_core::types::DbId;
use summit_db::models::activity::RecordActivity;
use summit_db::models::milestone::{CreateMilestone, Milestone};
use summit_db::models::workspace::Workspace;
use summit_db::repositories::{ActivityRepo, MilestoneRepo, WorkspaceRepo};

use crate::access;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/events/{event_id}/milestones
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateMilestone>,
) -> AppResult<(StatusCode, Json<Milestone>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::validation(
            "milestone title must not be empty",
        )));
    }

    let anchor = capability_anchor(&state, event_id, input.workspace_id).await?;
    if let Some(workspace_id) = input.workspace_id {
        if anchor.event_id != event_id {
            return Err(AppError::Core(CoreError::validation(format!(
                "workspace {workspace_id} belongs to a different event"
            ))));
        }
    }

    let caps = access::capabilities_for(&state.pool, auth.user_id, &anchor).await?;
    access::require(caps.can_manage_tasks, "manage milestones here")?;

    let milestone = MilestoneRepo::create(&state.pool, event_id, &input).await?;

    ActivityRepo::record(
        &state.pool,
        &RecordActivity {
            event_id,
            workspace_id: milestone.workspace_id,
            actor_user_id: Some(auth.user_id),
            action: "milestone.created".to_string(),
            detail: json!({ "title": milestone.title, "due_at": milestone.due_at }),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(milestone)))
}

/// PUT /api/v1/milestones/{id}/complete
///
/// Idempotent: completing an already-completed milestone keeps the
/// original completion time and records no new activity.
pub async fn complete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Milestone>> {
    let milestone = MilestoneRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;

    let anchor = capability_anchor(&state, milestone.event_id, milestone.workspace_id).await?;
    let caps = access::capabilities_for(&state.pool, auth.user_id, &anchor).await?;
    access::require(caps.can_manage_tasks, "manage milestones here")?;

    let was_open = milestone.completed_at.is_none();
    let completed = MilestoneRepo::complete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Milestone",
            id,
        }))?;

    if was_open {
        ActivityRepo::record(
            &state.pool,
            &RecordActivity {
                event_id: completed.event_id,
                workspace_id: completed.workspace_id,
                actor_user_id: Some(auth.user_id),
                action: "milestone.completed".to_string(),
                detail: json!({ "title": completed.title }),
            },
        )
        .await?;
    }

    Ok(Json(completed))
}

/// The workspace a milestone's permission check anchors on: the pinned
/// workspace when set, otherwise the event root. An event with no root
/// yet has nobody enrolled, so there is nothing to anchor on.
async fn capability_anchor(
    state: &AppState,
    event_id: DbId,
    workspace_id: Option<DbId>,
) -> Result<Workspace, AppError> {
    match workspace_id {
        Some(id) => WorkspaceRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Workspace",
                id,
            })),
        None => WorkspaceRepo::find_root(&state.pool, event_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Forbidden(
                    "Event has no root workspace yet".into(),
                ))
            }),
    }
}
