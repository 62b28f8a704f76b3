//! Handlers for the event dashboard under `/events/{event_id}/dashboard`.
//!
//! The department and health widgets load one snapshot of the event
//! (workspaces, tasks, members, budget lines, resources) and hand it to
//! the pure rollup in `summit_core`; the feed and milestone widgets are
//! thin queries.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use summit_core::error::CoreError;
use summit_core::hierarchy::{WorkspaceKind, WorkspaceStatus};
use summit_core::roles::MemberStatus;
use summit_core::rollup::{
    BudgetRow, EventRollup, EventSnapshot, MemberRow, ResourceRow, TaskRow, WorkspaceNode,
};
use summit_core::task::TaskStatus;
use summit_core::types::{DbId, Timestamp};
use summit_db::repositories::{
    BudgetLineRepo, EventRepo, MemberRepo, MilestoneRepo, ResourceRepo, TaskRepo, WorkspaceRepo,
};
use summit_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Widget response types
// ---------------------------------------------------------------------------

/// A single row for the activity feed widget.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct ActivityFeedItem {
    pub id: DbId,
    pub action: String,
    pub workspace_id: Option<DbId>,
    /// Workspace name at read time; `Unassigned` for event-level entries
    /// and entries whose workspace was deleted.
    pub workspace_name: String,
    pub actor_user_id: Option<DbId>,
    pub detail: serde_json::Value,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query params for `GET /events/{event_id}/dashboard/activity-feed`.
#[derive(Debug, Deserialize)]
pub struct ActivityFeedQuery {
    /// Maximum entries to return. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
    /// Offset for pagination. Defaults to 0.
    pub offset: Option<i64>,
}

/// Query params for `GET /events/{event_id}/dashboard/milestones`.
#[derive(Debug, Deserialize)]
pub struct MilestonesQuery {
    /// Maximum milestones to return. Defaults to 5, capped at 50.
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Snapshot loading
// ---------------------------------------------------------------------------

/// Fetch everything the rollup consumes in one concurrent pass.
///
/// Enum columns are parsed here; a row that fails to parse means the CHECK
/// constraints were bypassed, which surfaces as a 500, not a 400.
async fn load_snapshot(pool: &DbPool, event_id: DbId) -> Result<EventSnapshot, AppError> {
    let (workspaces, tasks, members, budgets, resources) = tokio::try_join!(
        WorkspaceRepo::list_by_event(pool, event_id),
        TaskRepo::list_by_event(pool, event_id),
        MemberRepo::list_by_event(pool, event_id),
        BudgetLineRepo::list_by_event(pool, event_id),
        ResourceRepo::list_by_event(pool, event_id),
    )?;

    let workspaces = workspaces
        .into_iter()
        .map(|w| {
            let kind = WorkspaceKind::parse(&w.kind).map_err(|_| {
                AppError::InternalError(format!("workspace {} has an unrecognized kind", w.id))
            })?;
            let status = WorkspaceStatus::parse(&w.status).map_err(|_| {
                AppError::InternalError(format!("workspace {} has an unrecognized status", w.id))
            })?;
            Ok(WorkspaceNode {
                id: w.id,
                parent_id: w.parent_id,
                kind,
                status,
                department_id: w.department_id,
                name: w.name,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let tasks = tasks
        .into_iter()
        .map(|t| {
            let status = TaskStatus::parse(&t.status).map_err(|_| {
                AppError::InternalError(format!("task {} has an unrecognized status", t.id))
            })?;
            Ok(TaskRow {
                workspace_id: t.workspace_id,
                status,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let members = members
        .into_iter()
        .map(|m| {
            let status = MemberStatus::parse(&m.status).map_err(|_| {
                AppError::InternalError(format!("membership {} has an unrecognized status", m.id))
            })?;
            Ok(MemberRow {
                workspace_id: m.workspace_id,
                user_id: m.user_id,
                status,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let budgets = budgets
        .into_iter()
        .map(|b| BudgetRow {
            workspace_id: b.workspace_id,
            allocated_cents: b.allocated_cents,
            used_cents: b.used_cents,
        })
        .collect();

    let resources = resources
        .into_iter()
        .map(|r| ResourceRow {
            workspace_id: r.workspace_id,
            quantity: r.quantity,
            available: r.available,
        })
        .collect();

    Ok(EventSnapshot {
        workspaces,
        tasks,
        members,
        budgets,
        resources,
    })
}

async fn require_event(pool: &DbPool, event_id: DbId) -> Result<(), AppError> {
    EventRepo::find_by_id(pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Department and health widgets
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{event_id}/dashboard/departments
///
/// Per-department subtree aggregates, ascending workspace id.
pub async fn departments(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_event(&state.pool, event_id).await?;
    let snapshot = load_snapshot(&state.pool, event_id).await?;
    let rollup = EventRollup::compute(&snapshot);
    Ok(Json(DataResponse {
        data: rollup.departments,
    }))
}

/// GET /api/v1/events/{event_id}/dashboard/health
///
/// Event-wide totals plus per-department progress percentages.
pub async fn event_health(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_event(&state.pool, event_id).await?;
    let snapshot = load_snapshot(&state.pool, event_id).await?;
    let rollup = EventRollup::compute(&snapshot);
    Ok(Json(DataResponse {
        data: rollup.health,
    }))
}

// ---------------------------------------------------------------------------
// Activity feed widget
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{event_id}/dashboard/activity-feed
///
/// Newest entries first. Workspace names are joined at read time so the
/// feed survives workspace deletion.
pub async fn activity_feed(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Query(params): Query<ActivityFeedQuery>,
) -> AppResult<impl IntoResponse> {
    require_event(&state.pool, event_id).await?;

    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let offset = params.offset.unwrap_or(0).max(0);

    let items = sqlx::query_as::<_, ActivityFeedItem>(
        "SELECT a.id, a.action, a.workspace_id, \
                COALESCE(w.name, 'Unassigned') AS workspace_name, \
                a.actor_user_id, a.detail, a.created_at \
         FROM activities a \
         LEFT JOIN workspaces w ON w.id = a.workspace_id \
         WHERE a.event_id = $1 \
         ORDER BY a.created_at DESC, a.id DESC \
         LIMIT $2 OFFSET $3",
    )
    .bind(event_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// Milestones widget
// ---------------------------------------------------------------------------

/// GET /api/v1/events/{event_id}/dashboard/milestones
///
/// The next milestones due, overdue ones first.
pub async fn upcoming_milestones(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Query(params): Query<MilestonesQuery>,
) -> AppResult<impl IntoResponse> {
    require_event(&state.pool, event_id).await?;

    let limit = params.limit.unwrap_or(5).clamp(1, 50);
    let milestones = MilestoneRepo::upcoming(&state.pool, event_id, limit).await?;
    Ok(Json(DataResponse { data: milestones }))
}
