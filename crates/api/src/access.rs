//! Workspace permission resolution.
//!
//! A role granted on a workspace also applies to everything below it, so
//! every check walks the ancestor chain: collect the ids from the target
//! workspace up to the root, gather the caller's active roles across that
//! chain, and take the capabilities of the strongest one.

use std::collections::HashMap;

use summit_core::depth::MAX_WORKSPACE_DEPTH;
use summit_core::error::CoreError;
use summit_core::roles::{best_level, Capabilities, RoleLevel};
use summit_core::types::DbId;
use summit_db::models::workspace::Workspace;
use summit_db::repositories::{MemberRepo, WorkspaceRepo};
use summit_db::DbPool;

use crate::error::AppError;

/// Ids of `workspace` and its ancestors, nearest first.
///
/// The walk is capped at [`MAX_WORKSPACE_DEPTH`] hops so a corrupt parent
/// cycle cannot loop forever.
pub async fn ancestor_ids(pool: &DbPool, workspace: &Workspace) -> Result<Vec<DbId>, AppError> {
    let links: HashMap<DbId, Option<DbId>> =
        WorkspaceRepo::parent_links(pool, workspace.event_id)
            .await?
            .into_iter()
            .collect();

    let mut ids = vec![workspace.id];
    let mut current = workspace.parent_id;
    while let Some(id) = current {
        if ids.len() >= MAX_WORKSPACE_DEPTH {
            break;
        }
        ids.push(id);
        current = links.get(&id).copied().flatten();
    }
    Ok(ids)
}

/// Active roles `user_id` holds on `workspace` or any of its ancestors.
pub async fn held_roles(
    pool: &DbPool,
    user_id: DbId,
    workspace: &Workspace,
) -> Result<Vec<String>, AppError> {
    let chain = ancestor_ids(pool, workspace).await?;
    Ok(MemberRepo::active_roles_in(pool, user_id, &chain).await?)
}

/// Effective capabilities of `user_id` on `workspace`.
pub async fn capabilities_for(
    pool: &DbPool,
    user_id: DbId,
    workspace: &Workspace,
) -> Result<Capabilities, AppError> {
    let roles = held_roles(pool, user_id, workspace).await?;
    Ok(Capabilities::for_best_of(&roles))
}

/// The caller's strongest role level on `workspace`, verified to carry
/// member-management rights. Errors with 403 otherwise.
///
/// Member handlers need the level itself (grants and removals compare
/// levels), so this returns it instead of a capability flag.
pub async fn member_authority(
    pool: &DbPool,
    user_id: DbId,
    workspace: &Workspace,
) -> Result<RoleLevel, AppError> {
    let roles = held_roles(pool, user_id, workspace).await?;
    match best_level(&roles) {
        Some(level) if Capabilities::for_level(level).can_manage_members => Ok(level),
        _ => Err(AppError::Core(CoreError::Forbidden(
            "Insufficient role to manage members here".into(),
        ))),
    }
}

/// Reject with 403 unless `allowed`.
pub fn require(allowed: bool, action: &str) -> Result<(), AppError> {
    if allowed {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Insufficient role to {action}"
        ))))
    }
}
