//! Workspace nesting-depth validation.

use std::collections::HashMap;

use crate::types::DbId;

/// Maximum number of levels in a workspace tree (ROOT = 1 .. TEAM = 4).
pub const MAX_WORKSPACE_DEPTH: usize = 4;

/// Depth a new child would occupy if created under `parent_id`.
///
/// `parent_links` maps each workspace id to its parent id (`None` at the
/// root). The walk counts hops from the parent upward and is capped at
/// [`MAX_WORKSPACE_DEPTH`] hops, so a cyclic or corrupt chain terminates
/// with a depth that fails validation instead of hanging. A parent id
/// missing from the map ends the chain as if it were a root.
pub fn creation_depth(
    parent_id: Option<DbId>,
    parent_links: &HashMap<DbId, Option<DbId>>,
) -> usize {
    let mut hops = 0;
    let mut current = parent_id;
    while let Some(id) = current {
        hops += 1;
        if hops >= MAX_WORKSPACE_DEPTH {
            break;
        }
        current = parent_links.get(&id).copied().flatten();
    }
    hops + 1
}

/// Whether a child may be created under `parent_id` without exceeding the
/// depth limit.
pub fn can_create_child(parent_id: DbId, parent_links: &HashMap<DbId, Option<DbId>>) -> bool {
    creation_depth(Some(parent_id), parent_links) <= MAX_WORKSPACE_DEPTH
}
