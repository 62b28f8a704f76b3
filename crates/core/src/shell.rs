//! Shell session state: which workspace, tab, and role scope the client is
//! looking at, plus the canonical query parameters and navigation targets
//! mirrored back to it.
//!
//! Resolution is pure and lenient: invalid inputs degrade to defaults
//! rather than erroring, because a stale or hand-edited URL should never
//! break the shell.

use serde::Serialize;

use crate::hierarchy::WorkspaceKind;
use crate::rollup::WorkspaceTree;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Tabs and role scopes
// ---------------------------------------------------------------------------

pub const TAB_OVERVIEW: &str = "overview";
pub const TAB_TASKS: &str = "tasks";
pub const TAB_MEMBERS: &str = "members";
pub const TAB_BUDGET: &str = "budget";
pub const TAB_RESOURCES: &str = "resources";
pub const TAB_SETTINGS: &str = "settings";

pub const DEFAULT_TAB: &str = TAB_OVERVIEW;

pub const VALID_TABS: &[&str] = &[
    TAB_OVERVIEW,
    TAB_TASKS,
    TAB_MEMBERS,
    TAB_BUDGET,
    TAB_RESOURCES,
    TAB_SETTINGS,
];

pub fn is_valid_tab(tab: &str) -> bool {
    VALID_TABS.contains(&tab)
}

/// The aggregate role scope showing every role's view at once.
pub const ROLE_SCOPE_ALL: &str = "all";

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Raw location inputs, in descending precedence for the workspace id:
/// an explicit selection, then the query string, then the route path.
#[derive(Debug, Clone, Default)]
pub struct ShellRequest {
    pub workspace_id: Option<DbId>,
    pub query_workspace_id: Option<DbId>,
    pub route_workspace_id: Option<DbId>,
    pub tab: Option<String>,
    pub task_id: Option<DbId>,
    pub role_scope: Option<String>,
}

/// Fully resolved shell state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellState {
    pub workspace_id: Option<DbId>,
    pub tab: String,
    pub task_id: Option<DbId>,
    pub role_scope: String,
}

/// Resolve raw inputs into a concrete state.
///
/// A present task id forces the tasks tab regardless of the supplied tab;
/// otherwise an invalid or absent tab falls back to [`DEFAULT_TAB`]. A
/// blank role scope falls back to [`ROLE_SCOPE_ALL`].
pub fn resolve_shell(req: &ShellRequest) -> ShellState {
    let workspace_id = req
        .workspace_id
        .or(req.query_workspace_id)
        .or(req.route_workspace_id);

    let tab = if req.task_id.is_some() {
        TAB_TASKS.to_string()
    } else {
        match req.tab.as_deref() {
            Some(t) if is_valid_tab(t) => t.to_string(),
            _ => DEFAULT_TAB.to_string(),
        }
    };

    let role_scope = match req.role_scope.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => ROLE_SCOPE_ALL.to_string(),
    };

    ShellState {
        workspace_id,
        tab,
        task_id: req.task_id,
        role_scope,
    }
}

/// Overlay a saved last-active tab onto a resolved state.
///
/// The saved tab only wins when the request did not already pick a
/// non-default tab (explicitly or via a task id), the saved value is still
/// a valid tab, and it differs from the default. Returns whether the
/// override was applied.
pub fn apply_saved_tab(state: &mut ShellState, saved_tab: Option<&str>) -> bool {
    let Some(saved) = saved_tab else {
        return false;
    };
    if state.tab != DEFAULT_TAB || !is_valid_tab(saved) || saved == DEFAULT_TAB {
        return false;
    }
    state.tab = saved.to_string();
    true
}

// ---------------------------------------------------------------------------
// Canonical query parameters
// ---------------------------------------------------------------------------

/// Query parameters the client URL should carry for a state. `None` means
/// the parameter is omitted: default tab, `all` scope, and any task id
/// outside the tasks tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalParams {
    pub tab: Option<String>,
    pub task_id: Option<DbId>,
    pub role_scope: Option<String>,
}

pub fn canonical_params(state: &ShellState) -> CanonicalParams {
    CanonicalParams {
        tab: (state.tab != DEFAULT_TAB).then(|| state.tab.clone()),
        task_id: if state.tab == TAB_TASKS {
            state.task_id
        } else {
            None
        },
        role_scope: (state.role_scope != ROLE_SCOPE_ALL).then(|| state.role_scope.clone()),
    }
}

// ---------------------------------------------------------------------------
// Navigation targets
// ---------------------------------------------------------------------------

/// Lowercase the name into a URL slug: ASCII alphanumerics kept, runs of
/// anything else collapsed to single hyphens, no leading/trailing hyphen.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// One segment of a hierarchical workspace URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub kind: WorkspaceKind,
    pub slug: String,
}

/// Where the shell should navigate after a workspace switch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum NavigationTarget {
    /// Generic dashboard fallback when a lookup fails.
    Dashboard,
    Workspace {
        org_slug: String,
        event_slug: String,
        /// Ancestor chain top-down, root elided.
        path: Vec<PathSegment>,
    },
}

/// Build the slug path for `workspace_id` from its ancestor chain. The
/// root workspace is elided (the event slug already covers it); a name
/// that slugifies to nothing falls back to the workspace id.
pub fn workspace_path(tree: &WorkspaceTree, workspace_id: DbId) -> Vec<PathSegment> {
    tree.path_to_root(workspace_id)
        .into_iter()
        .filter(|node| node.kind != WorkspaceKind::Root)
        .map(|node| {
            let slug = slugify(&node.name);
            PathSegment {
                kind: node.kind,
                slug: if slug.is_empty() {
                    node.id.to_string()
                } else {
                    slug
                },
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
