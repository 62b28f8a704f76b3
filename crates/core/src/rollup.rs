//! Dashboard rollups over a flat per-event snapshot.
//!
//! The API layer fetches every collection for one event (workspaces, tasks,
//! members, budget lines, resources) and hands them over as an
//! [`EventSnapshot`]. Aggregation happens here, in memory: a
//! [`WorkspaceTree`] adjacency index is built once, then per-department
//! subtree stats and event-wide health are derived from it. Output ordering
//! is deterministic (ascending ids, `BTreeMap` keys) so identical snapshots
//! serialize identically.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::depth::MAX_WORKSPACE_DEPTH;
use crate::hierarchy::{WorkspaceKind, WorkspaceStatus};
use crate::roles::MemberStatus;
use crate::task::TaskStatus;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Snapshot rows
// ---------------------------------------------------------------------------

/// A workspace row reduced to what the rollup needs.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceNode {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub kind: WorkspaceKind,
    pub status: WorkspaceStatus,
    /// Catalog id for department-level workspaces.
    pub department_id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskRow {
    pub workspace_id: DbId,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberRow {
    pub workspace_id: DbId,
    pub user_id: DbId,
    pub status: MemberStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetRow {
    pub workspace_id: DbId,
    pub allocated_cents: i64,
    pub used_cents: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRow {
    pub workspace_id: DbId,
    pub quantity: i64,
    pub available: i64,
}

/// Everything the rollup consumes for one event, fetched in one pass.
#[derive(Debug, Clone, Default)]
pub struct EventSnapshot {
    pub workspaces: Vec<WorkspaceNode>,
    pub tasks: Vec<TaskRow>,
    pub members: Vec<MemberRow>,
    pub budgets: Vec<BudgetRow>,
    pub resources: Vec<ResourceRow>,
}

// ---------------------------------------------------------------------------
// Workspace tree index
// ---------------------------------------------------------------------------

/// Adjacency index over a flat workspace list: node lookup by id plus
/// children by parent id. Built once per snapshot and shared by every
/// traversal.
pub struct WorkspaceTree<'a> {
    nodes: HashMap<DbId, &'a WorkspaceNode>,
    children: HashMap<DbId, Vec<DbId>>,
}

impl<'a> WorkspaceTree<'a> {
    pub fn build(workspaces: &'a [WorkspaceNode]) -> Self {
        let mut nodes = HashMap::with_capacity(workspaces.len());
        let mut children: HashMap<DbId, Vec<DbId>> = HashMap::new();
        for ws in workspaces {
            nodes.insert(ws.id, ws);
        }
        for ws in workspaces {
            if let Some(parent) = ws.parent_id {
                children.entry(parent).or_default().push(ws.id);
            }
        }
        for ids in children.values_mut() {
            ids.sort_unstable();
        }
        WorkspaceTree { nodes, children }
    }

    pub fn node(&self, id: DbId) -> Option<&'a WorkspaceNode> {
        self.nodes.get(&id).copied()
    }

    /// Direct children in ascending id order.
    pub fn children(&self, id: DbId) -> &[DbId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The workspace plus every descendant, ascending id order.
    ///
    /// Iterative DFS with a seen-set, so corrupted parent links (cycles,
    /// re-parented duplicates) cannot loop.
    pub fn descendant_ids(&self, id: DbId) -> Vec<DbId> {
        let mut seen = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            stack.extend_from_slice(self.children(current));
        }
        let mut ids: Vec<DbId> = seen.into_iter().collect();
        ids.sort_unstable();
        ids
    }

    /// Ancestor chain from the root down to `id`, inclusive. Capped at
    /// [`MAX_WORKSPACE_DEPTH`] nodes; a missing parent ends the chain.
    pub fn path_to_root(&self, id: DbId) -> Vec<&'a WorkspaceNode> {
        let mut chain = Vec::new();
        let mut current = self.node(id);
        while let Some(node) = current {
            chain.push(node);
            if chain.len() >= MAX_WORKSPACE_DEPTH {
                break;
            }
            current = node.parent_id.and_then(|p| self.node(p));
        }
        chain.reverse();
        chain
    }
}

// ---------------------------------------------------------------------------
// Rollup outputs
// ---------------------------------------------------------------------------

/// Aggregates for one department-level workspace and its whole subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStats {
    pub workspace_id: DbId,
    pub department_id: Option<String>,
    pub name: String,
    /// Distinct active members across the subtree.
    pub members_active: i64,
    /// Direct committee children.
    pub committees: i64,
    pub tasks_total: i64,
    pub tasks_todo: i64,
    pub tasks_in_progress: i64,
    pub tasks_completed: i64,
    pub tasks_blocked: i64,
    pub budget_allocated_cents: i64,
    pub budget_used_cents: i64,
    pub resource_quantity: i64,
    pub resource_available: i64,
    /// Completed share of subtree tasks, 0.0 when there are none.
    pub progress_pct: f64,
}

/// Event-wide health metrics over every row in the snapshot, including
/// rows outside any department subtree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventHealth {
    pub workspaces_total: i64,
    pub workspaces_active: i64,
    pub members_active: i64,
    pub tasks_total: i64,
    pub tasks_todo: i64,
    pub tasks_in_progress: i64,
    pub tasks_completed: i64,
    pub tasks_blocked: i64,
    pub budget_allocated_cents: i64,
    pub budget_used_cents: i64,
    pub resource_quantity: i64,
    pub resource_available: i64,
    pub progress_pct: f64,
    /// Per-department completion percentage, keyed by catalog department id
    /// (the workspace id when the row has none). Sorted keys keep the
    /// serialized form stable.
    pub department_progress: BTreeMap<String, f64>,
}

/// Full dashboard rollup for one event snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRollup {
    pub departments: Vec<DepartmentStats>,
    pub health: EventHealth,
}

impl EventRollup {
    pub fn compute(snapshot: &EventSnapshot) -> Self {
        let tree = WorkspaceTree::build(&snapshot.workspaces);
        let departments = department_rollups(snapshot, &tree);
        let health = event_health(snapshot, &departments);
        EventRollup {
            departments,
            health,
        }
    }
}

/// Percentage helper shared by both rollups.
fn progress_pct(completed: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    }
}

/// Counters accumulated over one scope (a subtree or the whole event).
#[derive(Debug, Default)]
struct Tally {
    member_ids: HashSet<DbId>,
    tasks_total: i64,
    tasks_todo: i64,
    tasks_in_progress: i64,
    tasks_completed: i64,
    tasks_blocked: i64,
    budget_allocated_cents: i64,
    budget_used_cents: i64,
    resource_quantity: i64,
    resource_available: i64,
}

fn tally(snapshot: &EventSnapshot, in_scope: impl Fn(DbId) -> bool) -> Tally {
    let mut t = Tally::default();
    for task in &snapshot.tasks {
        if !in_scope(task.workspace_id) {
            continue;
        }
        t.tasks_total += 1;
        match task.status {
            TaskStatus::Todo => t.tasks_todo += 1,
            TaskStatus::InProgress => t.tasks_in_progress += 1,
            TaskStatus::Done => t.tasks_completed += 1,
            TaskStatus::Blocked => t.tasks_blocked += 1,
        }
    }
    for member in &snapshot.members {
        if member.status == MemberStatus::Active && in_scope(member.workspace_id) {
            t.member_ids.insert(member.user_id);
        }
    }
    for budget in &snapshot.budgets {
        if in_scope(budget.workspace_id) {
            t.budget_allocated_cents += budget.allocated_cents;
            t.budget_used_cents += budget.used_cents;
        }
    }
    for resource in &snapshot.resources {
        if in_scope(resource.workspace_id) {
            t.resource_quantity += resource.quantity;
            t.resource_available += resource.available;
        }
    }
    t
}

/// Per-department subtree aggregates, ascending workspace id.
///
/// Rows pointing at workspaces outside every department subtree (orphans,
/// root-level rows) are simply never in scope here; they still count in
/// [`event_health`].
pub fn department_rollups(snapshot: &EventSnapshot, tree: &WorkspaceTree) -> Vec<DepartmentStats> {
    let mut departments: Vec<&WorkspaceNode> = snapshot
        .workspaces
        .iter()
        .filter(|w| w.kind == WorkspaceKind::Department)
        .collect();
    departments.sort_unstable_by_key(|w| w.id);

    departments
        .into_iter()
        .map(|dept| {
            let scope: HashSet<DbId> = tree.descendant_ids(dept.id).into_iter().collect();
            let t = tally(snapshot, |id| scope.contains(&id));
            let committees = tree
                .children(dept.id)
                .iter()
                .filter(|c| tree.node(**c).is_some_and(|n| n.kind == WorkspaceKind::Committee))
                .count() as i64;
            DepartmentStats {
                workspace_id: dept.id,
                department_id: dept.department_id.clone(),
                name: dept.name.clone(),
                members_active: t.member_ids.len() as i64,
                committees,
                tasks_total: t.tasks_total,
                tasks_todo: t.tasks_todo,
                tasks_in_progress: t.tasks_in_progress,
                tasks_completed: t.tasks_completed,
                tasks_blocked: t.tasks_blocked,
                budget_allocated_cents: t.budget_allocated_cents,
                budget_used_cents: t.budget_used_cents,
                resource_quantity: t.resource_quantity,
                resource_available: t.resource_available,
                progress_pct: progress_pct(t.tasks_completed, t.tasks_total),
            }
        })
        .collect()
}

/// Event-wide health: totals over every snapshot row regardless of tree
/// position, plus the per-department progress map.
pub fn event_health(snapshot: &EventSnapshot, departments: &[DepartmentStats]) -> EventHealth {
    let t = tally(snapshot, |_| true);
    let workspaces_total = snapshot.workspaces.len() as i64;
    let workspaces_active = snapshot
        .workspaces
        .iter()
        .filter(|w| w.status == WorkspaceStatus::Active)
        .count() as i64;

    let mut department_progress = BTreeMap::new();
    for dept in departments {
        let key = dept
            .department_id
            .clone()
            .unwrap_or_else(|| dept.workspace_id.to_string());
        department_progress.insert(key, dept.progress_pct);
    }

    EventHealth {
        workspaces_total,
        workspaces_active,
        members_active: t.member_ids.len() as i64,
        tasks_total: t.tasks_total,
        tasks_todo: t.tasks_todo,
        tasks_in_progress: t.tasks_in_progress,
        tasks_completed: t.tasks_completed,
        tasks_blocked: t.tasks_blocked,
        budget_allocated_cents: t.budget_allocated_cents,
        budget_used_cents: t.budget_used_cents,
        resource_quantity: t.resource_quantity,
        resource_available: t.resource_available,
        progress_pct: progress_pct(t.tasks_completed, t.tasks_total),
        department_progress,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
