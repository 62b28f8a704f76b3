//! Workspace hierarchy: kinds, statuses, the static department/committee
//! catalogs, and child-creation option resolution.
//!
//! A workspace tree has at most four levels:
//!
//! ```text
//! ROOT  ->  DEPARTMENT  ->  COMMITTEE  ->  TEAM
//! ```
//!
//! Departments and committees are created from fixed catalogs (names and
//! roles come with the catalog entry); teams are free-form.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Workspace kind
// ---------------------------------------------------------------------------

/// Position of a workspace in the four-level tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceKind {
    Root,
    Department,
    Committee,
    Team,
}

impl WorkspaceKind {
    /// Database/wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            WorkspaceKind::Root => "root",
            WorkspaceKind::Department => "department",
            WorkspaceKind::Committee => "committee",
            WorkspaceKind::Team => "team",
        }
    }

    /// Parse a stored kind string. Unknown values are rejected rather than
    /// defaulted so that a corrupt row surfaces at the boundary.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "root" => Ok(WorkspaceKind::Root),
            "department" => Ok(WorkspaceKind::Department),
            "committee" => Ok(WorkspaceKind::Committee),
            "team" => Ok(WorkspaceKind::Team),
            other => Err(CoreError::validation(format!(
                "unknown workspace kind '{other}'"
            ))),
        }
    }

    /// The kind one level down, or `None` for the terminal TEAM level.
    pub fn child_kind(self) -> Option<WorkspaceKind> {
        match self {
            WorkspaceKind::Root => Some(WorkspaceKind::Department),
            WorkspaceKind::Department => Some(WorkspaceKind::Committee),
            WorkspaceKind::Committee => Some(WorkspaceKind::Team),
            WorkspaceKind::Team => None,
        }
    }

    /// Whether workspaces of this kind may have children at all.
    pub fn can_have_children(self) -> bool {
        self.child_kind().is_some()
    }

    /// Human-readable label for display surfaces.
    pub fn label(self) -> &'static str {
        match self {
            WorkspaceKind::Root => "Event",
            WorkspaceKind::Department => "Department",
            WorkspaceKind::Committee => "Committee",
            WorkspaceKind::Team => "Team",
        }
    }
}

// ---------------------------------------------------------------------------
// Workspace status
// ---------------------------------------------------------------------------

/// Lifecycle status of a workspace. Archived workspaces keep their data and
/// stay in rollups; only `workspaces_active` counts exclude them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceStatus {
    Active,
    Archived,
}

impl WorkspaceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkspaceStatus::Active => "active",
            WorkspaceStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "active" => Ok(WorkspaceStatus::Active),
            "archived" => Ok(WorkspaceStatus::Archived),
            other => Err(CoreError::validation(format!(
                "unknown workspace status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Static catalogs
// ---------------------------------------------------------------------------

/// Catalog entry for a department-level workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Role granted to whoever runs the department.
    pub manager_role: &'static str,
}

/// Catalog entry for a committee-level workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitteeSpec {
    pub id: &'static str,
    pub name: &'static str,
    /// Department catalog id this committee belongs to.
    pub department_id: &'static str,
    pub lead_role: &'static str,
    pub coordinator_role: &'static str,
}

/// The four department templates every event starts from.
pub const DEPARTMENTS: &[DepartmentSpec] = &[
    DepartmentSpec {
        id: "operations",
        name: "Operations",
        description: "Venue, registration, and on-site volunteers",
        manager_role: "operations_manager",
    },
    DepartmentSpec {
        id: "growth",
        name: "Growth",
        description: "Marketing, sponsorship, and community outreach",
        manager_role: "growth_manager",
    },
    DepartmentSpec {
        id: "content",
        name: "Content",
        description: "Program, speakers, and judging",
        manager_role: "content_manager",
    },
    DepartmentSpec {
        id: "logistics",
        name: "Logistics",
        description: "Catering, travel, and shipments",
        manager_role: "logistics_manager",
    },
];

/// Committee templates, three per department.
pub const COMMITTEES: &[CommitteeSpec] = &[
    CommitteeSpec {
        id: "venue",
        name: "Venue",
        department_id: "operations",
        lead_role: "venue_lead",
        coordinator_role: "venue_coordinator",
    },
    CommitteeSpec {
        id: "registration",
        name: "Registration",
        department_id: "operations",
        lead_role: "registration_lead",
        coordinator_role: "registration_coordinator",
    },
    CommitteeSpec {
        id: "volunteers",
        name: "Volunteers",
        department_id: "operations",
        lead_role: "volunteers_lead",
        coordinator_role: "volunteers_coordinator",
    },
    CommitteeSpec {
        id: "marketing",
        name: "Marketing",
        department_id: "growth",
        lead_role: "marketing_lead",
        coordinator_role: "marketing_coordinator",
    },
    CommitteeSpec {
        id: "sponsorship",
        name: "Sponsorship",
        department_id: "growth",
        lead_role: "sponsorship_lead",
        coordinator_role: "sponsorship_coordinator",
    },
    CommitteeSpec {
        id: "community",
        name: "Community",
        department_id: "growth",
        lead_role: "community_lead",
        coordinator_role: "community_coordinator",
    },
    CommitteeSpec {
        id: "program",
        name: "Program",
        department_id: "content",
        lead_role: "program_lead",
        coordinator_role: "program_coordinator",
    },
    CommitteeSpec {
        id: "speakers",
        name: "Speakers",
        department_id: "content",
        lead_role: "speakers_lead",
        coordinator_role: "speakers_coordinator",
    },
    CommitteeSpec {
        id: "judging",
        name: "Judging",
        department_id: "content",
        lead_role: "judging_lead",
        coordinator_role: "judging_coordinator",
    },
    CommitteeSpec {
        id: "catering",
        name: "Catering",
        department_id: "logistics",
        lead_role: "catering_lead",
        coordinator_role: "catering_coordinator",
    },
    CommitteeSpec {
        id: "travel",
        name: "Travel",
        department_id: "logistics",
        lead_role: "travel_lead",
        coordinator_role: "travel_coordinator",
    },
    CommitteeSpec {
        id: "shipments",
        name: "Shipments",
        department_id: "logistics",
        lead_role: "shipments_lead",
        coordinator_role: "shipments_coordinator",
    },
];

/// Look up a department template by catalog id.
pub fn department(id: &str) -> Option<&'static DepartmentSpec> {
    DEPARTMENTS.iter().find(|d| d.id == id)
}

/// Look up a committee template by catalog id.
pub fn committee(id: &str) -> Option<&'static CommitteeSpec> {
    COMMITTEES.iter().find(|c| c.id == id)
}

/// Committee templates belonging to one department, in catalog order.
pub fn committees_of(department_id: &str) -> Vec<&'static CommitteeSpec> {
    COMMITTEES
        .iter()
        .filter(|c| c.department_id == department_id)
        .collect()
}

// ---------------------------------------------------------------------------
// Child creation options
// ---------------------------------------------------------------------------

/// A selectable catalog entry offered when creating a child workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogChoice {
    pub id: &'static str,
    pub name: &'static str,
}

/// What may be created one level below a given workspace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildOptions {
    /// Kind of the child that would be created.
    pub kind: WorkspaceKind,
    /// Fixed catalog choices; `None` when the child is named freely.
    pub choices: Option<Vec<CatalogChoice>>,
    /// Whether the caller supplies the child's name.
    pub allow_custom_name: bool,
}

/// Resolve the creation options below `parent` workspaces.
///
/// * ROOT offers the department catalog (no custom names).
/// * DEPARTMENT offers its own committees; `parent_department` must carry
///   the parent's catalog id, otherwise the request is malformed.
/// * COMMITTEE offers free-form teams.
/// * TEAM is terminal and yields `Ok(None)`.
pub fn child_options(
    parent: WorkspaceKind,
    parent_department: Option<&str>,
) -> Result<Option<ChildOptions>, CoreError> {
    let options = match parent {
        WorkspaceKind::Team => return Ok(None),
        WorkspaceKind::Root => ChildOptions {
            kind: WorkspaceKind::Department,
            choices: Some(
                DEPARTMENTS
                    .iter()
                    .map(|d| CatalogChoice {
                        id: d.id,
                        name: d.name,
                    })
                    .collect(),
            ),
            allow_custom_name: false,
        },
        WorkspaceKind::Department => {
            let dept_id = parent_department.ok_or_else(|| {
                CoreError::validation("department workspace is missing its catalog id")
            })?;
            let dept = department(dept_id).ok_or_else(|| {
                CoreError::validation(format!("unknown department '{dept_id}'"))
            })?;
            ChildOptions {
                kind: WorkspaceKind::Committee,
                choices: Some(
                    committees_of(dept.id)
                        .into_iter()
                        .map(|c| CatalogChoice {
                            id: c.id,
                            name: c.name,
                        })
                        .collect(),
                ),
                allow_custom_name: false,
            }
        }
        WorkspaceKind::Committee => ChildOptions {
            kind: WorkspaceKind::Team,
            choices: None,
            allow_custom_name: true,
        },
    };
    Ok(Some(options))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
