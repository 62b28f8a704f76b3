//! Role levels, management authority, and per-workspace capabilities.
//!
//! Roles are free-form strings on membership rows; authority comes from the
//! level a role maps to, derived from the department/committee catalogs.
//! Anything unrecognized lands on the coordinator level so that a typo'd or
//! custom role never gains authority by accident.

use serde::Serialize;

use crate::hierarchy::{COMMITTEES, DEPARTMENTS};

/// Event-wide organizer role held on the root workspace.
pub const ROLE_OWNER: &str = "owner";

// ---------------------------------------------------------------------------
// Role levels
// ---------------------------------------------------------------------------

/// Authority level of a role; a smaller ordinal means more authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleLevel {
    Owner = 1,
    Manager = 2,
    Lead = 3,
    Coordinator = 4,
}

impl RoleLevel {
    /// Numeric ordinal (1 = owner .. 4 = coordinator).
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Map a role string to its authority level via the catalogs.
pub fn role_level(role: &str) -> RoleLevel {
    if role == ROLE_OWNER {
        RoleLevel::Owner
    } else if DEPARTMENTS.iter().any(|d| d.manager_role == role) {
        RoleLevel::Manager
    } else if COMMITTEES.iter().any(|c| c.lead_role == role) {
        RoleLevel::Lead
    } else {
        RoleLevel::Coordinator
    }
}

/// Strongest level among several held roles, `None` for a non-member.
pub fn best_level(roles: &[String]) -> Option<RoleLevel> {
    roles.iter().map(|r| role_level(r)).min()
}

/// Whether `manager_role` outranks `target_role` strictly. Equal levels
/// never manage each other, so `can_manage(r, r)` is always false.
pub fn can_manage(manager_role: &str, target_role: &str) -> bool {
    role_level(manager_role) < role_level(target_role)
}

/// Catalog roles strictly below `level`, in catalog order (managers, then
/// leads, then coordinators). Used to suggest grantable roles.
pub fn assignable_for_level(level: RoleLevel) -> Vec<&'static str> {
    let mut roles: Vec<&'static str> = Vec::new();
    if level < RoleLevel::Manager {
        roles.extend(DEPARTMENTS.iter().map(|d| d.manager_role));
    }
    if level < RoleLevel::Lead {
        roles.extend(COMMITTEES.iter().map(|c| c.lead_role));
    }
    if level < RoleLevel::Coordinator {
        roles.extend(COMMITTEES.iter().map(|c| c.coordinator_role));
    }
    roles
}

/// Catalog roles a holder of `role` may grant.
pub fn assignable_roles(role: &str) -> Vec<&'static str> {
    assignable_for_level(role_level(role))
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Mutation capabilities a member holds on a workspace.
///
/// Derived from the best active role along the workspace's ancestor chain:
/// an owner or department manager acts on everything below them, a lead on
/// their committee subtree, a coordinator on nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub can_manage_tasks: bool,
    pub can_manage_members: bool,
    pub can_edit_settings: bool,
    pub can_create_workspaces: bool,
}

impl Capabilities {
    /// Capabilities granted at a given level.
    pub fn for_level(level: RoleLevel) -> Self {
        Capabilities {
            can_manage_tasks: level <= RoleLevel::Lead,
            can_manage_members: level <= RoleLevel::Lead,
            can_edit_settings: level <= RoleLevel::Manager,
            can_create_workspaces: level <= RoleLevel::Manager,
        }
    }

    /// Capabilities granted by a single role string.
    pub fn for_role(role: &str) -> Self {
        Self::for_level(role_level(role))
    }

    /// No capabilities at all (non-members, inactive members).
    pub fn none() -> Self {
        Capabilities {
            can_manage_tasks: false,
            can_manage_members: false,
            can_edit_settings: false,
            can_create_workspaces: false,
        }
    }

    /// Strongest capability set among several held roles.
    pub fn for_best_of(roles: &[String]) -> Self {
        best_level(roles).map(Self::for_level).unwrap_or_else(Self::none)
    }
}

// ---------------------------------------------------------------------------
// Membership status
// ---------------------------------------------------------------------------

/// Status of a membership row. Only active members count toward rollups
/// and capability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Result<Self, crate::error::CoreError> {
        match s {
            "active" => Ok(MemberStatus::Active),
            "inactive" => Ok(MemberStatus::Inactive),
            other => Err(crate::error::CoreError::validation(format!(
                "unknown member status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
