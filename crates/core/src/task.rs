//! Task field domains: status, priority, category, and title validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Workflow status of a task. Exactly these four values exist; anything
/// else is rejected at the boundary so rollup partitions always sum to the
/// task total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            "blocked" => Ok(TaskStatus::Blocked),
            other => Err(CoreError::validation(format!(
                "unknown task status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Scheduling priority of a task; defaults to [`TaskPriority::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(CoreError::validation(format!(
                "unknown task priority '{other}'"
            ))),
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

// ---------------------------------------------------------------------------
// Category and title
// ---------------------------------------------------------------------------

/// The single task category currently in use.
pub const TASK_CATEGORY_GENERAL: &str = "general";

/// Valid category values. A single entry today; the list form keeps the
/// validation and the CHECK constraint in one shape.
pub const VALID_TASK_CATEGORIES: &[&str] = &[TASK_CATEGORY_GENERAL];

pub fn is_valid_category(category: &str) -> bool {
    VALID_TASK_CATEGORIES.contains(&category)
}

pub const MAX_TASK_TITLE_CHARS: usize = 200;

/// Validate a task title: non-blank after trimming and within the length
/// cap. Returns the trimmed title.
pub fn validate_title(title: &str) -> Result<&str, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("task title must not be empty"));
    }
    if trimmed.chars().count() > MAX_TASK_TITLE_CHARS {
        return Err(CoreError::validation(format!(
            "task title exceeds {MAX_TASK_TITLE_CHARS} characters"
        )));
    }
    Ok(trimmed)
}
