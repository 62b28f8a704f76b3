//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod budget_line_repo;
pub mod event_repo;
pub mod member_repo;
pub mod milestone_repo;
pub mod resource_repo;
pub mod shell_preference_repo;
pub mod task_repo;
pub mod workspace_repo;

pub use activity_repo::ActivityRepo;
pub use budget_line_repo::BudgetLineRepo;
pub use event_repo::EventRepo;
pub use member_repo::MemberRepo;
pub use milestone_repo::MilestoneRepo;
pub use resource_repo::ResourceRepo;
pub use shell_preference_repo::ShellPreferenceRepo;
pub use task_repo::TaskRepo;
pub use workspace_repo::WorkspaceRepo;
