//! Pure domain logic for the Summit event-workspace platform.
//!
//! Everything in this crate is synchronous and database-free: the workspace
//! hierarchy and its catalogs, nesting-depth validation, role levels and
//! capabilities, dashboard rollups, and shell session-state resolution.
//! The `summit-db` and `summit-api` crates feed it rows and expose the
//! results over HTTP.

pub mod depth;
pub mod error;
pub mod hierarchy;
pub mod roles;
pub mod rollup;
pub mod shell;
pub mod task;
pub mod types;
