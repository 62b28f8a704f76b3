//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the create/update payloads the API accepts

pub mod activity;
pub mod budget;
pub mod event;
pub mod member;
pub mod milestone;
pub mod resource;
pub mod shell;
pub mod task;
pub mod workspace;
