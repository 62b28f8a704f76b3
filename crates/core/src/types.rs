//! Shared type aliases used across the workspace.

/// Primary-key type for all entities (PostgreSQL `BIGSERIAL`).
pub type DbId = i64;

/// Timestamp type for all temporal fields (`TIMESTAMPTZ`, always UTC).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
