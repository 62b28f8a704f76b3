//! Domain error type shared by every crate in the workspace.

use thiserror::Error;

use crate::types::DbId;

/// Errors produced by domain logic, independent of any transport.
///
/// The API layer maps each variant onto an HTTP status; see
/// `summit-api`'s `AppError`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entity lookup came up empty.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed a domain rule (bad kind string, depth overflow,
    /// missing catalog entry, invalid tab, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation collides with existing state (duplicate root,
    /// duplicate department, ...).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is authenticated but lacks the capability.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Invariant breakage that callers cannot correct.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}
