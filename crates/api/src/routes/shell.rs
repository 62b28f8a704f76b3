//! Route definitions for the workspace shell.
//!
//! All endpoints require authentication; preferences are keyed by the
//! authenticated user.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::shell;
use crate::state::AppState;

/// Routes mounted at `/shell`.
///
/// ```text
/// GET  /state             -> resolve
/// PUT  /tab               -> switch_tab
/// PUT  /role-scope        -> switch_role_scope
/// POST /switch-workspace  -> switch_workspace
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/state", get(shell::resolve))
        .route("/tab", put(shell::switch_tab))
        .route("/role-scope", put(shell::switch_role_scope))
        .route("/switch-workspace", post(shell::switch_workspace))
}
