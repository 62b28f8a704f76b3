//! Route definitions for the `/milestones` resource.
//!
//! Creation and the upcoming-milestones widget live under
//! `/events/{event_id}/...`; completion is addressed by milestone id.

use axum::routing::put;
use axum::Router;

use crate::handlers::milestone;
use crate::state::AppState;

/// Routes mounted at `/milestones`.
///
/// ```text
/// PUT /{id}/complete  -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/complete", put(milestone::complete))
}
