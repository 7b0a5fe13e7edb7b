//! Route definitions for the `/panels` resource.
//!
//! Panel creation lives under `/comics/{id}/panels`; everything operating
//! on an existing panel is addressed by panel id here.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::panel;
use crate::state::AppState;

/// Routes mounted at `/panels`.
///
/// ```text
/// DELETE /{id}            -> delete
/// POST   /{id}/edit       -> edit (instruction-based regeneration)
/// POST   /{id}/narration  -> narrate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/panels/{id}", delete(panel::delete))
        .route("/panels/{id}/edit", post(panel::edit))
        .route("/panels/{id}/narration", post(panel::narrate))
}
