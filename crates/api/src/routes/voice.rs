//! Route definitions for the read-only `/voices` listing.

use axum::routing::get;
use axum::Router;

use crate::handlers::voice;
use crate::state::AppState;

/// Routes mounted at `/voices`.
pub fn router() -> Router<AppState> {
    Router::new().route("/voices", get(voice::list))
}
