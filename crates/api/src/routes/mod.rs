pub mod comic;
pub mod health;
pub mod panel;
pub mod voice;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /comics                                   list recent, create
/// /comics/{id}                              get (with panels), update, delete
/// /comics/{id}/characters                   add character
/// /comics/{id}/characters/{name}            update (may rename), delete
/// /comics/{id}/panels                       generate panel
/// /comics/{id}/export                       comic PDF download
/// /comics/{id}/export/characters            character sheet PDF download
///
/// /panels/{id}                              delete
/// /panels/{id}/edit                         instruction-based regeneration
/// /panels/{id}/narration                    add narration
///
/// /voices                                   available narration voices
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(comic::router())
        .merge(panel::router())
        .merge(voice::router())
}
