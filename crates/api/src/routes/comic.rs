//! Route definitions for the `/comics` resource and its sub-resources.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{character, comic, export, panel};
use crate::state::AppState;

/// Routes mounted at `/comics`.
///
/// ```text
/// GET    /                           -> list_recent
/// POST   /                           -> create
/// GET    /{id}                       -> get_with_panels
/// PUT    /{id}                       -> update
/// DELETE /{id}                       -> delete
///
/// POST   /{id}/characters            -> character::add
/// PUT    /{id}/characters/{name}     -> character::update
/// DELETE /{id}/characters/{name}     -> character::remove
///
/// POST   /{id}/panels                -> panel::generate
///
/// GET    /{id}/export                -> export::comic_pdf
/// GET    /{id}/export/characters     -> export::character_sheet_pdf
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/comics", get(comic::list_recent).post(comic::create))
        .route(
            "/comics/{id}",
            get(comic::get_with_panels)
                .put(comic::update)
                .delete(comic::delete),
        )
        .route("/comics/{id}/characters", post(character::add))
        .route(
            "/comics/{id}/characters/{name}",
            put(character::update).delete(character::remove),
        )
        .route("/comics/{id}/panels", post(panel::generate))
        .route("/comics/{id}/export", get(export::comic_pdf))
        .route(
            "/comics/{id}/export/characters",
            get(export::character_sheet_pdf),
        )
}
