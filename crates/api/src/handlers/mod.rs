pub mod character;
pub mod comic;
pub mod export;
pub mod panel;
pub mod voice;

use vt_core::error::CoreError;
use vt_core::types::DbId;
use vt_db::models::comic::Comic;
use vt_db::models::panel::Panel;
use vt_db::repositories::{ComicRepo, PanelRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Load a comic or fail with 404.
pub(crate) async fn load_comic(state: &AppState, id: DbId) -> AppResult<Comic> {
    ComicRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Comic", id }))
}

/// Load a panel or fail with 404.
pub(crate) async fn load_panel(state: &AppState, id: DbId) -> AppResult<Panel> {
    PanelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Panel", id }))
}

/// Remove a panel's media files from disk.
///
/// Already-absent files are fine; anything else is logged and swallowed
/// so a file-level hiccup never blocks a record delete.
pub(crate) fn remove_panel_files(panel: &Panel) {
    for path in [panel.image_path.as_deref(), panel.audio_path.as_deref()]
        .into_iter()
        .flatten()
    {
        if let Err(err) = vt_media::store::remove_if_exists(path) {
            tracing::warn!(path, error = %err, "failed to remove panel media file");
        }
    }
}
