//! Handler for the read-only narration voices listing.

use axum::extract::State;
use axum::Json;
use vt_media::Voice;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/voices
///
/// The adapter already degrades to an empty list on any failure, so this
/// endpoint never errors.
pub async fn list(State(state): State<AppState>) -> Json<DataResponse<Vec<Voice>>> {
    let voices = state.narration.list_voices().await;
    Json(DataResponse { data: voices })
}
