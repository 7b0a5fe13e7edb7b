//! Handlers for PDF export downloads.
//!
//! The documents are assembled on disk under the exports directory and
//! then streamed back as `application/pdf` attachments, so they remain
//! available under `/static/exports` afterwards.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use vt_core::naming::safe_file_stem;
use vt_core::types::DbId;
use vt_db::repositories::PanelRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::load_comic;
use crate::state::AppState;

/// GET /api/v1/comics/{id}/export
pub async fn comic_pdf(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let comic = load_comic(&state, comic_id).await?;
    let panels = PanelRepo::list_by_comic(&state.pool, comic_id).await?;

    if panels.is_empty() {
        return Err(AppError::BadRequest("No panels to export".to_string()));
    }

    let exports_dir = state.media.exports();
    let pdf_path = vt_export::render_comic(&comic, &panels, &exports_dir)?;
    serve_pdf(&pdf_path, &comic.title).await
}

/// GET /api/v1/comics/{id}/export/characters
pub async fn character_sheet_pdf(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let comic = load_comic(&state, comic_id).await?;

    let exports_dir = state.media.exports();
    let Some(pdf_path) = vt_export::render_character_sheet(&comic, &exports_dir)? else {
        // Explicitly empty, not a failure: there is just nothing to export.
        return Err(AppError::BadRequest(
            "This comic has no characters to export".to_string(),
        ));
    };
    serve_pdf(&pdf_path, &format!("{} characters", comic.title)).await
}

/// Read the finished document and wrap it in download headers.
async fn serve_pdf(
    pdf_path: &std::path::Path,
    download_title: &str,
) -> AppResult<impl IntoResponse> {
    let bytes = tokio::fs::read(pdf_path)
        .await
        .map_err(|err| AppError::InternalError(format!("failed to read generated PDF: {err}")))?;

    let filename = format!("{}.pdf", safe_file_stem(download_title));
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|err| AppError::InternalError(format!("invalid download filename: {err}")))?,
    );

    Ok((headers, bytes))
}
