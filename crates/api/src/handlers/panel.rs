//! Handlers for panel generation, editing, narration, and deletion.
//!
//! This is the panel workflow: validation, numbering, image generation,
//! optional audio synthesis, title derivation, persistence. Image
//! failure aborts the whole operation -- a panel is never saved without
//! an image path. Narration failure is non-fatal and surfaces as a
//! warning on an otherwise successful response.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vt_core::panels::{edited_description, next_panel_number};
use vt_core::title::derive_panel_title;
use vt_core::types::DbId;
use vt_core::validation;
use vt_db::models::panel::{NewPanel, Panel};
use vt_db::repositories::{ComicRepo, PanelRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{load_comic, load_panel, remove_panel_files};
use crate::response::ActionResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeneratePanelRequest {
    pub scene_description: String,
    #[serde(default)]
    pub narration_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditPanelRequest {
    pub edit_instruction: String,
}

#[derive(Debug, Deserialize)]
pub struct NarrationRequest {
    pub narration_text: String,
    /// Explicit narration voice; the adapter's default when omitted.
    #[serde(default)]
    pub voice_id: Option<String>,
}

/// POST /api/v1/comics/{id}/panels
pub async fn generate(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
    Json(input): Json<GeneratePanelRequest>,
) -> AppResult<(StatusCode, Json<ActionResponse<Panel>>)> {
    let comic = load_comic(&state, comic_id).await?;
    let scene = validation::non_blank(&input.scene_description, "Scene description")?;

    let max = PanelRepo::max_panel_number(&state.pool, comic_id).await?;
    let panel_number = next_panel_number(max);

    // Fatal on failure: nothing is persisted without artwork.
    let image_path = state
        .image_gen
        .generate(scene, &comic.characters, &comic.style, panel_number)
        .await?;

    // Non-fatal on failure: the panel is saved without audio.
    let narration = input
        .narration_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let mut warning = None;
    let mut audio_path = None;
    if let Some(text) = narration {
        match state.narration.synthesize(text, panel_number).await {
            Ok(path) => audio_path = Some(path_string(path)),
            Err(err) => {
                tracing::warn!(error = %err, panel_number, "narration synthesis failed");
                warning = Some(
                    "Panel generated successfully, but voice narration failed. \
                     You can add it later."
                        .to_string(),
                );
            }
        }
    }

    let panel = PanelRepo::create(
        &state.pool,
        &NewPanel {
            comic_id,
            panel_number,
            title: derive_panel_title(scene),
            description: scene.to_string(),
            image_path: Some(path_string(image_path)),
            narration_text: narration.map(str::to_string),
            audio_path,
        },
    )
    .await?;
    ComicRepo::touch(&state.pool, comic_id).await?;

    let message = format!("Panel {panel_number} generated successfully!");
    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::new(panel, message).with_warning(warning)),
    ))
}

/// POST /api/v1/panels/{id}/edit
///
/// Prompt-based regeneration: on success the image path is replaced and
/// the edit marker is appended to the description; on failure the panel
/// is left untouched.
pub async fn edit(
    State(state): State<AppState>,
    Path(panel_id): Path<DbId>,
    Json(input): Json<EditPanelRequest>,
) -> AppResult<Json<ActionResponse<Panel>>> {
    let panel = load_panel(&state, panel_id).await?;
    let instruction = validation::non_blank(&input.edit_instruction, "Edit instruction")?;
    let comic = load_comic(&state, panel.comic_id).await?;

    let new_image = state
        .image_gen
        .edit(instruction, &panel.description, &comic.characters, &comic.style)
        .await?;

    let description = edited_description(&panel.description, instruction);
    let panel = PanelRepo::update_image(&state.pool, panel_id, &path_string(new_image), &description)
        .await?
        .ok_or(AppError::Core(vt_core::error::CoreError::NotFound {
            entity: "Panel",
            id: panel_id,
        }))?;
    ComicRepo::touch(&state.pool, panel.comic_id).await?;

    Ok(Json(ActionResponse::new(
        panel,
        "Panel edited successfully!",
    )))
}

/// POST /api/v1/panels/{id}/narration
///
/// The narration text is always recorded; the audio path only when
/// synthesis succeeded. A failed synthesis is a warning, not an error.
pub async fn narrate(
    State(state): State<AppState>,
    Path(panel_id): Path<DbId>,
    Json(input): Json<NarrationRequest>,
) -> AppResult<Json<ActionResponse<Panel>>> {
    let panel = load_panel(&state, panel_id).await?;
    let text = validation::non_blank(&input.narration_text, "Narration text")?;

    let synthesis = match input.voice_id.as_deref() {
        Some(voice_id) => state.narration.synthesize_with_voice(text, voice_id, panel.id).await,
        None => state.narration.synthesize(text, panel.id).await,
    };

    let (audio_path, warning) = match synthesis {
        Ok(path) => (Some(path_string(path)), None),
        Err(err) => {
            tracing::warn!(error = %err, panel_id, "narration synthesis failed");
            (
                None,
                Some("Narration text saved, but audio synthesis failed.".to_string()),
            )
        }
    };

    let panel = PanelRepo::update_narration(&state.pool, panel_id, text, audio_path.as_deref())
        .await?
        .ok_or(AppError::Core(vt_core::error::CoreError::NotFound {
            entity: "Panel",
            id: panel_id,
        }))?;
    ComicRepo::touch(&state.pool, panel.comic_id).await?;

    Ok(Json(
        ActionResponse::new(panel, "Narration added successfully!").with_warning(warning),
    ))
}

/// DELETE /api/v1/panels/{id}
///
/// Removes the panel's own media files, then the row. Other panels and
/// their numbering are untouched.
pub async fn delete(
    State(state): State<AppState>,
    Path(panel_id): Path<DbId>,
) -> AppResult<Json<ActionResponse<DbId>>> {
    let panel = load_panel(&state, panel_id).await?;

    remove_panel_files(&panel);
    PanelRepo::delete(&state.pool, panel_id).await?;
    ComicRepo::touch(&state.pool, panel.comic_id).await?;

    let message = format!("Panel {} deleted successfully!", panel.panel_number);
    Ok(Json(ActionResponse::new(panel_id, message)))
}

fn path_string(path: std::path::PathBuf) -> String {
    path.to_string_lossy().into_owned()
}
