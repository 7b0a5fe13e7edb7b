//! Handlers for the character roster nested under a comic.
//!
//! Characters are not rows of their own: every mutation loads the
//! comic's roster, applies the change to the typed map, and writes the
//! whole roster back.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use vt_core::characters::CharacterEntry;
use vt_core::error::CoreError;
use vt_core::types::DbId;
use vt_core::validation;
use vt_db::models::comic::Comic;
use vt_db::repositories::ComicRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::load_comic;
use crate::response::ActionResponse;
use crate::state::AppState;

/// Form payload shared by character creation and update.
#[derive(Debug, Deserialize)]
pub struct CharacterForm {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub appearance: Option<String>,
}

impl CharacterForm {
    fn entry(&self) -> CharacterEntry {
        CharacterEntry {
            description: self.description.clone().unwrap_or_default(),
            appearance: self
                .appearance
                .clone()
                .filter(|a| !a.trim().is_empty()),
        }
    }
}

/// POST /api/v1/comics/{id}/characters
///
/// Adds (or silently replaces) the character stored under `name`.
pub async fn add(
    State(state): State<AppState>,
    Path(comic_id): Path<DbId>,
    Json(input): Json<CharacterForm>,
) -> AppResult<(StatusCode, Json<ActionResponse<Comic>>)> {
    let comic = load_comic(&state, comic_id).await?;
    let name = validation::non_blank(&input.name, "Character name")?.to_string();

    let mut roster = comic.characters.0;
    roster.insert(name.clone(), input.entry());
    let comic = save_roster(&state, comic_id, roster).await?;

    let message = format!("Character \"{name}\" added successfully!");
    Ok((StatusCode::CREATED, Json(ActionResponse::new(comic, message))))
}

/// PUT /api/v1/comics/{id}/characters/{name}
///
/// Updates the character stored under `name`, possibly renaming it; a
/// rename removes the old key.
pub async fn update(
    State(state): State<AppState>,
    Path((comic_id, name)): Path<(DbId, String)>,
    Json(input): Json<CharacterForm>,
) -> AppResult<Json<ActionResponse<Comic>>> {
    let comic = load_comic(&state, comic_id).await?;
    let new_name = validation::non_blank(&input.name, "Character name")?.to_string();

    let mut roster = comic.characters.0;
    roster.rename(&name, new_name.clone(), input.entry())?;
    let comic = save_roster(&state, comic_id, roster).await?;

    let message = format!("Character \"{new_name}\" updated successfully!");
    Ok(Json(ActionResponse::new(comic, message)))
}

/// DELETE /api/v1/comics/{id}/characters/{name}
pub async fn remove(
    State(state): State<AppState>,
    Path((comic_id, name)): Path<(DbId, String)>,
) -> AppResult<Json<ActionResponse<Comic>>> {
    let comic = load_comic(&state, comic_id).await?;

    let mut roster = comic.characters.0;
    roster.remove(&name)?;
    let comic = save_roster(&state, comic_id, roster).await?;

    let message = format!("Character \"{name}\" deleted.");
    Ok(Json(ActionResponse::new(comic, message)))
}

async fn save_roster(
    state: &AppState,
    comic_id: DbId,
    roster: vt_core::characters::CharacterMap,
) -> AppResult<Comic> {
    ComicRepo::update_characters(&state.pool, comic_id, &roster)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comic",
            id: comic_id,
        }))
}
