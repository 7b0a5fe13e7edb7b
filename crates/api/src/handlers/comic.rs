//! Handlers for the `/comics` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use vt_core::error::CoreError;
use vt_core::types::DbId;
use vt_core::validation;
use vt_db::models::comic::{Comic, CreateComic, UpdateComic};
use vt_db::models::panel::Panel;
use vt_db::repositories::{ComicRepo, PanelRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{load_comic, remove_panel_files};
use crate::response::{ActionResponse, DataResponse};
use crate::state::AppState;

/// A comic together with its panels in reading order.
#[derive(Debug, Serialize)]
pub struct ComicWithPanels {
    #[serde(flatten)]
    pub comic: Comic,
    pub panels: Vec<Panel>,
}

/// GET /api/v1/comics
///
/// The landing view: the five most recently updated comics.
pub async fn list_recent(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Comic>>>> {
    let comics = ComicRepo::list_recent(&state.pool).await?;
    Ok(Json(DataResponse { data: comics }))
}

/// POST /api/v1/comics
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateComic>,
) -> AppResult<(StatusCode, Json<ActionResponse<Comic>>)> {
    input.title = validation::non_blank(&input.title, "Comic title")?.to_string();
    let comic = ComicRepo::create(&state.pool, &input).await?;

    let message = format!("Comic \"{}\" created successfully!", comic.title);
    Ok((StatusCode::CREATED, Json(ActionResponse::new(comic, message))))
}

/// GET /api/v1/comics/{id}
pub async fn get_with_panels(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ComicWithPanels>>> {
    let comic = load_comic(&state, id).await?;
    let panels = PanelRepo::list_by_comic(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ComicWithPanels { comic, panels },
    }))
}

/// PUT /api/v1/comics/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateComic>,
) -> AppResult<Json<ActionResponse<Comic>>> {
    if let Some(title) = input.title.take() {
        input.title = Some(validation::non_blank(&title, "Comic title")?.to_string());
    }

    let comic = ComicRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Comic", id }))?;

    let message = format!("Comic \"{}\" updated successfully!", comic.title);
    Ok(Json(ActionResponse::new(comic, message)))
}

/// DELETE /api/v1/comics/{id}
///
/// Removes every panel's media files first, then the comic row; panels
/// cascade at the database level. Stale file references never survive.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ActionResponse<DbId>>> {
    let comic = load_comic(&state, id).await?;
    let panels = PanelRepo::list_by_comic(&state.pool, id).await?;

    for panel in &panels {
        remove_panel_files(panel);
    }
    ComicRepo::delete(&state.pool, id).await?;

    let message = format!("Comic \"{}\" deleted successfully!", comic.title);
    Ok(Json(ActionResponse::new(id, message)))
}
