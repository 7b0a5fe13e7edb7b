//! Panel entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vt_core::types::{DbId, Timestamp};

/// A panel row from the `panels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Panel {
    pub id: DbId,
    pub comic_id: DbId,
    pub panel_number: i64,
    /// Derived from the scene description; at most 50 characters.
    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub narration_text: Option<String>,
    pub audio_path: Option<String>,
    pub created_at: Timestamp,
}

/// Insert payload for a new panel.
///
/// Built entirely by the orchestration layer -- in particular
/// `panel_number` and `title` are never caller-supplied.
#[derive(Debug, Clone)]
pub struct NewPanel {
    pub comic_id: DbId,
    pub panel_number: i64,
    pub title: String,
    pub description: String,
    pub image_path: Option<String>,
    pub narration_text: Option<String>,
    pub audio_path: Option<String>,
}
