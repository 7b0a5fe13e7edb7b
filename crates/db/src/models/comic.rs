//! Comic entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use vt_core::characters::CharacterMap;
use vt_core::types::{DbId, Timestamp};

/// A comic row from the `comics` table.
///
/// The character roster is stored as one JSON object and decoded into
/// [`CharacterMap`] here, at the storage boundary; nothing downstream
/// handles raw character text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comic {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub style: String,
    pub characters: Json<CharacterMap>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new comic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComic {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `"realistic"` if omitted.
    pub style: Option<String>,
}

/// DTO for updating an existing comic. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComic {
    pub title: Option<String>,
    pub description: Option<String>,
    pub style: Option<String>,
}
