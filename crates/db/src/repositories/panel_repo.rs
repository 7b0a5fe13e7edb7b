//! Repository for the `panels` table.

use vt_core::types::DbId;

use crate::models::panel::{NewPanel, Panel};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, comic_id, panel_number, title, description, image_path, \
                       narration_text, audio_path, created_at";

/// Provides CRUD operations for panels.
pub struct PanelRepo;

impl PanelRepo {
    /// Insert a new panel, returning the created row.
    ///
    /// A duplicate `panel_number` within the comic violates
    /// `uq_panels_comic_number` and surfaces as a constraint error.
    pub async fn create(pool: &DbPool, input: &NewPanel) -> Result<Panel, sqlx::Error> {
        let now = chrono::Utc::now();
        let query = format!(
            "INSERT INTO panels
                (comic_id, panel_number, title, description, image_path,
                 narration_text, audio_path, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(input.comic_id)
            .bind(input.panel_number)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.image_path)
            .bind(&input.narration_text)
            .bind(&input.audio_path)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a panel by its internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Panel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM panels WHERE id = ?1");
        sqlx::query_as::<_, Panel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All panels of a comic in reading order (`panel_number` ascending).
    pub async fn list_by_comic(pool: &DbPool, comic_id: DbId) -> Result<Vec<Panel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM panels
             WHERE comic_id = ?1
             ORDER BY panel_number ASC"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(comic_id)
            .fetch_all(pool)
            .await
    }

    /// Highest panel number currently assigned in a comic, `None` when the
    /// comic has no panels. Input to the max-plus-one numbering rule.
    pub async fn max_panel_number(
        pool: &DbPool,
        comic_id: DbId,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(panel_number) FROM panels WHERE comic_id = ?1",
        )
        .bind(comic_id)
        .fetch_one(pool)
        .await
    }

    /// Replace a panel's image and description after a successful edit.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_image(
        pool: &DbPool,
        id: DbId,
        image_path: &str,
        description: &str,
    ) -> Result<Option<Panel>, sqlx::Error> {
        let query = format!(
            "UPDATE panels SET image_path = ?2, description = ?3
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(id)
            .bind(image_path)
            .bind(description)
            .fetch_optional(pool)
            .await
    }

    /// Record narration on a panel.
    ///
    /// `narration_text` is always replaced; `audio_path` only when a new
    /// one is supplied, so a failed synthesis keeps any earlier audio.
    pub async fn update_narration(
        pool: &DbPool,
        id: DbId,
        narration_text: &str,
        audio_path: Option<&str>,
    ) -> Result<Option<Panel>, sqlx::Error> {
        let query = format!(
            "UPDATE panels SET
                narration_text = ?2,
                audio_path = COALESCE(?3, audio_path)
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Panel>(&query)
            .bind(id)
            .bind(narration_text)
            .bind(audio_path)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a panel by ID. Returns `true` if a row was
    /// removed. The caller removes referenced media files first.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM panels WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
