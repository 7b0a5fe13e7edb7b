//! Repository for the `comics` table.

use sqlx::types::Json;
use vt_core::characters::CharacterMap;
use vt_core::types::DbId;

use crate::models::comic::{Comic, CreateComic, UpdateComic};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, style, characters, created_at, updated_at";

/// Page size of the landing view's recent-comics listing.
pub const RECENT_COMICS_LIMIT: i64 = 5;

/// Provides CRUD operations for comics plus character-roster helpers.
///
/// Every content mutation refreshes `updated_at`; [`ComicRepo::touch`]
/// does so for mutations that live in other tables (panel changes).
pub struct ComicRepo;

impl ComicRepo {
    /// Insert a new comic, returning the created row.
    ///
    /// If `style` is `None`, defaults to `'realistic'`.
    pub async fn create(pool: &DbPool, input: &CreateComic) -> Result<Comic, sqlx::Error> {
        let now = chrono::Utc::now();
        let query = format!(
            "INSERT INTO comics (title, description, style, characters, created_at, updated_at)
             VALUES (?1, ?2, COALESCE(?3, 'realistic'), '{{}}', ?4, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.style)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a comic by its internal ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Comic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comics WHERE id = ?1");
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recently updated comics, newest first, bounded to the
    /// landing view's page size.
    pub async fn list_recent(pool: &DbPool) -> Result<Vec<Comic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comics ORDER BY updated_at DESC LIMIT ?1"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(RECENT_COMICS_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Update a comic's metadata. Only non-`None` fields in `input` are
    /// applied. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateComic,
    ) -> Result<Option<Comic>, sqlx::Error> {
        let now = chrono::Utc::now();
        let query = format!(
            "UPDATE comics SET
                title = COALESCE(?2, title),
                description = COALESCE(?3, description),
                style = COALESCE(?4, style),
                updated_at = ?5
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.style)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Fully replace a comic's character roster.
    pub async fn update_characters(
        pool: &DbPool,
        id: DbId,
        characters: &CharacterMap,
    ) -> Result<Option<Comic>, sqlx::Error> {
        let now = chrono::Utc::now();
        let query = format!(
            "UPDATE comics SET characters = ?2, updated_at = ?3
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comic>(&query)
            .bind(id)
            .bind(Json(characters))
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Refresh `updated_at` only. Used after panel-level mutations, which
    /// count as content changes to the owning comic.
    pub async fn touch(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE comics SET updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(chrono::Utc::now())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a comic by ID; panels cascade at the database level.
    /// Returns `true` if a row was removed.
    ///
    /// Media files referenced by the cascading panels must be removed by
    /// the caller *before* this, or their references are lost.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comics WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
