//! Integration tests for the comic/panel record store.
//!
//! Exercises the repository layer against a real (temporary) database:
//! - Comic CRUD and the recent-comics bound
//! - Panel numbering input (MAX) across creations and deletions
//! - Cascade delete behaviour
//! - Unique constraint violations
//! - Character roster round-trips

use sqlx::SqlitePool;
use vt_core::characters::{CharacterEntry, CharacterMap};
use vt_core::panels::next_panel_number;
use vt_db::models::comic::{CreateComic, UpdateComic};
use vt_db::models::panel::NewPanel;
use vt_db::repositories::{ComicRepo, PanelRepo, RECENT_COMICS_LIMIT};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_comic(title: &str) -> CreateComic {
    CreateComic {
        title: title.to_string(),
        description: None,
        style: None,
    }
}

fn new_panel(comic_id: i64, panel_number: i64) -> NewPanel {
    NewPanel {
        comic_id,
        panel_number,
        title: format!("Panel {panel_number}"),
        description: "a test scene".to_string(),
        image_path: Some(format!("static/images/panel_{panel_number}.jpg")),
        narration_text: None,
        audio_path: None,
    }
}

// ---------------------------------------------------------------------------
// Comic CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn create_applies_defaults(pool: SqlitePool) {
    let comic = ComicRepo::create(&pool, &new_comic("Space Cats")).await.unwrap();
    assert_eq!(comic.title, "Space Cats");
    assert_eq!(comic.style, "realistic");
    assert!(comic.characters.is_empty());
    assert_eq!(comic.created_at, comic.updated_at);
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn find_missing_returns_none(pool: SqlitePool) {
    assert!(ComicRepo::find_by_id(&pool, 999).await.unwrap().is_none());
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn update_refreshes_updated_at(pool: SqlitePool) {
    let comic = ComicRepo::create(&pool, &new_comic("Original")).await.unwrap();

    let updated = ComicRepo::update(
        &pool,
        comic.id,
        &UpdateComic {
            title: Some("Renamed".to_string()),
            description: None,
            style: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.title, "Renamed");
    // Untouched fields keep their values.
    assert_eq!(updated.style, "realistic");
    assert!(updated.updated_at >= comic.updated_at);
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn list_recent_is_bounded_and_newest_first(pool: SqlitePool) {
    let mut ids = Vec::new();
    for i in 0..7 {
        let comic = ComicRepo::create(&pool, &new_comic(&format!("Comic {i}")))
            .await
            .unwrap();
        ids.push(comic.id);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    // Touching the oldest comic moves it to the front.
    assert!(ComicRepo::touch(&pool, ids[0]).await.unwrap());

    let recent = ComicRepo::list_recent(&pool).await.unwrap();
    assert_eq!(recent.len(), RECENT_COMICS_LIMIT as usize);
    assert_eq!(recent[0].id, ids[0]);
    assert_eq!(recent[1].id, ids[6]);
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn character_roster_round_trips(pool: SqlitePool) {
    let comic = ComicRepo::create(&pool, &new_comic("Roster")).await.unwrap();

    let mut roster = CharacterMap::new();
    roster.insert(
        "Luna",
        CharacterEntry {
            description: "a grey cat".to_string(),
            appearance: Some("green eyes".to_string()),
        },
    );

    let updated = ComicRepo::update_characters(&pool, comic.id, &roster)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(*updated.characters, roster);

    let fetched = ComicRepo::find_by_id(&pool, comic.id).await.unwrap().unwrap();
    assert_eq!(fetched.characters.get("Luna").unwrap().description, "a grey cat");
}

// ---------------------------------------------------------------------------
// Panel numbering
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn panel_numbers_are_max_plus_one_and_never_reused(pool: SqlitePool) {
    let comic = ComicRepo::create(&pool, &new_comic("Numbering")).await.unwrap();

    assert_eq!(PanelRepo::max_panel_number(&pool, comic.id).await.unwrap(), None);

    for _ in 0..3 {
        let max = PanelRepo::max_panel_number(&pool, comic.id).await.unwrap();
        let number = next_panel_number(max);
        PanelRepo::create(&pool, &new_panel(comic.id, number)).await.unwrap();
    }

    let panels = PanelRepo::list_by_comic(&pool, comic.id).await.unwrap();
    assert_eq!(
        panels.iter().map(|p| p.panel_number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    // Deleting panel 2 leaves a gap; the next number is still 4.
    let middle = panels[1].id;
    assert!(PanelRepo::delete(&pool, middle).await.unwrap());
    let max = PanelRepo::max_panel_number(&pool, comic.id).await.unwrap();
    assert_eq!(next_panel_number(max), 4);
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn duplicate_panel_number_is_rejected(pool: SqlitePool) {
    let comic = ComicRepo::create(&pool, &new_comic("Dup")).await.unwrap();
    PanelRepo::create(&pool, &new_panel(comic.id, 1)).await.unwrap();

    let err = PanelRepo::create(&pool, &new_panel(comic.id, 1)).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn same_number_allowed_across_comics(pool: SqlitePool) {
    let a = ComicRepo::create(&pool, &new_comic("A")).await.unwrap();
    let b = ComicRepo::create(&pool, &new_comic("B")).await.unwrap();
    PanelRepo::create(&pool, &new_panel(a.id, 1)).await.unwrap();
    PanelRepo::create(&pool, &new_panel(b.id, 1)).await.unwrap();
}

// ---------------------------------------------------------------------------
// Panel updates and cascade delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn narration_update_keeps_audio_when_absent(pool: SqlitePool) {
    let comic = ComicRepo::create(&pool, &new_comic("Narrated")).await.unwrap();
    let panel = PanelRepo::create(&pool, &new_panel(comic.id, 1)).await.unwrap();

    let with_audio = PanelRepo::update_narration(&pool, panel.id, "Once upon a time", Some("static/audio/n1.mp3"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with_audio.audio_path.as_deref(), Some("static/audio/n1.mp3"));

    // A later text-only update (synthesis failed) keeps the old audio.
    let text_only = PanelRepo::update_narration(&pool, panel.id, "Much later", None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(text_only.narration_text.as_deref(), Some("Much later"));
    assert_eq!(text_only.audio_path.as_deref(), Some("static/audio/n1.mp3"));
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn deleting_comic_cascades_to_panels(pool: SqlitePool) {
    let comic = ComicRepo::create(&pool, &new_comic("Doomed")).await.unwrap();
    let panel = PanelRepo::create(&pool, &new_panel(comic.id, 1)).await.unwrap();

    assert!(ComicRepo::delete(&pool, comic.id).await.unwrap());
    assert!(PanelRepo::find_by_id(&pool, panel.id).await.unwrap().is_none());
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn update_image_replaces_path_and_description(pool: SqlitePool) {
    let comic = ComicRepo::create(&pool, &new_comic("Edited")).await.unwrap();
    let panel = PanelRepo::create(&pool, &new_panel(comic.id, 1)).await.unwrap();

    let edited = PanelRepo::update_image(
        &pool,
        panel.id,
        "static/images/edited_panel_x.jpg",
        "a test scene [Edited: add rain]",
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(edited.image_path.as_deref(), Some("static/images/edited_panel_x.jpg"));
    assert_eq!(edited.description, "a test scene [Edited: add rain]");
}
