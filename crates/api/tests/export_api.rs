//! HTTP-level integration tests for PDF export and the voices listing.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, post_json};
use sqlx::SqlitePool;

async fn create_comic(pool: &SqlitePool, media: &std::path::Path, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone(), media);
    let json = body_json(
        post_json(app, "/api/v1/comics", serde_json::json!({"title": title})).await,
    )
    .await;
    json["data"]["id"].as_i64().unwrap()
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn export_without_panels_is_rejected(pool: SqlitePool) {
    let media = tempfile::tempdir().unwrap();
    let comic_id = create_comic(&pool, media.path(), "Empty").await;

    let app = common::build_test_app(pool, media.path());
    let response = get(app, &format!("/api/v1/comics/{comic_id}/export")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "No panels to export");
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn export_returns_pdf_attachment(pool: SqlitePool) {
    let media = tempfile::tempdir().unwrap();
    let comic_id = create_comic(&pool, media.path(), "Space Cats").await;

    let app = common::build_test_app(pool.clone(), media.path());
    post_json(
        app,
        &format!("/api/v1/comics/{comic_id}/panels"),
        serde_json::json!({
            "scene_description": "Luna floats past the window",
            "narration_text": "In space, naps are eternal."
        }),
    )
    .await;

    let app = common::build_test_app(pool, media.path());
    let response = get(app, &format!("/api/v1/comics/{comic_id}/export")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("Space Cats.pdf"));

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF"));
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn character_sheet_for_empty_roster_is_rejected(pool: SqlitePool) {
    let media = tempfile::tempdir().unwrap();
    let comic_id = create_comic(&pool, media.path(), "Nobody Home").await;

    let app = common::build_test_app(pool, media.path());
    let response = get(app, &format!("/api/v1/comics/{comic_id}/export/characters")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn character_sheet_returns_pdf(pool: SqlitePool) {
    let media = tempfile::tempdir().unwrap();
    let comic_id = create_comic(&pool, media.path(), "Ensemble").await;

    let app = common::build_test_app(pool.clone(), media.path());
    post_json(
        app,
        &format!("/api/v1/comics/{comic_id}/characters"),
        serde_json::json!({"name": "Luna", "description": "a grey cat"}),
    )
    .await;

    let app = common::build_test_app(pool, media.path());
    let response = get(app, &format!("/api/v1/comics/{comic_id}/export/characters")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF"));
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn voices_listing_returns_adapter_result(pool: SqlitePool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());

    let json = body_json(get(app, "/api/v1/voices").await).await;
    assert_eq!(json["data"][0]["name"], "Mocha");
}

#[sqlx::test(migrator = "vt_db::MIGRATOR")]
async fn health_reports_db_status(pool: SqlitePool) {
    let media = tempfile::tempdir().unwrap();
    let app = common::build_test_app(pool, media.path());

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}
