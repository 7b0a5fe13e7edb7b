//! Shared harness for HTTP-level integration tests.
//!
//! Builds the real router (same middleware stack as production) over a
//! temporary database and mock media adapters, so tests exercise the
//! full workflow without touching remote services. The mock image
//! generator writes real (tiny) JPEG files so deletion and PDF-export
//! paths see genuine artifacts on disk.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;
use vt_api::config::ServerConfig;
use vt_api::router::build_app_router;
use vt_api::state::AppState;
use vt_core::characters::CharacterMap;
use vt_core::naming;
use vt_core::types::DbId;
use vt_media::{MediaDirs, MediaError, NarrationSynthesizer, PanelImageGenerator, Voice};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

// ---------------------------------------------------------------------------
// Mock adapters
// ---------------------------------------------------------------------------

/// Image generator double: either writes a real tiny JPEG or fails the
/// way the remote adapter would.
pub struct MockImageGenerator {
    dirs: MediaDirs,
    fail: bool,
}

impl MockImageGenerator {
    pub fn ok(media_root: &Path) -> Self {
        Self {
            dirs: MediaDirs::new(media_root),
            fail: false,
        }
    }

    pub fn failing(media_root: &Path) -> Self {
        Self {
            dirs: MediaDirs::new(media_root),
            fail: true,
        }
    }

    fn write_image(&self, prefix: &str, identifier: Option<i64>) -> Result<PathBuf, MediaError> {
        let dir = self.dirs.images();
        vt_media::store::ensure_dir(&dir)?;
        let path = dir.join(naming::unique_media_filename(
            prefix,
            identifier,
            chrono::Utc::now(),
            "jpg",
        ));
        image::RgbImage::from_pixel(32, 24, image::Rgb([200, 80, 40])).save(&path)?;
        Ok(path)
    }
}

#[async_trait]
impl PanelImageGenerator for MockImageGenerator {
    async fn generate(
        &self,
        _scene_description: &str,
        _characters: &CharacterMap,
        _style: &str,
        panel_number: i64,
    ) -> Result<PathBuf, MediaError> {
        if self.fail {
            return Err(MediaError::EmptyResponse {
                service: "MockImage",
                detail: "forced generation failure",
            });
        }
        self.write_image("panel", Some(panel_number))
    }

    async fn edit(
        &self,
        _edit_instruction: &str,
        _original_description: &str,
        _characters: &CharacterMap,
        _style: &str,
    ) -> Result<PathBuf, MediaError> {
        if self.fail {
            return Err(MediaError::EmptyResponse {
                service: "MockImage",
                detail: "forced edit failure",
            });
        }
        self.write_image("edited_panel", None)
    }
}

/// Narration double: either writes a dummy MP3 or fails.
pub struct MockNarration {
    dirs: MediaDirs,
    fail: bool,
}

impl MockNarration {
    pub fn ok(media_root: &Path) -> Self {
        Self {
            dirs: MediaDirs::new(media_root),
            fail: false,
        }
    }

    pub fn failing(media_root: &Path) -> Self {
        Self {
            dirs: MediaDirs::new(media_root),
            fail: true,
        }
    }

    fn write_audio(&self, identifier: DbId) -> Result<PathBuf, MediaError> {
        let dir = self.dirs.audio();
        vt_media::store::ensure_dir(&dir)?;
        let path = dir.join(naming::unique_media_filename(
            "narration",
            Some(identifier),
            chrono::Utc::now(),
            "mp3",
        ));
        std::fs::write(&path, b"mock mpeg audio")?;
        Ok(path)
    }
}

#[async_trait]
impl NarrationSynthesizer for MockNarration {
    async fn synthesize(&self, _text: &str, identifier: DbId) -> Result<PathBuf, MediaError> {
        if self.fail {
            return Err(MediaError::MissingCredential {
                service: "MockNarration",
            });
        }
        self.write_audio(identifier)
    }

    async fn synthesize_with_voice(
        &self,
        text: &str,
        _voice_id: &str,
        identifier: DbId,
    ) -> Result<PathBuf, MediaError> {
        self.synthesize(text, identifier).await
    }

    async fn list_voices(&self) -> Vec<Voice> {
        if self.fail {
            return Vec::new();
        }
        vec![Voice {
            voice_id: "mock-voice".to_string(),
            name: "Mocha".to_string(),
            category: Some("premade".to_string()),
        }]
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Router with succeeding mock adapters rooted at `media_root`.
pub fn build_test_app(pool: SqlitePool, media_root: &Path) -> Router {
    build_test_app_with(
        pool,
        media_root,
        Arc::new(MockImageGenerator::ok(media_root)),
        Arc::new(MockNarration::ok(media_root)),
    )
}

/// Router with explicit adapter doubles.
pub fn build_test_app_with(
    pool: SqlitePool,
    media_root: &Path,
    image_gen: Arc<dyn PanelImageGenerator>,
    narration: Arc<dyn NarrationSynthesizer>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media: MediaDirs::new(media_root),
        image_gen,
        narration,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
