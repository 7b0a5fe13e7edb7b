use std::sync::Arc;

use vt_media::{MediaDirs, NarrationSynthesizer, PanelImageGenerator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Both generation adapters are trait objects so tests inject doubles
/// instead of hitting remote services.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vt_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// On-disk layout for generated media.
    pub media: MediaDirs,
    /// Panel image generation adapter.
    pub image_gen: Arc<dyn PanelImageGenerator>,
    /// Narration synthesis adapter.
    pub narration: Arc<dyn NarrationSynthesizer>,
}
