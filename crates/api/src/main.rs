use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vt_api::config::{MediaConfig, ServerConfig};
use vt_api::router::build_app_router;
use vt_api::state::AppState;
use vt_media::{ElevenLabsClient, GeminiPanelClient, MediaDirs};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vt_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let media_config = MediaConfig::from_env();
    if media_config.gemini_api_key.is_none() {
        tracing::warn!(
            placeholder_fallback = media_config.placeholder_fallback,
            "No GEMINI_API_KEY configured; panel generation will {}",
            if media_config.placeholder_fallback {
                "render local placeholders"
            } else {
                "fail"
            }
        );
    }
    if media_config.elevenlabs_api_key.is_none() {
        tracing::warn!("No ELEVENLABS_API_KEY configured; narration audio will be skipped");
    }

    // --- Database ---
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://visualtales.db".into());

    let pool = vt_db::create_pool(&database_url)
        .await
        .expect("Failed to open database");
    tracing::info!("Database connection pool created");

    vt_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    vt_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Media adapters ---
    let media = MediaDirs::new(media_config.media_root.clone());
    let image_gen = GeminiPanelClient::new(
        media_config.gemini_api_key.clone(),
        media_config.placeholder_fallback,
        media.clone(),
    )
    .expect("Failed to build image generation client");
    let narration = ElevenLabsClient::new(media_config.elevenlabs_api_key.clone(), media.clone())
        .expect("Failed to build narration client");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
        image_gen: Arc::new(image_gen),
        narration: Arc::new(narration),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
