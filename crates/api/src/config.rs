use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `180`). Panel generation
    /// waits on the remote image service, so this sits above the image
    /// adapter's own 120-second bound.
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `180`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "180".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        }
    }
}

/// Media and remote-service configuration loaded from environment
/// variables.
///
/// Credentials are optional: narration degrades to failures and image
/// generation either fails or (with the explicit flag) renders local
/// placeholders. The flag is deliberate configuration rather than an
/// implicit credential-presence check, so tests and deployments choose
/// the behavior deterministically.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Root of the generated-media tree (default: `static`).
    pub media_root: PathBuf,
    /// Gemini API key for panel image generation.
    pub gemini_api_key: Option<String>,
    /// ElevenLabs API key for narration synthesis.
    pub elevenlabs_api_key: Option<String>,
    /// Render local placeholder panels when no image credential is
    /// configured (default: `false`).
    pub placeholder_fallback: bool,
}

impl MediaConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default  |
    /// |------------------------------|----------|
    /// | `MEDIA_ROOT`                 | `static` |
    /// | `GEMINI_API_KEY`             | unset    |
    /// | `ELEVENLABS_API_KEY`         | unset    |
    /// | `IMAGE_PLACEHOLDER_FALLBACK` | `false`  |
    pub fn from_env() -> Self {
        let media_root = std::env::var("MEDIA_ROOT")
            .unwrap_or_else(|_| "static".into())
            .into();

        let placeholder_fallback = std::env::var("IMAGE_PLACEHOLDER_FALLBACK")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            media_root,
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            elevenlabs_api_key: non_empty_var("ELEVENLABS_API_KEY"),
            placeholder_fallback,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
