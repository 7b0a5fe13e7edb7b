//! Remote narration synthesis adapter.
//!
//! Wraps the ElevenLabs text-to-speech endpoint: text in, `audio/mpeg`
//! bytes out, written verbatim to a uniquely named `.mp3` under the audio
//! directory. A voices listing is exposed read-only and degrades to an
//! empty list on any failure.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vt_core::naming;
use vt_core::types::DbId;

use crate::error::MediaError;
use crate::store::{self, MediaDirs};

const SERVICE: &str = "ElevenLabs";

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// Default narration voice ("Rachel").
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

const MODEL_ID: &str = "eleven_monolingual_v1";

/// Synthesis calls are bounded at 30 seconds.
const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

/// The voices listing is a lightweight read; bound it tighter.
const VOICES_TIMEOUT: Duration = Duration::from_secs(10);

/// A voice descriptor from the voices listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Converts narration text to stored audio.
#[async_trait]
pub trait NarrationSynthesizer: Send + Sync {
    /// Synthesize with the default voice; `identifier` feeds file naming.
    async fn synthesize(&self, text: &str, identifier: DbId) -> Result<PathBuf, MediaError>;

    /// Synthesize with an explicit voice.
    async fn synthesize_with_voice(
        &self,
        text: &str,
        voice_id: &str,
        identifier: DbId,
    ) -> Result<PathBuf, MediaError>;

    /// Available voices; empty on any failure, including a missing
    /// credential.
    async fn list_voices(&self) -> Vec<Voice>;
}

/// HTTP client for the ElevenLabs text-to-speech API.
pub struct ElevenLabsClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    dirs: MediaDirs,
}

impl ElevenLabsClient {
    pub fn new(api_key: Option<String>, dirs: MediaDirs) -> Result<Self, MediaError> {
        // Per-request timeouts differ, so the client itself carries none.
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            dirs,
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request_audio(
        &self,
        text: &str,
        voice_id: &str,
        settings: VoiceSettings,
        identifier: DbId,
    ) -> Result<PathBuf, MediaError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(MediaError::MissingCredential { service: SERVICE })?;

        let url = format!("{}/v1/text-to-speech/{voice_id}", self.base_url);
        let request = SynthesisRequest {
            text: text.to_string(),
            model_id: MODEL_ID,
            voice_settings: settings,
        };

        tracing::info!(identifier, "synthesizing narration audio");

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", api_key)
            .header("Accept", "audio/mpeg")
            .timeout(SYNTHESIS_TIMEOUT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MediaError::RemoteStatus {
                service: SERVICE,
                status: status.as_u16(),
                detail: detail.chars().take(300).collect(),
            });
        }

        let bytes = response.bytes().await?;

        let dir = self.dirs.audio();
        store::ensure_dir(&dir)?;
        let path = dir.join(naming::unique_media_filename(
            "narration",
            Some(identifier),
            chrono::Utc::now(),
            "mp3",
        ));
        tokio::fs::write(&path, &bytes).await?;
        tracing::info!(path = %path.display(), "narration audio saved");
        Ok(path)
    }
}

#[async_trait]
impl NarrationSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str, identifier: DbId) -> Result<PathBuf, MediaError> {
        self.request_audio(text, DEFAULT_VOICE_ID, VoiceSettings::default_voice(), identifier)
            .await
    }

    async fn synthesize_with_voice(
        &self,
        text: &str,
        voice_id: &str,
        identifier: DbId,
    ) -> Result<PathBuf, MediaError> {
        self.request_audio(text, voice_id, VoiceSettings::explicit_voice(), identifier)
            .await
    }

    async fn list_voices(&self) -> Vec<Voice> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Vec::new();
        };

        let url = format!("{}/v1/voices", self.base_url);
        let result = self
            .http
            .get(&url)
            .header("xi-api-key", api_key)
            .timeout(VOICES_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<VoicesResponse>().await {
                    Ok(body) => body.voices,
                    Err(err) => {
                        tracing::error!(error = %err, "failed to decode voices listing");
                        Vec::new()
                    }
                }
            }
            Ok(response) => {
                tracing::error!(status = %response.status(), "voices listing failed");
                Vec::new()
            }
            Err(err) => {
                tracing::error!(error = %err, "voices listing request failed");
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct SynthesisRequest {
    text: String,
    model_id: &'static str,
    voice_settings: VoiceSettings,
}

/// Fixed voice-quality parameters.
///
/// The default-voice path sends the full set; the explicit-voice path
/// sends only the two core fields.
#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f64,
    similarity_boost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    use_speaker_boost: Option<bool>,
}

impl VoiceSettings {
    fn default_voice() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
            style: Some(0.0),
            use_speaker_boost: Some(true),
        }
    }

    fn explicit_voice() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
            style: None,
            use_speaker_boost: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<Voice>,
}
