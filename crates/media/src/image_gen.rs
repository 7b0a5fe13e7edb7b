//! Remote panel-image generation adapter.
//!
//! Wraps the Gemini `generateContent` endpoint: the prompt asks for both
//! text and image output, the response carries zero or more parts, and
//! the first inline (base64) image part is persisted verbatim as a
//! `.jpg` under the images directory. All failure modes surface as
//! [`MediaError`]; the caller decides how fatal they are.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use vt_core::characters::CharacterMap;
use vt_core::naming;
use vt_core::prompt;

use crate::error::MediaError;
use crate::placeholder;
use crate::store::{self, MediaDirs};

const SERVICE: &str = "Gemini";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Image-capable model used for both generation and edit regeneration.
const MODEL: &str = "gemini-2.5-flash-image-preview";

/// Upper bound on a generation round-trip. The remote side gives no
/// latency guarantee, so an explicit client-side bound keeps a handler
/// from blocking indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Generates panel artwork from scene text.
///
/// Injected into the API state as a trait object so tests can substitute
/// a double for the remote service.
#[async_trait]
pub trait PanelImageGenerator: Send + Sync {
    /// Generate artwork for a new panel, returning the stored image path.
    async fn generate(
        &self,
        scene_description: &str,
        characters: &CharacterMap,
        style: &str,
        panel_number: i64,
    ) -> Result<PathBuf, MediaError>;

    /// Regenerate an existing panel from a natural-language instruction.
    ///
    /// This is prompt-based regeneration: the current image is never read
    /// or transmitted, only the original scene text and the instruction.
    async fn edit(
        &self,
        edit_instruction: &str,
        original_description: &str,
        characters: &CharacterMap,
        style: &str,
    ) -> Result<PathBuf, MediaError>;
}

/// HTTP client for the Gemini image-generation API.
pub struct GeminiPanelClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    dirs: MediaDirs,
    /// When set and no credential is configured, `generate` falls back to
    /// a locally rendered placeholder instead of failing. Edits never
    /// fall back.
    placeholder_fallback: bool,
}

impl GeminiPanelClient {
    pub fn new(
        api_key: Option<String>,
        placeholder_fallback: bool,
        dirs: MediaDirs,
    ) -> Result<Self, MediaError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            dirs,
            placeholder_fallback,
        })
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// One `generateContent` round-trip: send the prompt, pull the first
    /// inline image out of the response.
    async fn invoke(&self, api_key: &str, prompt_text: &str) -> Result<Vec<u8>, MediaError> {
        let url = format!("{}/v1beta/models/{MODEL}:generateContent", self.base_url);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart {
                    text: prompt_text.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT", "IMAGE"],
            },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(MediaError::RemoteStatus {
                service: SERVICE,
                status: status.as_u16(),
                detail: truncate(&detail, 300),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        extract_image_bytes(body)
    }

    async fn write_image(&self, prefix: &str, identifier: Option<i64>, bytes: &[u8]) -> Result<PathBuf, MediaError> {
        let dir = self.dirs.images();
        store::ensure_dir(&dir)?;
        let path = dir.join(naming::unique_media_filename(
            prefix,
            identifier,
            chrono::Utc::now(),
            "jpg",
        ));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

#[async_trait]
impl PanelImageGenerator for GeminiPanelClient {
    async fn generate(
        &self,
        scene_description: &str,
        characters: &CharacterMap,
        style: &str,
        panel_number: i64,
    ) -> Result<PathBuf, MediaError> {
        let Some(api_key) = self.api_key.as_deref() else {
            if self.placeholder_fallback {
                tracing::warn!(panel_number, "no {SERVICE} API key configured, rendering placeholder");
                return placeholder::render(&self.dirs.images(), panel_number, scene_description);
            }
            return Err(MediaError::MissingCredential { service: SERVICE });
        };

        let prompt_text = prompt::generation_prompt(scene_description, characters, style);
        tracing::info!(panel_number, "generating panel image");

        let bytes = self.invoke(api_key, &prompt_text).await?;
        let path = self.write_image("panel", Some(panel_number), &bytes).await?;
        tracing::info!(path = %path.display(), "panel image saved");
        Ok(path)
    }

    async fn edit(
        &self,
        edit_instruction: &str,
        original_description: &str,
        characters: &CharacterMap,
        style: &str,
    ) -> Result<PathBuf, MediaError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(MediaError::MissingCredential { service: SERVICE })?;

        let prompt_text =
            prompt::edit_prompt(edit_instruction, original_description, characters, style);
        tracing::info!(instruction = %edit_instruction, "regenerating panel image");

        let bytes = self.invoke(api_key, &prompt_text).await?;
        let path = self.write_image("edited_panel", None, &bytes).await?;
        tracing::info!(path = %path.display(), "edited panel image saved");
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseModalities")]
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

/// Decode the first inline image part of a response.
///
/// Text parts are logged, not stored. A response without candidates,
/// parts, or inline data is an empty result, not a transport error.
fn extract_image_bytes(response: GenerateContentResponse) -> Result<Vec<u8>, MediaError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(MediaError::EmptyResponse {
            service: SERVICE,
            detail: "no candidates in response",
        });
    };

    let Some(content) = candidate.content else {
        return Err(MediaError::EmptyResponse {
            service: SERVICE,
            detail: "candidate has no content",
        });
    };

    if content.parts.is_empty() {
        return Err(MediaError::EmptyResponse {
            service: SERVICE,
            detail: "no content parts in response",
        });
    }

    for part in content.parts {
        if let Some(inline) = part.inline_data {
            let bytes = base64::engine::general_purpose::STANDARD.decode(inline.data)?;
            return Ok(bytes);
        }
        if let Some(text) = part.text {
            tracing::debug!(commentary = %text, "generation produced text alongside the image");
        }
    }

    Err(MediaError::EmptyResponse {
        service: SERVICE,
        detail: "no inline image data in any part",
    })
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn first_inline_part_wins() {
        let encoded_a = base64::engine::general_purpose::STANDARD.encode(b"image-a");
        let encoded_b = base64::engine::general_purpose::STANDARD.encode(b"image-b");
        let body = response(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here is your panel." },
                    { "inlineData": { "mimeType": "image/jpeg", "data": encoded_a } },
                    { "inlineData": { "mimeType": "image/jpeg", "data": encoded_b } }
                ]}
            }]
        }));

        assert_eq!(extract_image_bytes(body).unwrap(), b"image-a");
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        let body = response(json!({}));
        assert_matches!(
            extract_image_bytes(body),
            Err(MediaError::EmptyResponse { detail: "no candidates in response", .. })
        );
    }

    #[test]
    fn candidate_without_parts_is_empty_response() {
        let body = response(json!({ "candidates": [{ "content": { "parts": [] } }] }));
        assert_matches!(
            extract_image_bytes(body),
            Err(MediaError::EmptyResponse { detail: "no content parts in response", .. })
        );
    }

    #[test]
    fn text_only_response_is_empty_response() {
        let body = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "sorry, no image" }] } }]
        }));
        assert_matches!(
            extract_image_bytes(body),
            Err(MediaError::EmptyResponse { detail: "no inline image data in any part", .. })
        );
    }

    #[test]
    fn invalid_base64_is_decode_error() {
        let body = response(json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "data": "!!not-base64!!" } }] }
            }]
        }));
        assert_matches!(extract_image_bytes(body), Err(MediaError::Decode(_)));
    }

    #[tokio::test]
    async fn uncredentialed_generate_without_fallback_fails() {
        let dir = tempfile::tempdir().unwrap();
        let client =
            GeminiPanelClient::new(None, false, MediaDirs::new(dir.path())).unwrap();

        let result = client
            .generate("Luna naps", &CharacterMap::new(), "realistic", 1)
            .await;
        assert_matches!(result, Err(MediaError::MissingCredential { .. }));
    }

    #[tokio::test]
    async fn uncredentialed_generate_with_fallback_renders_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let client = GeminiPanelClient::new(None, true, MediaDirs::new(dir.path())).unwrap();

        let path = client
            .generate("Luna naps", &CharacterMap::new(), "realistic", 7)
            .await
            .unwrap();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("placeholder_7_"));
    }

    #[tokio::test]
    async fn uncredentialed_edit_never_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let client = GeminiPanelClient::new(None, true, MediaDirs::new(dir.path())).unwrap();

        let result = client
            .edit("add rain", "Luna naps", &CharacterMap::new(), "realistic")
            .await;
        assert_matches!(result, Err(MediaError::MissingCredential { .. }));
    }
}
