//! Adapter-boundary error type.
//!
//! Every remote or filesystem failure a media adapter can hit is caught
//! and expressed here; callers decide per-operation whether a failure is
//! fatal (panel image during creation) or a warning (narration audio).

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// No API key configured for the remote service.
    #[error("No {service} API key configured")]
    MissingCredential { service: &'static str },

    /// The remote service answered with a non-success status.
    #[error("{service} returned status {status}: {detail}")]
    RemoteStatus {
        service: &'static str,
        status: u16,
        detail: String,
    },

    /// The remote service answered successfully but produced nothing
    /// usable (no candidates, no parts, no inline image data).
    #[error("{service} produced no usable output: {detail}")]
    EmptyResponse {
        service: &'static str,
        detail: &'static str,
    },

    /// Transport-level failure, including timeouts.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Inline image payload was not valid base64.
    #[error("Invalid inline image payload: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Local filesystem failure while persisting an artifact.
    #[error("Media file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Placeholder rendering failure.
    #[error("Placeholder rendering failed: {0}")]
    Image(#[from] image::ImageError),
}
