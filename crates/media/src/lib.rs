//! Media storage layout and the two remote generation adapters.
//!
//! [`image_gen`] wraps the remote panel-image generation call (with an
//! optional local placeholder fallback for uncredentialed development);
//! [`narration`] wraps the remote text-to-speech call. Both adapters are
//! exposed as traits so the API layer takes injected instances and tests
//! substitute doubles.

pub mod error;
pub mod image_gen;
pub mod narration;
pub mod placeholder;
pub mod store;

pub use error::MediaError;
pub use image_gen::{GeminiPanelClient, PanelImageGenerator};
pub use narration::{ElevenLabsClient, NarrationSynthesizer, Voice};
pub use store::MediaDirs;
