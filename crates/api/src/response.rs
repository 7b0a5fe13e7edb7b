//! Shared response envelope types for API handlers.
//!
//! Reads return a plain `{ "data": ... }` envelope via [`DataResponse`].
//! Mutating actions return [`ActionResponse`], which adds the
//! human-readable status message the UI surfaces to the user, plus an
//! optional warning for partially successful operations (e.g. a panel
//! saved without its narration audio).

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Envelope for mutating actions: the affected record, a status message,
/// and an optional non-fatal warning.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T: Serialize> {
    pub data: T,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl<T: Serialize> ActionResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = warning;
        self
    }
}
