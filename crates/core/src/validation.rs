//! Form input validation helpers.

use crate::error::CoreError;

/// Trim `value` and reject it when nothing remains.
///
/// `field` names the offending field in the error message, e.g.
/// `"Comic title"` or `"Scene description"`.
pub fn non_blank<'a>(value: &'a str, field: &str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CoreError::Validation(format!("{field} is required")))
    } else {
        Ok(trimmed)
    }
}
