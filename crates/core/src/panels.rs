//! Panel numbering and edit bookkeeping rules.

/// Next panel number for a comic.
///
/// Always 1 + the highest number ever assigned that still exists; numbers
/// freed by deletions are never reused, so sequences may have gaps.
pub fn next_panel_number(max_existing: Option<i64>) -> i64 {
    max_existing.unwrap_or(0) + 1
}

/// Scene description after a successful edit.
///
/// Each applied edit appends one marker suffix; the description grows
/// without bound across repeated edits. That growth is accepted behavior,
/// preserving the full edit history in place.
pub fn edited_description(description: &str, instruction: &str) -> String {
    format!("{description} [Edited: {instruction}]")
}
