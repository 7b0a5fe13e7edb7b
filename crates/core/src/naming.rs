//! Generated-file naming convention engine.
//!
//! Every stored artifact (panel image, narration audio, exported PDF) gets
//! a name that is unique on its own: a second-resolution timestamp plus a
//! short random suffix, so rapid successive writes for the same identifier
//! can never collide.

use crate::types::Timestamp;

/// Length of the random hex suffix appended to generated filenames.
const SUFFIX_LEN: usize = 8;

/// Build a unique media filename.
///
/// Convention: `{prefix}[_{identifier}]_{YYYYMMDD_HHMMSS}_{suffix}.{ext}`
///
/// - `prefix` -- artifact kind, e.g. `"panel"`, `"narration"`
/// - `identifier` -- owning record id or panel number, omitted when `None`
/// - `suffix` -- 8 hex chars of a fresh UUID v4
pub fn unique_media_filename(
    prefix: &str,
    identifier: Option<i64>,
    now: Timestamp,
    ext: &str,
) -> String {
    let stamp = now.format("%Y%m%d_%H%M%S");
    let suffix = random_suffix();
    match identifier {
        Some(id) => format!("{prefix}_{id}_{stamp}_{suffix}.{ext}"),
        None => format!("{prefix}_{stamp}_{suffix}.{ext}"),
    }
}

/// Build a unique export filename from a comic title.
///
/// The title is reduced to a filesystem-safe stem first; `tag` (e.g.
/// `"characters"`) distinguishes export kinds for the same comic.
pub fn unique_export_filename(title: &str, tag: Option<&str>, now: Timestamp) -> String {
    let stem = safe_file_stem(title);
    let stamp = now.format("%Y%m%d_%H%M%S");
    let suffix = random_suffix();
    match tag {
        Some(tag) => format!("{stem}_{tag}_{stamp}_{suffix}.pdf"),
        None => format!("{stem}_{stamp}_{suffix}.pdf"),
    }
}

/// Reduce a title to characters safe in a filename.
///
/// Keeps alphanumerics, spaces, hyphens, and underscores; everything else
/// is dropped. Trailing whitespace left by dropped characters is trimmed.
pub fn safe_file_stem(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn random_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn media_filename_with_identifier() {
        let name = unique_media_filename("panel", Some(3), fixed_now(), "jpg");
        assert!(name.starts_with("panel_3_20250314_092653_"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn media_filename_without_identifier() {
        let name = unique_media_filename("edited_panel", None, fixed_now(), "jpg");
        assert!(name.starts_with("edited_panel_20250314_092653_"));
    }

    #[test]
    fn same_second_same_identifier_still_unique() {
        let a = unique_media_filename("panel", Some(1), fixed_now(), "jpg");
        let b = unique_media_filename("panel", Some(1), fixed_now(), "jpg");
        assert_ne!(a, b);
    }

    #[test]
    fn safe_stem_drops_special_characters() {
        assert_eq!(safe_file_stem("My Comic: Part #1!"), "My Comic Part 1");
        assert_eq!(safe_file_stem("under_score-dash"), "under_score-dash");
    }

    #[test]
    fn safe_stem_trims_trailing_space() {
        assert_eq!(safe_file_stem("Trailing!?"), "Trailing");
        assert_eq!(safe_file_stem("Dots..."), "Dots");
    }

    #[test]
    fn export_filename_with_tag() {
        let name = unique_export_filename("Space Cats!", Some("characters"), fixed_now());
        assert!(name.starts_with("Space Cats_characters_20250314_092653_"));
        assert!(name.ends_with(".pdf"));
    }
}
