//! Panel title derivation.
//!
//! A panel's title is a short summary of its scene description: the first
//! few meaningful words, title-cased and length-capped.

/// Words that never make it into a derived title.
const FILLER_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "in", "on", "at", "to",
    "for", "of",
];

/// Surviving words kept in a derived title.
const MAX_TITLE_WORDS: usize = 4;

/// Hard cap on title length; longer results are cut to 47 chars + `...`.
const MAX_TITLE_LEN: usize = 50;

/// Derive a short panel title from a scene description.
///
/// Scans the description in word order, skipping filler words and words of
/// two characters or fewer, title-casing survivors until four are
/// collected. When nothing qualifies, the first three raw words are used
/// instead. The result is capped at 50 characters (47 + ellipsis), with
/// `"New Panel"` as the terminal fallback for all-whitespace input.
pub fn derive_panel_title(scene_description: &str) -> String {
    let words: Vec<&str> = scene_description.split_whitespace().collect();

    let mut meaningful: Vec<String> = Vec::new();
    for word in &words {
        let clean = strip_punctuation(word);
        let lower = clean.to_lowercase();
        if !FILLER_WORDS.contains(&lower.as_str()) && clean.chars().count() > 2 {
            meaningful.push(title_case(clean));
        }
        if meaningful.len() >= MAX_TITLE_WORDS {
            break;
        }
    }

    if meaningful.is_empty() {
        meaningful = words
            .iter()
            .take(3)
            .map(|w| title_case(strip_punctuation(w)))
            .collect();
    }

    let mut title = meaningful.join(" ");
    if title.chars().count() > MAX_TITLE_LEN {
        title = title.chars().take(MAX_TITLE_LEN - 3).collect::<String>() + "...";
    }

    if title.is_empty() {
        "New Panel".to_string()
    } else {
        title
    }
}

fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c| matches!(c, '.' | ',' | '!' | '?'))
}

/// Uppercase the first character, lowercase the rest.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}
