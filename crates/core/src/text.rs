//! Greedy word wrapping shared by the placeholder renderer and the PDF
//! layout engine.

/// Wrap `text` into lines of at most `max_chars` characters, breaking on
/// whitespace. A single word longer than `max_chars` gets a line of its
/// own rather than being split.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap_words("hello world", 20), vec!["hello world"]);
    }

    #[test]
    fn wraps_at_limit() {
        assert_eq!(
            wrap_words("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn oversized_word_gets_own_line() {
        assert_eq!(
            wrap_words("hi incomprehensibilities ok", 10),
            vec!["hi", "incomprehensibilities", "ok"]
        );
    }

    #[test]
    fn empty_text_yields_no_lines() {
        assert!(wrap_words("   ", 10).is_empty());
    }
}
