//! Text Helpers
//!
//! Small, allocation-light helpers for bounding prompt and excerpt sizes.

/// Truncate `text` to at most `max_chars` characters, never splitting a
/// UTF-8 code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Count whitespace-separated words that contain at least one alphanumeric
/// character.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .count()
}
