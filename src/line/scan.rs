//! Scanning utilities for fork text.

use crate::consts::{FORK_MARKER, OUTPUT_CLOSE, OUTPUT_OPEN};

/// Whether a character counts as part of a word when looking for whole words.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether the position in the text lies inside an output block `{...}`.
///
/// Blocks do not nest: the position is inside a block if the last brace before it
/// is an opening brace.
pub fn is_inside_output(text: &str, index: usize) -> bool {
    let before = &text[..index];

    match (before.rfind(OUTPUT_OPEN), before.rfind(OUTPUT_CLOSE)) {
        (Some(open), Some(close)) => open > close,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Whether the line which the position lies on contains an option marker.
pub fn is_on_option_line(text: &str, index: usize) -> bool {
    let start = text[..index].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[index..]
        .find('\n')
        .map(|i| index + i)
        .unwrap_or_else(|| text.len());

    text[start..end].contains(FORK_MARKER)
}

/// Whether the text holds a word character right before the position.
fn word_before(text: &str, index: usize) -> bool {
    text[..index]
        .chars()
        .next_back()
        .map(is_word_char)
        .unwrap_or(false)
}

/// Whether the text holds a word character right at the position.
fn word_after(text: &str, index: usize) -> bool {
    text[index..].chars().next().map(is_word_char).unwrap_or(false)
}

/// Find all positions where a needle appears as a whole word.
///
/// A match counts if it is not directly preceded or followed by a word character.
pub fn find_whole_words(text: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }

    text.match_indices(needle)
        .map(|(index, _)| index)
        .filter(|&index| !word_before(text, index) && !word_after(text, index + needle.len()))
        .collect()
}

pub fn contains_whole_word(text: &str, needle: &str) -> bool {
    !find_whole_words(text, needle).is_empty()
}

/// Index where the line containing the position ends, not including the newline.
pub fn end_of_line(text: &str, index: usize) -> usize {
    text[index..]
        .find('\n')
        .map(|i| index + i)
        .unwrap_or_else(|| text.len())
}

/// Remove all whitespace and lowercase a name.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
