//! Classify lines of fork text.

use crate::{
    consts::{
        COLOR_KEYWORD, GET_KEYWORD, GOTO_KEYWORD, INLINE_OPTION_MARKER, OPTION_MARKER,
        OUTPUT_OPEN, SET_KEYWORD,
    },
    line::scan::normalize_name,
};

#[derive(Clone, Debug, PartialEq)]
/// What a single line of fork text holds.
///
/// Lines are classified in this order: blank lines, inline options, options, output
/// blocks and statements. A line matching none of them is unexpected.
pub enum LineKind {
    Blank,
    /// Option shown inline with the page content: `text@@fork`.
    InlineOption(OptionLine),
    /// Option shown in the list of options: `text@fork`.
    Option(OptionLine),
    /// Line with an output block. The block may continue on the following lines.
    Output,
    /// `set` statement with the text following the keyword.
    Set(String),
    /// `get` statement with the text following the keyword.
    Get(String),
    /// `goto` statement with the normalized fork name.
    Goto(String),
    /// `color` statement with the text following the keyword.
    Color(String),
    Unexpected,
}

#[derive(Clone, Debug, PartialEq)]
/// Option text and target fork as written in a line.
pub struct OptionLine {
    /// Text before the marker, trimmed but not unescaped.
    pub text: String,
    /// Normalized name of the fork to go to.
    pub fork: String,
}

/// Classify a line of fork text.
pub fn parse_line_kind(line: &str) -> LineKind {
    if line.trim().is_empty() {
        LineKind::Blank
    } else if line.contains(INLINE_OPTION_MARKER) {
        LineKind::InlineOption(split_option(line, INLINE_OPTION_MARKER.len()))
    } else if line.contains(OPTION_MARKER) {
        LineKind::Option(split_option(line, OPTION_MARKER.len()))
    } else if line.contains(OUTPUT_OPEN) {
        LineKind::Output
    } else if let Some(rest) = strip_keyword(line, SET_KEYWORD) {
        LineKind::Set(rest.to_string())
    } else if let Some(rest) = strip_keyword(line, GET_KEYWORD) {
        LineKind::Get(rest.to_string())
    } else if let Some(rest) = strip_keyword(line, GOTO_KEYWORD) {
        LineKind::Goto(normalize_name(rest))
    } else if let Some(rest) = strip_keyword(line, COLOR_KEYWORD) {
        LineKind::Color(rest.to_string())
    } else {
        LineKind::Unexpected
    }
}

/// Split an option line at the first marker. The fork name follows the marker.
fn split_option(line: &str, marker_length: usize) -> OptionLine {
    let (text, fork) = match line.find(OPTION_MARKER) {
        Some(index) => (&line[..index], line.get(index + marker_length..).unwrap_or("")),
        None => (line, ""),
    };

    OptionLine {
        text: text.trim().to_string(),
        fork: normalize_name(fork),
    }
}

/// Return the rest of the line if it starts with the keyword as a separate word.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let line = line.trim();
    let rest = line.strip_prefix(keyword)?;

    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}
