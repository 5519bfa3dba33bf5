//! Parse the conditions of `if` blocks and match text queries.

use crate::{
    consts::{ESCAPED_QUERY_SEPARATOR, IF_KEYWORD, TEXT_KEYWORD, TEXT_QUERY_SEPARATOR, TIMER_KEYWORD},
    line::{escape::unescape, scan::contains_whole_word},
};

#[derive(Clone, Debug, PartialEq)]
/// What a block's condition asks for.
pub enum ConditionKind {
    /// No condition: the block is always processed.
    Always,
    /// Process the block once this many seconds have passed.
    Timer(f64),
    /// The timer could not be read as a positive number of seconds.
    InvalidTimer,
    /// Process the block when submitted text matches the query.
    Text(TextQuery),
    /// Process the block if the expression evaluates to `true`.
    Expression(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// How submitted text is compared with a query.
pub enum QueryMode {
    /// The text is the query.
    Is,
    /// The text is not the query.
    IsNot,
    /// The text contains every word of the query.
    Has,
    /// The text contains none of the words of the query.
    HasNot,
    /// The text contains at least one word of the query.
    Pick,
}

impl QueryMode {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "is" => Some(QueryMode::Is),
            "!is" => Some(QueryMode::IsNot),
            "has" => Some(QueryMode::Has),
            "!has" => Some(QueryMode::HasNot),
            "pick" => Some(QueryMode::Pick),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Query from a `text` condition.
pub struct TextQuery {
    pub mode: QueryMode,
    /// Full query, lowercased and unescaped.
    pub phrase: String,
    /// Comma separated words of the query. `\c` in a word is a literal comma.
    pub words: Vec<String>,
}

impl TextQuery {
    fn new(mode: QueryMode, query: &str) -> Self {
        let phrase = unescape(query.to_lowercase().trim(), true);

        let words = phrase
            .split(TEXT_QUERY_SEPARATOR)
            .map(|word| {
                word.replace(ESCAPED_QUERY_SEPARATOR, &TEXT_QUERY_SEPARATOR.to_string())
                    .trim()
                    .to_string()
            })
            .filter(|word| !word.is_empty())
            .collect();

        TextQuery {
            mode,
            phrase,
            words,
        }
    }

    /// Whether the query has nothing to compare with.
    pub fn is_empty(&self) -> bool {
        self.phrase.is_empty()
    }

    /// Whether submitted text satisfies the query.
    ///
    /// The text is lowercased and trimmed before comparing. Words are matched as whole
    /// words: `door` is found in `open the door!` but not in `doors`.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        let text = text.trim();

        let mut found = self.words.iter().map(|word| contains_whole_word(text, word));

        match self.mode {
            QueryMode::Is => text == self.phrase,
            QueryMode::IsNot => text != self.phrase,
            QueryMode::Has => !self.words.is_empty() && found.all(|is_found| is_found),
            QueryMode::HasNot => !found.any(|is_found| is_found),
            QueryMode::Pick => found.any(|is_found| is_found),
        }
    }
}

/// Read the condition of a block from its `if ...` line.
///
/// `timer is <seconds>` and `text <mode> <query>` are special forms. Everything else
/// is an expression.
pub fn parse_condition(condition: &str) -> ConditionKind {
    let condition = condition.trim();

    if condition.is_empty() {
        return ConditionKind::Always;
    }

    let condition = condition
        .strip_prefix(IF_KEYWORD)
        .unwrap_or(condition)
        .trim();

    let words = condition.split_whitespace().collect::<Vec<_>>();

    match words.as_slice() {
        [first, "is", rest @ ..] if *first == TIMER_KEYWORD => match rest.first() {
            Some(seconds) => parse_seconds(seconds)
                .map(ConditionKind::Timer)
                .unwrap_or(ConditionKind::InvalidTimer),
            None => ConditionKind::InvalidTimer,
        },
        [first, mode, rest @ ..] if *first == TEXT_KEYWORD => match QueryMode::from_word(mode) {
            Some(mode) => ConditionKind::Text(TextQuery::new(mode, &rest.join(" "))),
            None => ConditionKind::Expression(condition.to_string()),
        },
        _ => ConditionKind::Expression(condition.to_string()),
    }
}

/// Read a positive, finite number of seconds written as a plain decimal number.
fn parse_seconds(text: &str) -> Option<f64> {
    let digits = text.strip_prefix('-').unwrap_or(text);

    let is_decimal = !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().filter(|&c| c == '.').count() <= 1
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.');

    if !is_decimal {
        return None;
    }

    text.parse::<f64>()
        .ok()
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
}
