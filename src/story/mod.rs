//! Parsing and playing full stories.

mod header;
mod interpreter;
mod pages;
mod parse;
mod rng;
mod schedule;
mod types;

pub use header::{parse_header, HeaderOptions};
pub use interpreter::Interpreter;
pub use pages::PageDictionary;
pub use parse::{parse_story, ParsedStory};
pub use rng::StoryRng;
pub use types::{
    Item, OptionId, OptionItem, RunnerOptions, SaveState, Snapshot, StorySettings, TextStyle,
    ThemeColor, Value, VariableSet,
};

use crate::error::ParseError;

/// Parse a story and start playing it from its first fork.
///
/// Errors which do not stop the parse are put in the interpreter's error slot and logger.
/// An error which abandons the parse is returned.
///
/// # Examples
/// ```
/// # use forkling::read_story_from_string;
/// let content = "\
/// @start
/// {A crow lands on the fence.}
/// ";
///
/// let interpreter = read_story_from_string(content).unwrap();
///
/// assert_eq!(interpreter.snapshot().content[0].text(), "A crow lands on the fence.");
/// ```
pub fn read_story_from_string(content: &str) -> Result<Interpreter, ParseError> {
    let parsed = parse_story(content)?;

    let mut interpreter = Interpreter::new();
    interpreter.start_parsed(parsed, None);

    Ok(interpreter)
}
