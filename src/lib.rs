//! Parser and interpreter for branching stories written as forks.
//!
//! A story is plain text divided into named forks. Each fork holds output text, options
//! leading to other forks, variable statements and conditional blocks which can depend
//! on variables, on time passing or on text entered by the player. See the
//! [list of features][crate::docs::features] for the full format.
//!
//! # Playing a story
//!
//! Read the story with [`read_story_from_string`] or an [`Interpreter`], then move it
//! forward by selecting options, submitting text or advancing time. After every step
//! the [`Snapshot`] holds everything needed to draw the story.
//!
//! ```
//! use forkling::{read_story_from_string, Item};
//!
//! let content = "\
//! option-color 0a0
//!
//! @hall
//! {A long hall stretches out in front of you.}
//! Walk to the end@end
//!
//! @end
//! if visited
//!     {You are back at the end of the hall.}
//! endif
//! if !visited
//!     {You reach the end of the hall.}
//! endif
//! ";
//!
//! let mut story = read_story_from_string(content).unwrap();
//!
//! let snapshot = story.snapshot();
//! assert_eq!(snapshot.content[0].text(), "A long hall stretches out in front of you.");
//! assert_eq!(snapshot.options[0].text, "Walk to the end");
//!
//! story.select_option(snapshot.options[0].id).unwrap();
//!
//! let snapshot = story.snapshot();
//! assert_eq!(snapshot.content[0].text(), "You reach the end of the hall.");
//!
//! match &snapshot.log[1] {
//!     Item::Input { text, from_option } => {
//!         assert_eq!(text, "Walk to the end");
//!         assert!(*from_option);
//!     }
//!     _ => unreachable!(),
//! }
//! ```
//!
//! # Errors
//!
//! Mistakes in a story rarely stop it. The offending line or block is skipped, the error
//! is put in the interpreter's error slot and every error is collected in its
//! [`Logger`][crate::log::Logger] together with warnings and to-do comments. Only an
//! `endif` without a matching `if` abandons parsing.
//!
//! # Features
//!
//! `serde_support` derives `Deserialize` and `Serialize` for the story and state types,
//! so that a [`SaveState`] can be stored and restored.

mod consts;
#[macro_use]
pub mod error;
pub mod expression;
pub mod line;
pub mod log;
pub mod node;
pub mod story;

pub mod docs {
    //! Documentation of the story format.

    pub mod features;
}

pub use error::{MetaData, ParseError, ParseErrorKind, StoryError};
pub use story::{
    parse_story, read_story_from_string, Interpreter, Item, OptionId, OptionItem,
    PageDictionary, ParsedStory, RunnerOptions, SaveState, Snapshot, StoryRng, StorySettings,
    TextStyle, ThemeColor, Value, VariableSet,
};
