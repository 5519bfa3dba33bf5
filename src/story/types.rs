//! Data types of a story and of what the interpreter renders.

use crate::{
    expression::{format_number, Literal, Token},
    story::rng::StoryRng,
};

use std::{collections::HashMap, fmt};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Variables of a story, by lowercased name.
pub type VariableSet = HashMap<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Value of a story variable.
pub enum Value {
    Number(f64),
    Boolean(bool),
}

impl Value {
    /// Read a value from an evaluated token. Only numbers and booleans are values.
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Number(number) => Some(Value::Number(*number)),
            Token::Boolean(boolean) => Some(Value::Boolean(*boolean)),
            _ => None,
        }
    }

    pub(crate) fn as_literal(&self) -> Literal {
        match self {
            Value::Number(number) => Literal::Number(*number),
            Value::Boolean(boolean) => Literal::Boolean(*boolean),
        }
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Value::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Value::Number(number as f64)
    }
}

impl From<bool> for Value {
    fn from(boolean: bool) -> Self {
        Value::Boolean(boolean)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{}", format_number(*number)),
            Value::Boolean(boolean) => write!(f, "{}", boolean),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Color with separate values for light and dark themes.
///
/// Colors are kept as hexadecimal digits without a leading `#`.
pub struct ThemeColor {
    pub light: Option<String>,
    pub dark: Option<String>,
}

impl ThemeColor {
    /// Same color for both themes.
    pub fn unified(color: &str) -> Self {
        ThemeColor {
            light: Some(color.to_string()),
            dark: Some(color.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Style to render text with.
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub color: ThemeColor,
    pub font_size: Option<f64>,
    pub font: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Identifier of an option on the current page.
pub struct OptionId(pub usize);

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Link to another fork.
pub struct OptionItem {
    /// Identifier to select the option with.
    pub id: OptionId,
    /// Text to display.
    pub text: String,
    /// Normalized name of the fork the option goes to.
    pub fork: String,
    /// Whether the option is shown inline with the page content.
    pub inline: bool,
    pub style: TextStyle,
    /// Style of the option when it is highlighted.
    pub highlight_style: TextStyle,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Single renderable item of a page.
pub enum Item {
    /// Output text from the story.
    Output { text: String, style: TextStyle },
    /// Text entered by the player, or the text of a selected option.
    Input { text: String, from_option: bool },
    /// Option shown as a link.
    Option(OptionItem),
}

impl Item {
    /// Text of the item as it would be displayed.
    pub fn text(&self) -> &str {
        match self {
            Item::Output { text, .. } | Item::Input { text, .. } => text,
            Item::Option(option) => &option.text,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Everything a presentation layer needs to draw the story.
pub struct Snapshot {
    /// Items of previous pages.
    pub log: Vec<Item>,
    /// Items of the current page, including inline options.
    pub content: Vec<Item>,
    /// Options listed below the current page.
    pub options: Vec<OptionItem>,
    /// Whether the player can enter text.
    pub textbox_visible: bool,
    /// Whether a link to restart the story should be shown.
    pub show_restart: bool,
    /// Current error, or an empty string if there is none.
    pub error_message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Options for how the interpreter runs a story.
pub struct RunnerOptions {
    /// Do not keep previous pages in the log.
    pub hide_log: bool,
    /// Maximum number of items to keep in the log. The newest items are kept.
    pub log_limit: Option<usize>,
    /// Seed for the random number stream. Drawn from entropy if not set.
    pub random_seed: Option<u64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Story wide settings read from the header.
pub struct StorySettings {
    /// Inline options are displayed as plain text instead of links.
    pub discrete_inline_links: bool,
    /// Never show the restart link.
    pub hide_restart_link: bool,
    pub background_color: ThemeColor,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// State needed to continue a story later.
pub struct SaveState {
    /// Fork which was being visited.
    pub fork: String,
    /// Variables as they were when the fork was entered.
    pub variables: VariableSet,
    pub rng: StoryRng,
}
