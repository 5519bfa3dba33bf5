//! Errors from walking a story.

use std::{error::Error, fmt};

use crate::{
    error::{
        expression::ExpressionError,
        parse::ParseError,
        utils::{write_line_information, MetaData},
    },
    story::OptionId,
};

#[derive(Clone, Debug, PartialEq)]
/// Errors from loading or playing a story.
///
/// Nearly all of these are caused by mistakes in the story text. They are put in the
/// interpreter's error slot and the rest of the story keeps running: only the line or
/// block that caused them is skipped.
pub enum StoryError {
    /// Error from parsing the story text.
    Parse(ParseError),
    /// An expression in a statement or condition could not be evaluated.
    Expression {
        statement: String,
        error: ExpressionError,
        meta_data: MetaData,
    },
    /// A story was loaded without any forks.
    NoForks,
    /// Tried to load a fork which does not exist.
    UnknownFork { name: String },
    /// A `goto` statement pointed at a fork which does not exist.
    GotoUnknownFork { name: String, meta_data: MetaData },
    /// Too many `goto` statements were followed while loading a single fork.
    GotoLimit { name: String },
    /// A condition evaluated to something other than `true` or `false`.
    ConditionNotBoolean {
        condition: String,
        result: String,
        meta_data: MetaData,
    },
    /// A `timer is` condition did not have a positive number of seconds.
    InvalidTimer {
        condition: String,
        meta_data: MetaData,
    },
    /// A `text` condition had nothing to compare with.
    EmptyTextQuery {
        condition: String,
        meta_data: MetaData,
    },
    /// An option had a label but no fork to go to.
    OptionWithoutTarget { line: String, meta_data: MetaData },
    /// An option had a fork to go to but no label.
    OptionWithoutText { line: String, meta_data: MetaData },
    /// An inline option pointed at a fork which does not exist.
    InlineOptionUnknownFork { name: String, meta_data: MetaData },
    /// An output block was opened but not closed, or closed without being opened.
    UnmatchedBraces { line: String, meta_data: MetaData },
    /// A `set` statement tried to create a variable with an invalid name.
    InvalidVariableName { name: String, meta_data: MetaData },
    /// A `get` or `set` statement referred to a variable which has not been set.
    UnknownVariable { name: String, meta_data: MetaData },
    /// An assignment evaluated to something which cannot be stored in a variable.
    NotAValue {
        statement: String,
        result: String,
        meta_data: MetaData,
    },
    /// A color was not given as 3 or 6 hexadecimal digits.
    InvalidColor { value: String, meta_data: MetaData },
    /// A font size was not a positive number.
    InvalidFontSize { value: String, meta_data: MetaData },
    /// A line in a fork could not be read as text, option or statement.
    UnexpectedSymbols { line: String, meta_data: MetaData },
    /// An option was selected which is not on the current page.
    InvalidOption { id: OptionId },
    /// Message set from outside of the interpreter.
    Message(String),
}

impl Error for StoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoryError::Parse(err) => Some(err),
            StoryError::Expression { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl_from_error![
    StoryError;
    [Parse, ParseError]
];

impl StoryError {
    /// Information about which line of the story the error came from, if known.
    pub fn meta_data(&self) -> Option<&MetaData> {
        use StoryError::*;

        match self {
            Parse(err) => Some(&err.meta_data),
            Expression { meta_data, .. }
            | GotoUnknownFork { meta_data, .. }
            | ConditionNotBoolean { meta_data, .. }
            | InvalidTimer { meta_data, .. }
            | EmptyTextQuery { meta_data, .. }
            | OptionWithoutTarget { meta_data, .. }
            | OptionWithoutText { meta_data, .. }
            | InlineOptionUnknownFork { meta_data, .. }
            | UnmatchedBraces { meta_data, .. }
            | InvalidVariableName { meta_data, .. }
            | UnknownVariable { meta_data, .. }
            | NotAValue { meta_data, .. }
            | InvalidColor { meta_data, .. }
            | InvalidFontSize { meta_data, .. }
            | UnexpectedSymbols { meta_data, .. } => Some(meta_data),
            NoForks | UnknownFork { .. } | GotoLimit { .. } | InvalidOption { .. } | Message(_) => {
                None
            }
        }
    }
}

impl fmt::Display for StoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use StoryError::*;

        if let Parse(err) = self {
            return write!(f, "{}", err);
        }

        if let Some(meta_data) = self.meta_data() {
            write_line_information(f, meta_data)?;
        }

        match self {
            Parse(_) => Ok(()),
            Expression {
                statement, error, ..
            } => write!(f, "Error in '{}': {}", statement, error.kind),
            NoForks => write!(f, "Story has no forks: add a line starting with '@name'"),
            UnknownFork { name } => write!(f, "Fork '{}' does not exist", name),
            GotoUnknownFork { name, .. } => {
                write!(f, "Cannot go to fork '{}': it does not exist", name)
            }
            GotoLimit { name } => write!(
                f,
                "Stopped at fork '{}': too many 'goto' statements followed in a row",
                name
            ),
            ConditionNotBoolean {
                condition, result, ..
            } => write!(
                f,
                "Condition '{}' gave '{}' instead of true or false",
                condition, result
            ),
            InvalidTimer { condition, .. } => write!(
                f,
                "Timer in '{}' must be a positive number of seconds",
                condition
            ),
            EmptyTextQuery { condition, .. } => {
                write!(f, "Text condition '{}' has nothing to compare with", condition)
            }
            OptionWithoutTarget { line, .. } => {
                write!(f, "Option '{}' does not name a fork to go to", line)
            }
            OptionWithoutText { line, .. } => write!(f, "Option '{}' has no text", line),
            InlineOptionUnknownFork { name, .. } => {
                write!(f, "Inline option goes to fork '{}' which does not exist", name)
            }
            UnmatchedBraces { line, .. } => write!(f, "Unmatched braces in '{}'", line),
            InvalidVariableName { name, .. } => write!(
                f,
                "'{}' cannot be used as a variable name: use letters, digits and '_', \
                 do not start with a digit and do not reuse an operator or function name",
                name
            ),
            UnknownVariable { name, .. } => write!(f, "Variable '{}' has not been set", name),
            NotAValue {
                statement, result, ..
            } => write!(
                f,
                "'{}' gave '{}' which is not a number or boolean",
                statement, result
            ),
            InvalidColor { value, .. } => write!(
                f,
                "'{}' is not a color: use 3 or 6 hexadecimal digits",
                value
            ),
            InvalidFontSize { value, .. } => {
                write!(f, "'{}' is not a valid font size", value)
            }
            UnexpectedSymbols { line, .. } => write!(f, "Unexpected symbols in '{}'", line),
            InvalidOption { id } => write!(f, "Option {} is not on the current page", id),
            Message(message) => write!(f, "{}", message),
        }
    }
}
