//! Errors from parsing and playing stories.

#[macro_use]
pub(crate) mod utils;

mod expression;
mod parse;
mod runtime;

pub use expression::{ApplyError, ExpressionError, ExpressionErrorKind};
pub use parse::{ParseError, ParseErrorKind};
pub use runtime::StoryError;
pub use utils::MetaData;
