//! Utilities for inspecting to-do comments, warnings and errors found in a story.

mod logger;
mod message;

pub use logger::{Logger, LoggerIter};
pub use message::{LogMessage, MessageKind, Warning};
