use crate::error::{MetaData, StoryError};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
/// Log message with additional information.
pub struct LogMessage {
    /// Logged message.
    pub message: MessageKind,
    /// Information of where the message originated from.
    pub meta_data: MetaData,
}

impl LogMessage {
    pub(crate) fn with_kind(message: MessageKind, meta_data: &MetaData) -> Self {
        LogMessage {
            message,
            meta_data: meta_data.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Type of log message with content.
pub enum MessageKind {
    /// Todo comment.
    Todo(String),
    /// Non-fatal problem with the story which does not stop it from being played.
    Warning(Warning),
    /// Error which was put in the interpreter's error slot.
    Error(StoryError),
}

#[derive(Clone, Debug, PartialEq)]
/// A detected problem with the story which is not an error.
pub enum Warning {
    /// A header line did not match any known directive.
    UnknownHeaderDirective { line: String },
    /// A fork contained no text at all.
    EmptyFork { name: String },
    /// An option points at a fork which does not exist.
    UnknownOptionTarget { text: String, fork: String },
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match &self.message {
            MessageKind::Todo(_) => "TODO",
            MessageKind::Warning(_) => "WARNING",
            MessageKind::Error(_) => "ERROR",
        };

        write!(f, "[{}] {}: {}", self.meta_data, kind, self.message)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use MessageKind::*;

        match self {
            Todo(comment) => write!(f, "{}", comment),
            Warning(warning) => write!(f, "{}", warning),
            Error(error) => write!(f, "{}", error),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Warning::*;

        match self {
            UnknownHeaderDirective { line } => {
                write!(f, "header line '{}' is not a known directive: ignored", line)
            }
            EmptyFork { name } => write!(f, "fork '{}' has no content", name),
            UnknownOptionTarget { text, fork } => write!(
                f,
                "option '{}' goes to fork '{}' which does not exist",
                text, fork
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_comment_messages_are_printed_with_marker() {
        let message = LogMessage::with_kind(MessageKind::Todo("".to_string()), &MetaData::from(2));

        assert!(format!("{}", message).contains("TODO"));
    }

    #[test]
    fn warning_messages_are_printed_with_marker() {
        let warning = Warning::EmptyFork {
            name: "cellar".to_string(),
        };
        let message = LogMessage::with_kind(MessageKind::Warning(warning), &MetaData::from(2));

        assert_eq!(
            format!("{}", message),
            "[line 3] WARNING: fork 'cellar' has no content"
        );
    }

    #[test]
    fn error_messages_are_printed_with_marker() {
        let error = StoryError::NoForks;
        let message = LogMessage::with_kind(MessageKind::Error(error), &MetaData::from(0));

        assert!(format!("{}", message).starts_with("[line 1] ERROR: "));
    }
}
