use crate::{
    consts::TODO_COMMENT_MARKER,
    error::{MetaData, StoryError},
    log::{LogMessage, MessageKind, Warning},
};

use std::{iter::Peekable, slice::Iter};

#[derive(Clone, Debug, Default)]
/// Collection of diagnostics found while parsing and playing a story.
pub struct Logger {
    /// To-do comments.
    pub todo_comments: Vec<LogMessage>,
    /// Non-fatal problems with the story.
    pub warnings: Vec<LogMessage>,
    /// Every error that was reported, in the order they were reported.
    pub errors: Vec<LogMessage>,
}

impl Logger {
    pub(crate) fn add_todo(&mut self, comment: &str, meta_data: &MetaData) {
        let without_marker = comment
            .trim_start()
            .trim_start_matches(TODO_COMMENT_MARKER)
            .trim_start_matches(':')
            .trim();

        let message = MessageKind::Todo(without_marker.to_string());

        self.todo_comments
            .push(LogMessage::with_kind(message, meta_data));
    }

    pub(crate) fn add_warning(&mut self, warning: Warning, meta_data: &MetaData) {
        self.warnings.push(LogMessage::with_kind(
            MessageKind::Warning(warning),
            meta_data,
        ));
    }

    pub(crate) fn add_error(&mut self, error: StoryError) {
        let meta_data = error.meta_data().cloned().unwrap_or_default();

        self.errors
            .push(LogMessage::with_kind(MessageKind::Error(error), &meta_data));
    }

    /// Append all messages from another logger.
    pub(crate) fn extend(&mut self, other: Logger) {
        self.todo_comments.extend(other.todo_comments);
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
    }

    /// Whether nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.todo_comments.is_empty() && self.warnings.is_empty() && self.errors.is_empty()
    }
}

impl Logger {
    /// Create an iterator over the log items.
    ///
    /// The iterator visits the messages in the order of their line numbers. Messages
    /// from the same line are given as to-do comments first, then warnings, then errors.
    pub fn iter(&self) -> LoggerIter {
        LoggerIter {
            todo_comments: self.todo_comments.iter().peekable(),
            warnings: self.warnings.iter().peekable(),
            errors: self.errors.iter().peekable(),
        }
    }
}

pub struct LoggerIter<'a> {
    todo_comments: Peekable<Iter<'a, LogMessage>>,
    warnings: Peekable<Iter<'a, LogMessage>>,
    errors: Peekable<Iter<'a, LogMessage>>,
}

impl<'a> Iterator for LoggerIter<'a> {
    type Item = &'a LogMessage;

    fn next(&mut self) -> Option<Self::Item> {
        let line_of = |message: Option<&&LogMessage>| message.map(|msg| msg.meta_data.line());

        let candidates = [
            line_of(self.todo_comments.peek()),
            line_of(self.warnings.peek()),
            line_of(self.errors.peek()),
        ];

        let (index, _) = candidates
            .iter()
            .enumerate()
            .filter_map(|(i, line)| line.map(|line| (i, line)))
            .min_by_key(|&(i, line)| (line, i))?;

        match index {
            0 => self.todo_comments.next(),
            1 => self.warnings.next(),
            _ => self.errors.next(),
        }
    }
}
