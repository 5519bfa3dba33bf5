//! Errors from splitting a story into forks and building their conditional trees.

use std::{error::Error, fmt};

use crate::error::utils::{write_line_information, MetaData};

#[derive(Clone, Debug, PartialEq)]
/// Error found while parsing a story.
///
/// Most of these are reported and parsing continues with the rest of the story.
/// Only [`ExtraEndif`][ParseErrorKind::ExtraEndif] abandons the whole parse.
pub struct ParseError {
    /// Kind of error.
    pub kind: ParseErrorKind,
    /// Information about the origin of the line that caused this error.
    pub meta_data: MetaData,
}

#[derive(Clone, Debug, PartialEq)]
/// Variants of parse errors.
pub enum ParseErrorKind {
    /// A fork header had no name after the marker.
    UnnamedFork,
    /// A fork name was used by an earlier fork. The earlier fork is kept.
    DuplicateFork { name: String },
    /// The number of `if` and `endif` markers in a fork differ.
    UnbalancedConditionals {
        fork: String,
        ifs: usize,
        endifs: usize,
    },
    /// More than one conditional marker was found on a single line.
    MultipleMarkersOnLine { fork: String },
    /// An `endif` was found with no open `if` block.
    ExtraEndif { fork: String },
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, meta_data: &MetaData) -> Self {
        ParseError {
            kind,
            meta_data: meta_data.clone(),
        }
    }

    /// Whether this error abandons the whole parse.
    pub fn is_fatal(&self) -> bool {
        match self.kind {
            ParseErrorKind::ExtraEndif { .. } => true,
            _ => false,
        }
    }
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ParseErrorKind::*;

        write_line_information(f, &self.meta_data)?;

        match &self.kind {
            UnnamedFork => write!(f, "Found a fork marker without a fork name"),
            DuplicateFork { name } => write!(
                f,
                "Found duplicate fork '{}': only the first one is used",
                name
            ),
            UnbalancedConditionals { fork, ifs, endifs } => write!(
                f,
                "Fork '{}' has {} 'if' but {} 'endif' markers",
                fork, ifs, endifs
            ),
            MultipleMarkersOnLine { fork } => write!(
                f,
                "Fork '{}' has more than one 'if' or 'endif' on a single line",
                fork
            ),
            ExtraEndif { fork } => write!(
                f,
                "Fork '{}' has an 'endif' without a matching 'if'",
                fork
            ),
        }
    }
}
