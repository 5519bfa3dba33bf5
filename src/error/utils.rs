//! Utilities for printing and handling errors.

use std::fmt;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde_support", derive(Deserialize, Serialize))]
/// Information about the origin of an item.
///
/// Parse trees and runtime errors carry this to point back at the story line
/// an item or problem came from.
pub struct MetaData {
    /// Which line in the original story the item originated from (zero-based).
    pub line_index: u32,
}

impl MetaData {
    /// One-based line number, as an author would count it.
    pub fn line(&self) -> u32 {
        self.line_index + 1
    }

    /// Meta data for a line a number of lines further down in the story.
    pub(crate) fn offset(&self, lines: usize) -> Self {
        MetaData {
            line_index: self.line_index + lines as u32,
        }
    }
}

impl From<usize> for MetaData {
    fn from(line_index: usize) -> Self {
        MetaData {
            line_index: line_index as u32,
        }
    }
}

impl fmt::Display for MetaData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}", self.line())
    }
}

/// Write meta data information for a line or piece of content in a story.
pub(crate) fn write_line_information<W: fmt::Write>(
    buffer: &mut W,
    meta_data: &MetaData,
) -> fmt::Result {
    write!(buffer, "(line {}) ", meta_data.line())
}

/// Wrapper to implement From for variants when the variant is simply encapsulated
/// in the enum.
///
/// # Example
/// Running
/// ```ignore
/// impl_from_error![
///     MyError;
///     [Variant, ErrorData]
/// ];
/// ```
/// is identical to running
/// ```ignore
/// impl From<ErrorData> for MyError {
///     fn from(err: ErrorData) -> Self {
///         MyError::Variant(err)
///     }
/// }
/// ```
macro_rules! impl_from_error {
    ($for_type:ident; $([$variant:ident, $from_type:ident]),+) => {
        $(
            impl From<$from_type> for $for_type {
                fn from(err: $from_type) -> Self {
                    $for_type::$variant(err)
                }
            }
        )*
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_information_is_printed_one_based() {
        let mut buffer = String::new();
        write_line_information(&mut buffer, &MetaData::from(4)).unwrap();

        assert_eq!(buffer, "(line 5) ");
    }

    #[test]
    fn offset_meta_data_moves_down_the_story() {
        assert_eq!(MetaData::from(3).offset(2), MetaData::from(5));
    }
}
