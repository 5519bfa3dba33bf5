//! Reading single lines of fork text: statements, conditions and escapes.

mod condition;
mod escape;
mod kind;
pub(crate) mod scan;

pub use condition::{parse_condition, ConditionKind, QueryMode, TextQuery};
pub use escape::unescape;
pub use kind::{parse_line_kind, LineKind, OptionLine};
