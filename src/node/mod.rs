//! Conditional trees of forks.

mod parse;
mod tree;

pub use parse::build_tree;
pub use tree::{NodeId, ParseNode, ParseTree};
