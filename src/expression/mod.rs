//! Expression language used by conditions and assignments.
//!
//! Expressions are written in infix notation over numbers, booleans and identifiers.
//! The [`Evaluator`] holds a table of operators, functions and identifiers which can be
//! extended before an expression is evaluated.

pub mod builtins;
mod evaluate;
mod token;
mod tokenize;

pub use evaluate::{Evaluator, EvaluatorOptions};
pub use token::{
    format_number, ApplyFn, Associativity, Function, Identifier, Literal, Operator, Placement,
    Symbol, Token,
};
