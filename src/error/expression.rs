//! Errors from tokenizing and evaluating expressions.

use std::{error::Error, fmt};

#[derive(Clone, Debug, PartialEq)]
/// Error from evaluating a single expression.
pub struct ExpressionError {
    /// Expression as it was given to the evaluator.
    pub expression: String,
    /// Kind of error.
    pub kind: ExpressionErrorKind,
}

#[derive(Clone, Debug, PartialEq)]
/// Variants of expression errors.
pub enum ExpressionErrorKind {
    /// Nothing but whitespace was given.
    Empty,
    /// An opening parenthesis was never closed.
    UnbalancedParentheses,
    /// A parenthesis pair or function call contained nothing.
    EmptyGroup,
    /// A part of the expression matched no registered token.
    UnrecognizedToken { token: String },
    /// An identifier had no value and no default was set.
    UnknownIdentifier { name: String },
    /// An operator was missing the operand on one of its sides.
    MissingOperand { operator: String },
    /// An operator could not be applied to the types of its operands.
    OperatorTypeMismatch { operator: String },
    /// A function could not be applied to the types of its arguments.
    FunctionTypeMismatch { function: String },
    /// No overload of a function takes the given number of arguments.
    WrongArgumentCount { function: String, given: usize },
    /// Division or modulus by zero.
    DivisionByZero { operator: String },
    /// Tokens were left over that could not be combined into a single value.
    MalformedExpression,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Failure from applying an operator or function to its operands.
pub enum ApplyError {
    /// The operands had types this operator or function does not handle.
    TypeMismatch,
    /// The right hand side of a division or modulus was zero.
    DivisionByZero,
}

impl ExpressionError {
    pub(crate) fn new(expression: &str, kind: ExpressionErrorKind) -> Self {
        ExpressionError {
            expression: expression.to_string(),
            kind,
        }
    }
}

impl Error for ExpressionError {}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Could not evaluate expression '{}': {}",
            self.expression, self.kind
        )
    }
}

impl fmt::Display for ExpressionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ExpressionErrorKind::*;

        match self {
            Empty => write!(f, "expression is empty"),
            UnbalancedParentheses => write!(f, "opening parenthesis is never closed"),
            EmptyGroup => write!(f, "found an empty pair of parentheses"),
            UnrecognizedToken { token } => write!(f, "'{}' is not a recognized token", token),
            UnknownIdentifier { name } => write!(f, "identifier '{}' has no value", name),
            MissingOperand { operator } => {
                write!(f, "operator '{}' is missing an operand", operator)
            }
            OperatorTypeMismatch { operator } => write!(
                f,
                "operator '{}' cannot be applied to the given operand types",
                operator
            ),
            FunctionTypeMismatch { function } => write!(
                f,
                "function '{}' cannot be applied to the given argument types",
                function
            ),
            WrongArgumentCount { function, given } => write!(
                f,
                "function '{}' does not take {} argument(s)",
                function, given
            ),
            DivisionByZero { operator } => {
                write!(f, "operator '{}' was given a zero divisor", operator)
            }
            MalformedExpression => write!(f, "expression does not reduce to a single value"),
        }
    }
}
