//! Default operators, functions and identifiers of the expression language.

use crate::{
    error::ApplyError,
    expression::token::{Associativity, Function, Literal, Operator, Placement, Symbol, Token},
};

use std::f64::consts::PI;

fn numbers(operands: &[Token]) -> Result<Vec<f64>, ApplyError> {
    operands
        .iter()
        .map(|token| match token {
            Token::Number(value) => Ok(*value),
            _ => Err(ApplyError::TypeMismatch),
        })
        .collect()
}

fn booleans(operands: &[Token]) -> Result<Vec<bool>, ApplyError> {
    operands
        .iter()
        .map(|token| match token {
            Token::Boolean(value) => Ok(*value),
            _ => Err(ApplyError::TypeMismatch),
        })
        .collect()
}

fn binary_number<F>(symbol: &str, precedence: i32, op: F) -> Operator
where
    F: Fn(f64, f64) -> Result<f64, ApplyError> + Send + Sync + 'static,
{
    Operator::new(
        symbol,
        Placement::Both,
        Associativity::Left,
        precedence,
        move |operands| match numbers(operands)?.as_slice() {
            [lhs, rhs] => op(*lhs, *rhs).map(Token::Number),
            _ => Err(ApplyError::TypeMismatch),
        },
    )
}

fn comparison<F>(symbol: &str, op: F) -> Operator
where
    F: Fn(f64, f64) -> bool + Send + Sync + 'static,
{
    Operator::new(
        symbol,
        Placement::Both,
        Associativity::Left,
        5,
        move |operands| match numbers(operands)?.as_slice() {
            [lhs, rhs] => Ok(Token::Boolean(op(*lhs, *rhs))),
            _ => Err(ApplyError::TypeMismatch),
        },
    )
}

fn equality(symbol: &str, equal: bool) -> Operator {
    Operator::new(
        symbol,
        Placement::Both,
        Associativity::Left,
        4,
        move |operands| match operands {
            [Token::Number(lhs), Token::Number(rhs)] => Ok(Token::Boolean((lhs == rhs) == equal)),
            [Token::Boolean(lhs), Token::Boolean(rhs)] => {
                Ok(Token::Boolean((lhs == rhs) == equal))
            }
            _ => Err(ApplyError::TypeMismatch),
        },
    )
}

fn logical<F>(symbol: &str, precedence: i32, op: F) -> Operator
where
    F: Fn(bool, bool) -> bool + Send + Sync + 'static,
{
    Operator::new(
        symbol,
        Placement::Both,
        Associativity::Left,
        precedence,
        move |operands| match booleans(operands)?.as_slice() {
            [lhs, rhs] => Ok(Token::Boolean(op(*lhs, *rhs))),
            _ => Err(ApplyError::TypeMismatch),
        },
    )
}

fn unary_function<F>(name: &str, op: F) -> Function
where
    F: Fn(f64) -> f64 + Send + Sync + 'static,
{
    Function::new(name, 1, move |arguments| match numbers(arguments)?.as_slice() {
        [value] => Ok(Token::Number(op(*value))),
        _ => Err(ApplyError::TypeMismatch),
    })
}

pub fn addition() -> Operator {
    binary_number("+", 6, |lhs, rhs| Ok(lhs + rhs))
}

pub fn subtraction() -> Operator {
    binary_number("-", 6, |lhs, rhs| Ok(lhs - rhs))
}

pub fn multiplication() -> Operator {
    binary_number("*", 7, |lhs, rhs| Ok(lhs * rhs))
}

pub fn division() -> Operator {
    binary_number("/", 7, |lhs, rhs| {
        if rhs == 0.0 {
            Err(ApplyError::DivisionByZero)
        } else {
            Ok(lhs / rhs)
        }
    })
}

pub fn modulus() -> Operator {
    binary_number("%", 7, |lhs, rhs| {
        if rhs == 0.0 {
            Err(ApplyError::DivisionByZero)
        } else {
            Ok(lhs % rhs)
        }
    })
}

pub fn power() -> Operator {
    Operator::new(
        "^",
        Placement::Both,
        Associativity::Right,
        8,
        |operands| match numbers(operands)?.as_slice() {
            [base, exponent] => Ok(Token::Number(base.powf(*exponent))),
            _ => Err(ApplyError::TypeMismatch),
        },
    )
}

pub fn negation() -> Operator {
    Operator::new(
        "-",
        Placement::Right,
        Associativity::Right,
        8,
        |operands| match numbers(operands)?.as_slice() {
            [value] => Ok(Token::Number(-value)),
            _ => Err(ApplyError::TypeMismatch),
        },
    )
}

/// Postfix factorial of non-negative integers. Not registered by default.
pub fn factorial() -> Operator {
    Operator::new(
        "!",
        Placement::Left,
        Associativity::Left,
        9,
        |operands| match numbers(operands)?.as_slice() {
            [value] if *value > 170.0 && value.fract() == 0.0 => {
                Ok(Token::Number(f64::INFINITY))
            }
            [value] if *value >= 0.0 && value.fract() == 0.0 => {
                Ok(Token::Number((1..=(*value as u64)).fold(1.0, |acc, n| acc * n as f64)))
            }
            _ => Err(ApplyError::TypeMismatch),
        },
    )
}

pub fn logical_not() -> Operator {
    Operator::new(
        "!",
        Placement::Right,
        Associativity::Left,
        3,
        |operands| match booleans(operands)?.as_slice() {
            [value] => Ok(Token::Boolean(!value)),
            _ => Err(ApplyError::TypeMismatch),
        },
    )
}

/// Round to the nearest integer, halves away from zero.
pub fn round() -> Function {
    unary_function("round", f64::round)
}

/// Round to the nearest multiple of a step. Exact halves go toward zero.
pub fn round_to_step() -> Function {
    Function::new("round", 2, |arguments| match numbers(arguments)?.as_slice() {
        [_, step] if *step == 0.0 => Err(ApplyError::DivisionByZero),
        [value, step] => {
            let quotient = value / step;

            let rounded = if (quotient - quotient.trunc()).abs() == 0.5 {
                quotient.trunc()
            } else {
                quotient.round()
            };

            Ok(Token::Number(rounded * step))
        }
        _ => Err(ApplyError::TypeMismatch),
    })
}

/// Full set of tokens which a new evaluator starts with.
pub fn default_tokens() -> Vec<Token> {
    let operators = vec![
        addition(),
        subtraction(),
        multiplication(),
        division(),
        modulus(),
        power(),
        negation(),
        equality("=", true),
        equality("!=", false),
        comparison(">", |lhs, rhs| lhs > rhs),
        comparison(">=", |lhs, rhs| lhs >= rhs),
        comparison("<", |lhs, rhs| lhs < rhs),
        comparison("<=", |lhs, rhs| lhs <= rhs),
        logical_not(),
        logical("&", 1, |lhs, rhs| lhs && rhs),
        logical("|", 2, |lhs, rhs| lhs || rhs),
    ];

    let functions = vec![
        unary_function("sin", f64::sin),
        unary_function("cos", f64::cos),
        unary_function("tan", f64::tan),
        round(),
        round_to_step(),
    ];

    let identifiers = vec![
        Token::identifier("true", Some(Literal::Boolean(true))),
        Token::identifier("false", Some(Literal::Boolean(false))),
        Token::identifier("pi", Some(Literal::Number(PI))),
    ];

    let symbols = vec![Symbol::LeftParen, Symbol::RightParen, Symbol::Separator];

    operators
        .into_iter()
        .map(Token::Operator)
        .chain(functions.into_iter().map(Token::Function))
        .chain(identifiers)
        .chain(symbols.into_iter().map(Token::Symbol))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_is_an_error() {
        let operands = [Token::Number(5.0), Token::Number(0.0)];

        assert_eq!(division().apply(&operands), Err(ApplyError::DivisionByZero));
        assert_eq!(modulus().apply(&operands), Err(ApplyError::DivisionByZero));
    }

    #[test]
    fn arithmetic_on_booleans_is_a_type_mismatch() {
        let operands = [Token::Boolean(true), Token::Number(1.0)];
        assert_eq!(addition().apply(&operands), Err(ApplyError::TypeMismatch));
    }

    #[test]
    fn equality_compares_numbers_and_booleans_but_not_a_mix() {
        let equal = equality("=", true);

        assert_eq!(
            equal.apply(&[Token::Number(2.0), Token::Number(2.0)]),
            Ok(Token::Boolean(true))
        );
        assert_eq!(
            equal.apply(&[Token::Boolean(true), Token::Boolean(false)]),
            Ok(Token::Boolean(false))
        );
        assert_eq!(
            equal.apply(&[Token::Boolean(true), Token::Number(1.0)]),
            Err(ApplyError::TypeMismatch)
        );
    }

    #[test]
    fn rounding_to_a_step_takes_halves_toward_zero() {
        let round = round_to_step();

        assert_eq!(
            round.apply(&[Token::Number(7.0), Token::Number(2.0)]),
            Ok(Token::Number(6.0))
        );
        assert_eq!(
            round.apply(&[Token::Number(8.0), Token::Number(3.0)]),
            Ok(Token::Number(9.0))
        );
        assert_eq!(
            round.apply(&[Token::Number(-7.0), Token::Number(2.0)]),
            Ok(Token::Number(-6.0))
        );
    }

    #[test]
    fn factorial_only_takes_non_negative_integers() {
        assert_eq!(factorial().apply(&[Token::Number(4.0)]), Ok(Token::Number(24.0)));
        assert_eq!(factorial().apply(&[Token::Number(0.0)]), Ok(Token::Number(1.0)));
        assert_eq!(
            factorial().apply(&[Token::Number(1.5)]),
            Err(ApplyError::TypeMismatch)
        );
    }

    #[test]
    fn default_tokens_contain_both_round_overloads() {
        let rounds = default_tokens()
            .into_iter()
            .filter(|token| match token {
                Token::Function(function) => function.name == "round",
                _ => false,
            })
            .count();

        assert_eq!(rounds, 2);
    }
}
