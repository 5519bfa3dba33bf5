//! Tokens of the expression language.

use crate::error::ApplyError;

use std::{fmt, sync::Arc};

/// Function applied by an operator or function token to its operands.
pub type ApplyFn = Arc<dyn Fn(&[Token]) -> Result<Token, ApplyError> + Send + Sync>;

#[derive(Clone, Debug, PartialEq)]
/// Single token of an expression.
pub enum Token {
    /// Numeric literal.
    Number(f64),
    /// Boolean literal.
    Boolean(bool),
    /// Named value, possibly without a value bound to it.
    Identifier(Identifier),
    /// Operator with its placement, associativity and precedence.
    Operator(Operator),
    /// Function which is called with a parenthesized list of arguments.
    Function(Function),
    /// Parenthesis or argument separator.
    Symbol(Symbol),
}

#[derive(Clone, Debug, PartialEq)]
/// Named value.
///
/// Identifiers which are registered with a number or boolean are replaced by that literal
/// before evaluation. Identifiers without a value are free names.
pub struct Identifier {
    pub name: String,
    pub value: Option<Literal>,
}

#[derive(Clone, Debug, PartialEq)]
/// Value that can be bound to an identifier.
pub enum Literal {
    Number(f64),
    Boolean(bool),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which side of an operator its operands are on.
pub enum Placement {
    /// Single operand to the left, eg. factorial: `3!`.
    Left,
    /// Single operand to the right, eg. negation: `-3`.
    Right,
    /// One operand on each side, eg. addition: `1 + 2`.
    Both,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Grouping of consecutive operators with equal precedence.
pub enum Associativity {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    LeftParen,
    RightParen,
    Separator,
}

#[derive(Clone)]
/// Operator token.
///
/// Operators are applied to their operands only: `[left, right]` for binary operators,
/// `[right]` for prefix operators and `[left]` for postfix operators.
pub struct Operator {
    pub symbol: String,
    pub placement: Placement,
    pub associativity: Associativity,
    /// Higher precedence binds tighter.
    pub precedence: i32,
    apply: ApplyFn,
}

#[derive(Clone)]
/// Function token.
///
/// Several functions may share a name if they take different numbers of arguments.
pub struct Function {
    pub name: String,
    pub arity: usize,
    apply: ApplyFn,
}

impl Operator {
    pub fn new<F>(
        symbol: &str,
        placement: Placement,
        associativity: Associativity,
        precedence: i32,
        apply: F,
    ) -> Self
    where
        F: Fn(&[Token]) -> Result<Token, ApplyError> + Send + Sync + 'static,
    {
        Operator {
            symbol: symbol.to_lowercase(),
            placement,
            associativity,
            precedence,
            apply: Arc::new(apply),
        }
    }

    /// Number of operands the operator is applied to.
    pub fn arity(&self) -> usize {
        match self.placement {
            Placement::Both => 2,
            Placement::Left | Placement::Right => 1,
        }
    }

    pub fn apply(&self, operands: &[Token]) -> Result<Token, ApplyError> {
        (self.apply)(operands)
    }
}

impl Function {
    pub fn new<F>(name: &str, arity: usize, apply: F) -> Self
    where
        F: Fn(&[Token]) -> Result<Token, ApplyError> + Send + Sync + 'static,
    {
        Function {
            name: name.to_lowercase(),
            arity,
            apply: Arc::new(apply),
        }
    }

    pub fn apply(&self, arguments: &[Token]) -> Result<Token, ApplyError> {
        (self.apply)(arguments)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.placement == other.placement
            && self.associativity == other.associativity
            && self.precedence == other.precedence
            && Arc::ptr_eq(&self.apply, &other.apply)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arity == other.arity && Arc::ptr_eq(&self.apply, &other.apply)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Operator")
            .field("symbol", &self.symbol)
            .field("placement", &self.placement)
            .field("associativity", &self.associativity)
            .field("precedence", &self.precedence)
            .finish()
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

impl Symbol {
    pub fn as_char(&self) -> char {
        match self {
            Symbol::LeftParen => '(',
            Symbol::RightParen => ')',
            Symbol::Separator => ',',
        }
    }
}

impl Token {
    /// Spelling of the token as it is matched in an expression.
    ///
    /// Literals have no spelling since they are never registered.
    pub fn spelling(&self) -> Option<String> {
        match self {
            Token::Identifier(identifier) => Some(identifier.name.clone()),
            Token::Operator(operator) => Some(operator.symbol.clone()),
            Token::Function(function) => Some(function.name.clone()),
            Token::Symbol(symbol) => Some(symbol.as_char().to_string()),
            Token::Number(_) | Token::Boolean(_) => None,
        }
    }

    /// Whether the token can be used as an operand.
    pub fn is_value(&self) -> bool {
        match self {
            Token::Number(_) | Token::Boolean(_) | Token::Identifier(_) => true,
            Token::Operator(_) | Token::Function(_) | Token::Symbol(_) => false,
        }
    }

    pub fn identifier(name: &str, value: Option<Literal>) -> Self {
        Token::Identifier(Identifier {
            name: name.to_lowercase(),
            value,
        })
    }

    pub(crate) fn is_symbol(&self, symbol: Symbol) -> bool {
        match self {
            Token::Symbol(other) => *other == symbol,
            _ => false,
        }
    }
}

/// Format a number the way story text shows it.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(value) => write!(f, "{}", format_number(*value)),
            Literal::Boolean(value) => write!(f, "{}", value),
            Literal::Text(text) => write!(f, "{}", text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", format_number(*value)),
            Token::Boolean(value) => write!(f, "{}", value),
            Token::Identifier(identifier) => write!(f, "{}", identifier.name),
            Token::Operator(operator) => write!(f, "{}", operator.symbol),
            Token::Function(function) => write!(f, "{}", function.name),
            Token::Symbol(symbol) => write!(f, "{}", symbol.as_char()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(operands: &[Token]) -> Result<Token, ApplyError> {
        operands.get(0).cloned().ok_or(ApplyError::TypeMismatch)
    }

    #[test]
    fn numbers_are_displayed_without_trailing_zeros() {
        assert_eq!(format!("{}", Token::Number(5.0)), "5");
        assert_eq!(format!("{}", Token::Number(2.5)), "2.5");
        assert_eq!(format!("{}", Token::Number(-0.0)), "0");
    }

    #[test]
    fn operators_with_the_same_function_are_equal() {
        let operator = Operator::new("~", Placement::Right, Associativity::Left, 3, identity);

        assert_eq!(operator.clone(), operator);
    }

    #[test]
    fn operators_with_different_functions_are_not_equal() {
        let one = Operator::new("~", Placement::Right, Associativity::Left, 3, identity);
        let two = Operator::new("~", Placement::Right, Associativity::Left, 3, identity);

        assert_ne!(one, two);
    }

    #[test]
    fn spellings_are_lowercased_on_construction() {
        let function = Function::new("Double", 1, identity);
        assert_eq!(Token::Function(function).spelling().unwrap(), "double");
    }

    #[test]
    fn operator_arity_follows_placement() {
        let prefix = Operator::new("~", Placement::Right, Associativity::Left, 3, identity);
        let binary = Operator::new("~", Placement::Both, Associativity::Left, 3, identity);

        assert_eq!(prefix.arity(), 1);
        assert_eq!(binary.arity(), 2);
    }
}
