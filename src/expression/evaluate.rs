//! Evaluate expressions against a table of registered tokens.

use crate::{
    error::{ApplyError, ExpressionError, ExpressionErrorKind},
    expression::{
        builtins::default_tokens,
        token::{Associativity, Function, Identifier, Literal, Operator, Placement, Symbol, Token},
        tokenize::{classify_operators, tokenize},
    },
};

#[derive(Clone, Debug, PartialEq)]
/// Options for how an `Evaluator` treats unclear input.
pub struct EvaluatorOptions {
    /// Treat an opening parenthesis without a matching close as an error.
    ///
    /// If not set the group is closed at the end of the expression.
    pub require_balanced_parentheses: bool,
    /// Read unrecognized text as free identifiers instead of failing.
    pub allow_unknown_identifiers: bool,
    /// Value used for identifiers without a bound value.
    ///
    /// If this is an identifier without a value, free identifiers are kept as they are
    /// and can be inspected by functions. If not set, free identifiers are an error.
    pub unknown_default: Option<Token>,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        EvaluatorOptions {
            require_balanced_parentheses: false,
            allow_unknown_identifiers: true,
            unknown_default: None,
        }
    }
}

#[derive(Clone, Debug)]
/// Expression evaluator with a table of operators, functions and identifiers.
///
/// # Examples
/// ```
/// # use forkling::expression::Evaluator;
/// let evaluator = Evaluator::new();
///
/// assert_eq!(evaluator.evaluate("2^3^2").unwrap(), "512");
/// assert_eq!(evaluator.evaluate("(1 + 2) * 3 >= 9").unwrap(), "true");
/// ```
pub struct Evaluator {
    /// Registered tokens, sorted in reverse lexicographic order of their spelling.
    tokens: Vec<Token>,
    pub options: EvaluatorOptions,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new()
    }
}

impl Evaluator {
    /// Create an evaluator with the default set of tokens.
    pub fn new() -> Self {
        Evaluator::with_options(EvaluatorOptions::default())
    }

    /// Create an evaluator with the default set of tokens and the given options.
    pub fn with_options(options: EvaluatorOptions) -> Self {
        let mut evaluator = Evaluator::empty();
        evaluator.options = options;
        evaluator.reset_tokens();

        evaluator
    }

    /// Create an evaluator without any registered tokens.
    pub fn empty() -> Self {
        Evaluator {
            tokens: Vec::new(),
            options: EvaluatorOptions::default(),
        }
    }

    /// Restore the default set of tokens.
    pub fn reset_tokens(&mut self) {
        self.tokens = default_tokens();
        self.sort_tokens();
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether any registered token is spelled like this.
    pub fn is_registered(&self, spelling: &str) -> bool {
        let spelling = spelling.to_lowercase();

        self.tokens
            .iter()
            .any(|token| token.spelling().as_ref() == Some(&spelling))
    }

    /// Register an operator.
    ///
    /// An operator with the same symbol and placement is replaced.
    pub fn add_operator(&mut self, operator: Operator) {
        self.tokens.retain(|token| match token {
            Token::Operator(other) => {
                !(other.symbol == operator.symbol && other.placement == operator.placement)
            }
            _ => true,
        });

        self.tokens.push(Token::Operator(operator));
        self.sort_tokens();
    }

    /// Register a function.
    ///
    /// Functions may share a name if they take a different number of arguments. A function
    /// with the same name and number of arguments is replaced.
    pub fn add_function(&mut self, function: Function) {
        self.tokens.retain(|token| match token {
            Token::Function(other) => !(other.name == function.name && other.arity == function.arity),
            _ => true,
        });

        self.tokens.push(Token::Function(function));
        self.sort_tokens();
    }

    /// Register an identifier, or bind a new value to one which is registered.
    pub fn add_identifier(&mut self, name: &str, value: Option<Literal>) {
        let name = name.to_lowercase();

        self.tokens.retain(|token| match token {
            Token::Identifier(other) => other.name != name,
            _ => true,
        });

        self.tokens
            .push(Token::Identifier(Identifier { name, value }));
        self.sort_tokens();
    }

    /// Remove all tokens with a spelling. Returns the number of tokens that were removed.
    pub fn remove_token(&mut self, spelling: &str) -> usize {
        let spelling = spelling.to_lowercase();
        let before = self.tokens.len();

        self.tokens
            .retain(|token| token.spelling().as_ref() != Some(&spelling));

        before - self.tokens.len()
    }

    fn sort_tokens(&mut self) {
        self.tokens
            .sort_by(|a, b| b.spelling().cmp(&a.spelling()));
    }

    /// Split an expression into tokens.
    pub fn tokenize(&self, expression: &str) -> Result<Vec<Token>, ExpressionError> {
        tokenize(
            expression,
            &self.tokens,
            self.options.allow_unknown_identifiers,
        )
    }

    /// Evaluate an expression and return the display form of the result.
    pub fn evaluate(&self, expression: &str) -> Result<String, ExpressionError> {
        self.evaluate_to_token(expression)
            .map(|token| format!("{}", token))
    }

    /// Evaluate an expression and return the resulting token.
    pub fn evaluate_to_token(&self, expression: &str) -> Result<Token, ExpressionError> {
        let tokens = self.tokenize(expression)?;

        Evaluation {
            evaluator: self,
            expression,
        }
        .run(tokens)
    }

    /// Evaluate a list of tokens.
    pub fn evaluate_tokens(&self, tokens: Vec<Token>) -> Result<Token, ExpressionError> {
        let expression = tokens
            .iter()
            .map(|token| format!("{}", token))
            .collect::<String>();

        Evaluation {
            evaluator: self,
            expression: &expression,
        }
        .run(tokens)
    }
}

/// Single evaluation of an expression, kept together with its text for error messages.
struct Evaluation<'a> {
    evaluator: &'a Evaluator,
    expression: &'a str,
}

impl<'a> Evaluation<'a> {
    fn error(&self, kind: ExpressionErrorKind) -> ExpressionError {
        ExpressionError::new(self.expression, kind)
    }

    fn run(&self, tokens: Vec<Token>) -> Result<Token, ExpressionError> {
        if tokens.is_empty() {
            return Err(self.error(ExpressionErrorKind::Empty));
        }

        let mut tokens = tokens
            .into_iter()
            .map(|token| self.substitute(token))
            .collect::<Result<Vec<_>, _>>()?;

        loop {
            let close = tokens
                .iter()
                .position(|token| token.is_symbol(Symbol::RightParen));

            let search_until = close.unwrap_or(tokens.len());
            let open = tokens[..search_until]
                .iter()
                .rposition(|token| token.is_symbol(Symbol::LeftParen));

            if (open.is_none() || close.is_none())
                && (open.is_some() || close.is_some())
                && self.evaluator.options.require_balanced_parentheses
            {
                return Err(self.error(ExpressionErrorKind::UnbalancedParentheses));
            }

            let (group_start, group_end, remove_until) = match (open, close) {
                (None, None) => break,
                (Some(open), Some(close)) => (open + 1, close, close + 1),
                (Some(open), None) => (open + 1, tokens.len(), tokens.len()),
                (None, Some(close)) => (0, close, close + 1),
            };

            let function = match open {
                Some(open) if open > 0 => match &tokens[open - 1] {
                    Token::Function(function) => Some(function.clone()),
                    _ => None,
                },
                _ => None,
            };

            let remove_from = match (open, &function) {
                (Some(open), Some(_)) => open - 1,
                (Some(open), None) => open,
                (None, _) => 0,
            };

            if group_start >= group_end {
                return Err(self.error(ExpressionErrorKind::EmptyGroup));
            }

            let group = tokens[group_start..group_end].to_vec();

            let result = match function {
                Some(function) => self.call(&function, group)?,
                None => self.flat(group)?,
            };

            tokens.splice(remove_from..remove_until, std::iter::once(result));
        }

        self.flat(tokens)
    }

    /// Replace identifiers which have values with their literals.
    fn substitute(&self, token: Token) -> Result<Token, ExpressionError> {
        match token {
            Token::Identifier(Identifier {
                value: Some(Literal::Number(value)),
                ..
            }) => Ok(Token::Number(value)),
            Token::Identifier(Identifier {
                value: Some(Literal::Boolean(value)),
                ..
            }) => Ok(Token::Boolean(value)),
            Token::Identifier(identifier) if identifier.value.is_none() => {
                match &self.evaluator.options.unknown_default {
                    Some(Token::Identifier(Identifier { value: None, .. })) => {
                        Ok(Token::Identifier(identifier))
                    }
                    Some(default) => Ok(default.clone()),
                    None => Err(self.error(ExpressionErrorKind::UnknownIdentifier {
                        name: identifier.name,
                    })),
                }
            }
            other => Ok(other),
        }
    }

    /// Call a function with a group of comma separated arguments.
    fn call(&self, function: &Function, group: Vec<Token>) -> Result<Token, ExpressionError> {
        let arguments = group
            .split(|token| token.is_symbol(Symbol::Separator))
            .map(|argument| argument.to_vec())
            .collect::<Vec<_>>();

        let overload = if function.arity == arguments.len() {
            Some(function.clone())
        } else {
            self.evaluator.tokens.iter().find_map(|token| match token {
                Token::Function(other)
                    if other.name == function.name && other.arity == arguments.len() =>
                {
                    Some(other.clone())
                }
                _ => None,
            })
        }
        .ok_or_else(|| {
            self.error(ExpressionErrorKind::WrongArgumentCount {
                function: function.name.clone(),
                given: arguments.len(),
            })
        })?;

        let values = arguments
            .into_iter()
            .map(|argument| {
                if argument.is_empty() {
                    Err(self.error(ExpressionErrorKind::MalformedExpression))
                } else {
                    self.flat(argument)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        overload.apply(&values).map_err(|err| match err {
            ApplyError::TypeMismatch => self.error(ExpressionErrorKind::FunctionTypeMismatch {
                function: overload.name.clone(),
            }),
            ApplyError::DivisionByZero => self.error(ExpressionErrorKind::DivisionByZero {
                operator: overload.name.clone(),
            }),
        })
    }

    /// Evaluate a sequence of tokens without parentheses.
    fn flat(&self, tokens: Vec<Token>) -> Result<Token, ExpressionError> {
        if tokens.is_empty() {
            return Err(self.error(ExpressionErrorKind::EmptyGroup));
        }

        if tokens.iter().any(|token| match token {
            Token::Symbol(_) | Token::Function(_) => true,
            _ => false,
        }) {
            return Err(self.error(ExpressionErrorKind::MalformedExpression));
        }

        let mut tokens = classify_operators(tokens, &self.evaluator.tokens);

        while let Some(precedence) = max_precedence(&tokens) {
            let right_to_left = self.is_right_associative(&tokens, precedence);

            let mut indices = (0..tokens.len())
                .filter(|&i| match &tokens[i] {
                    Token::Operator(operator) => operator.precedence == precedence,
                    _ => false,
                })
                .collect::<Vec<_>>();

            if right_to_left {
                indices.reverse();
            }

            let applicable = indices
                .iter()
                .copied()
                .find(|&i| operands_are_ready(&tokens, i));

            let index = match applicable {
                Some(index) => index,
                None => {
                    let operator = indices
                        .first()
                        .map(|&i| format!("{}", tokens[i]))
                        .unwrap_or_default();

                    return Err(self.error(ExpressionErrorKind::MissingOperand { operator }));
                }
            };

            self.apply_at(&mut tokens, index)?;
        }

        match tokens.as_slice() {
            [token] if token.is_value() => Ok(token.clone()),
            _ => Err(self.error(ExpressionErrorKind::MalformedExpression)),
        }
    }

    /// Whether any operator with this precedence, in the expression or registered, groups
    /// to the right.
    fn is_right_associative(&self, tokens: &[Token], precedence: i32) -> bool {
        tokens
            .iter()
            .chain(self.evaluator.tokens.iter())
            .any(|token| match token {
                Token::Operator(operator) => {
                    operator.precedence == precedence
                        && operator.associativity == Associativity::Right
                }
                _ => false,
            })
    }

    /// Apply the operator at an index and replace it and its operands with the result.
    fn apply_at(&self, tokens: &mut Vec<Token>, index: usize) -> Result<(), ExpressionError> {
        let operator = match &tokens[index] {
            Token::Operator(operator) => operator.clone(),
            _ => return Err(self.error(ExpressionErrorKind::MalformedExpression)),
        };

        let (range, operands) = match operator.placement {
            Placement::Both => (
                index - 1..index + 2,
                vec![tokens[index - 1].clone(), tokens[index + 1].clone()],
            ),
            Placement::Right => (index..index + 2, vec![tokens[index + 1].clone()]),
            Placement::Left => (index - 1..index + 1, vec![tokens[index - 1].clone()]),
        };

        let result = operator.apply(&operands).map_err(|err| match err {
            ApplyError::TypeMismatch => self.error(ExpressionErrorKind::OperatorTypeMismatch {
                operator: operator.symbol.clone(),
            }),
            ApplyError::DivisionByZero => self.error(ExpressionErrorKind::DivisionByZero {
                operator: operator.symbol.clone(),
            }),
        })?;

        tokens.splice(range, std::iter::once(result));

        Ok(())
    }
}

fn max_precedence(tokens: &[Token]) -> Option<i32> {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Operator(operator) => Some(operator.precedence),
            _ => None,
        })
        .max()
}

/// Whether the operator at an index has values on the sides it takes operands from.
fn operands_are_ready(tokens: &[Token], index: usize) -> bool {
    let left_is_value = index > 0 && tokens[index - 1].is_value();
    let right_is_value = tokens.get(index + 1).map(Token::is_value).unwrap_or(false);

    match &tokens[index] {
        Token::Operator(operator) => match operator.placement {
            Placement::Both => left_is_value && right_is_value,
            Placement::Right => right_is_value,
            Placement::Left => left_is_value,
        },
        _ => false,
    }
}
