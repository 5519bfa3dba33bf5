//! Split expression text into tokens.

use crate::{
    error::{ExpressionError, ExpressionErrorKind},
    expression::token::{Identifier, Placement, Symbol, Token},
};

/// Piece of an expression matched during the scan, with the characters it covers.
struct Piece {
    kind: PieceKind,
    start: usize,
    end: usize,
}

enum PieceKind {
    Registered(Token),
    Number(f64),
    Unknown,
}

impl Piece {
    /// Whether the piece can be merged with its neighbours into a single identifier.
    fn is_mergeable(&self) -> bool {
        match &self.kind {
            PieceKind::Registered(Token::Operator(_)) | PieceKind::Registered(Token::Symbol(_)) => {
                false
            }
            _ => true,
        }
    }

    fn is_number(&self) -> bool {
        match self.kind {
            PieceKind::Number(_) => true,
            _ => false,
        }
    }
}

/// Tokenize an expression against a table of registered tokens.
///
/// Whitespace is removed and the expression is lowercased before it is scanned. At every
/// position the longest registered spelling is matched, unless a numeric literal at the
/// same position is at least as long. Characters matching nothing become free identifiers
/// if `allow_unknown` is set.
pub fn tokenize(
    expression: &str,
    table: &[Token],
    allow_unknown: bool,
) -> Result<Vec<Token>, ExpressionError> {
    let chars = expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect::<Vec<_>>();

    if chars.is_empty() {
        return Err(ExpressionError::new(expression, ExpressionErrorKind::Empty));
    }

    let spellings = table
        .iter()
        .map(|token| token.spelling().map(|s| s.chars().collect::<Vec<_>>()))
        .collect::<Vec<_>>();

    let mut pieces: Vec<Piece> = Vec::new();
    let mut index = 0;

    while index < chars.len() {
        let registered_length = longest_registered_match(&chars[index..], &spellings);
        let number_length = number_literal_length(&chars[index..]);

        if number_length > 0 && number_length >= registered_length {
            let end = index + number_length;
            let text = chars[index..end].iter().collect::<String>();

            let value = text.parse::<f64>().map_err(|_| {
                ExpressionError::new(
                    expression,
                    ExpressionErrorKind::UnrecognizedToken { token: text.clone() },
                )
            })?;

            pieces.push(Piece {
                kind: PieceKind::Number(value),
                start: index,
                end,
            });

            index = end;
        } else if registered_length > 0 {
            let end = index + registered_length;
            let expects_operand = expects_operand_after(pieces.last());
            let token = pick_registered(&chars[index..end], table, &spellings, expects_operand)
                .ok_or_else(|| {
                    ExpressionError::new(
                        expression,
                        ExpressionErrorKind::UnrecognizedToken {
                            token: chars[index..end].iter().collect(),
                        },
                    )
                })?;

            pieces.push(Piece {
                kind: PieceKind::Registered(token),
                start: index,
                end,
            });

            index = end;
        } else if allow_unknown {
            pieces.push(Piece {
                kind: PieceKind::Unknown,
                start: index,
                end: index + 1,
            });

            index += 1;
        } else {
            return Err(ExpressionError::new(
                expression,
                ExpressionErrorKind::UnrecognizedToken {
                    token: chars[index].to_string(),
                },
            ));
        }
    }

    let tokens = merge_unknown_runs(pieces, &chars, expression, allow_unknown)?;

    Ok(classify_operators(tokens, table))
}

/// Length of the longest registered spelling at the start of the text.
///
/// The candidate keeps growing while some spelling could still match it. When it can
/// no longer grow, the scan falls back to the longest candidate which was an exact match.
fn longest_registered_match(text: &[char], spellings: &[Option<Vec<char>>]) -> usize {
    let mut best = 0;

    for length in 1..=text.len() {
        let candidate = &text[..length];
        let mut any_prefix = false;

        for spelling in spellings.iter().filter_map(|s| s.as_ref()) {
            if spelling.starts_with(candidate) {
                any_prefix = true;

                if spelling.len() == length {
                    best = length;
                }
            }
        }

        if !any_prefix {
            break;
        }
    }

    best
}

/// Length of a decimal literal (`12`, `1.5`, `3.`, `.25`) at the start of the text.
fn number_literal_length(text: &[char]) -> usize {
    let leading = text.iter().take_while(|c| c.is_ascii_digit()).count();

    if text.get(leading) == Some(&'.') {
        let trailing = text[leading + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();

        if leading + trailing > 0 {
            return leading + 1 + trailing;
        }
    }

    leading
}

/// Whether the next token in an expression must be an operand.
fn expects_operand_after(previous: Option<&Piece>) -> bool {
    match previous.map(|piece| &piece.kind) {
        None => true,
        Some(PieceKind::Registered(token)) => token_expects_operand(Some(token)),
        Some(_) => false,
    }
}

pub(crate) fn token_expects_operand(previous: Option<&Token>) -> bool {
    match previous {
        None => true,
        Some(Token::Operator(operator)) => operator.placement != Placement::Left,
        Some(Token::Function(_)) => true,
        Some(Token::Symbol(Symbol::LeftParen)) | Some(Token::Symbol(Symbol::Separator)) => true,
        Some(_) => false,
    }
}

/// Select which of the registered tokens with a spelling to use.
fn pick_registered(
    spelling: &[char],
    table: &[Token],
    spellings: &[Option<Vec<char>>],
    expects_operand: bool,
) -> Option<Token> {
    let candidates = table
        .iter()
        .zip(spellings)
        .filter(|(_, s)| s.as_ref().map(|s| s.as_slice() == spelling).unwrap_or(false))
        .map(|(token, _)| token)
        .collect::<Vec<_>>();

    let operator_with = |placement: Placement| {
        candidates.iter().find(|token| match token {
            Token::Operator(operator) => operator.placement == placement,
            _ => false,
        })
    };

    let preferred = if expects_operand {
        operator_with(Placement::Right)
    } else {
        operator_with(Placement::Both).or_else(|| operator_with(Placement::Left))
    };

    preferred
        .or_else(|| candidates.first())
        .map(|token| (*token).clone())
}

/// Merge runs of adjacent non-operator tokens into single free identifiers.
///
/// This keeps an unknown name such as `pilot` from being read as `pi` followed by `lot`.
/// Runs which start with a number are left alone, so that `2x` stays a number and a name.
fn merge_unknown_runs(
    pieces: Vec<Piece>,
    chars: &[char],
    expression: &str,
    allow_unknown: bool,
) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::with_capacity(pieces.len());
    let mut iter = pieces.into_iter().peekable();

    while let Some(piece) = iter.next() {
        if piece.is_mergeable() && !piece.is_number() {
            let start = piece.start;
            let mut end = piece.end;
            let mut count = 1;

            let mut last = piece;

            while let Some(next) = iter.peek() {
                if !next.is_mergeable() {
                    break;
                }

                end = next.end;
                count += 1;

                if let Some(next) = iter.next() {
                    last = next;
                }
            }

            if count == 1 {
                tokens.push(piece_to_token(last, chars));
            } else {
                let name = chars[start..end].iter().collect::<String>();

                if !allow_unknown {
                    return Err(ExpressionError::new(
                        expression,
                        ExpressionErrorKind::UnrecognizedToken { token: name },
                    ));
                }

                tokens.push(Token::Identifier(Identifier { name, value: None }));
            }
        } else {
            tokens.push(piece_to_token(piece, chars));
        }
    }

    Ok(tokens)
}

fn piece_to_token(piece: Piece, chars: &[char]) -> Token {
    match piece.kind {
        PieceKind::Registered(token) => token,
        PieceKind::Number(value) => Token::Number(value),
        PieceKind::Unknown => Token::Identifier(Identifier {
            name: chars[piece.start..piece.end].iter().collect(),
            value: None,
        }),
    }
}

/// Choose between the prefix and binary variants of operators by their position.
///
/// An operator is read as its prefix variant where an operand is expected: at the start
/// of the expression, after an opening parenthesis or separator, after a function name
/// and after another binary or prefix operator. Everywhere else the binary (or postfix)
/// variant is used. Operators without the needed variant are kept as they are.
pub fn classify_operators(tokens: Vec<Token>, table: &[Token]) -> Vec<Token> {
    let mut classified: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        let token = match token {
            Token::Operator(operator) => {
                let expects_operand = token_expects_operand(classified.last());

                let wanted = |placement: Placement| {
                    table.iter().find_map(|candidate| match candidate {
                        Token::Operator(other)
                            if other.symbol == operator.symbol && other.placement == placement =>
                        {
                            Some(other.clone())
                        }
                        _ => None,
                    })
                };

                let replacement = if expects_operand && operator.placement != Placement::Right {
                    wanted(Placement::Right)
                } else if !expects_operand && operator.placement == Placement::Right {
                    wanted(Placement::Both).or_else(|| wanted(Placement::Left))
                } else {
                    None
                };

                Token::Operator(replacement.unwrap_or(operator))
            }
            other => other,
        };

        classified.push(token);
    }

    classified
}
