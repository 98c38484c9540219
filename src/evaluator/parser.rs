use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::EvalError,
    evaluator::{core::EvalResult, lexer::Token},
};

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, addition and subtraction, and
/// recursively descends through the precedence hierarchy.
///
/// Grammar: `expression := term (("+" | "-") term)*`
///
/// # Parameters
/// - `tokens`: Token iterator wrapped in a `Peekable`.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> EvalResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_term(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_term(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right) };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles the left-associative operators `*` and `/`. Percent never reaches
/// this level: the normalization pass has already rewritten it into a
/// division.
///
/// Grammar: `term := factor (("*" | "/") factor)*`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A binary expression tree combining factor-level nodes.
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> EvalResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let mut left = parse_factor(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            let right = parse_factor(tokens)?;
            left = Expr::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right) };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Handles repeated exponentiation with right-associativity:
/// `a ^ b ^ c` parses as `a ^ (b ^ c)`. Right association falls out of
/// recursing on the right-hand side instead of looping.
///
/// Grammar: `factor := unary ("^" factor)?`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_factor<'a, I>(tokens: &mut Peekable<I>) -> EvalResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    let base = parse_unary(tokens)?;

    if let Some(Token::Caret) = tokens.peek() {
        tokens.next();
        let exponent = parse_factor(tokens)?;
        return Ok(Expr::BinaryOp { left:  Box::new(base),
                                   op:    BinaryOperator::Pow,
                                   right: Box::new(exponent) });
    }

    Ok(base)
}

/// Parses a unary expression.
///
/// A single optional `-` prefix negates the atom that follows it.
///
/// Grammar: `unary := "-"? atom`
fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> EvalResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    if let Some(Token::Minus) = tokens.peek() {
        tokens.next();
        let expr = parse_atom(tokens)?;
        return Ok(Expr::UnaryOp { op:   UnaryOperator::Negate,
                                  expr: Box::new(expr) });
    }

    parse_atom(tokens)
}

/// Parses an atomic expression: a number or a parenthesized group.
///
/// Grammar: `atom := NUMBER | "(" expression ")"`
///
/// # Errors
/// - `UnbalancedParentheses` when a group is opened but never closed.
/// - `SyntaxError` when an operand is missing where one is required: two
///   adjacent operators, a trailing operator, or a truncated stream.
fn parse_atom<'a, I>(tokens: &mut Peekable<I>) -> EvalResult<Expr>
    where I: Iterator<Item = &'a Token>
{
    match tokens.next() {
        Some(Token::Number(value)) => Ok(Expr::Number(*value)),

        Some(Token::LParen) => {
            let expr = parse_expression(tokens)?;
            match tokens.next() {
                Some(Token::RParen) => Ok(expr),
                _ => Err(EvalError::UnbalancedParentheses),
            }
        },

        Some(token) => {
            Err(EvalError::SyntaxError { details: format!("expected a value, found {token:?}") })
        },

        None => {
            Err(EvalError::SyntaxError { details: "unexpected end of expression".to_string() })
        },
    }
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `Some(BinaryOperator)` when the token represents one of the
/// binary operators `+`, `-`, `*`, `/` or `^`, and `None` for all other
/// tokens (including `%`, which is rewritten away before parsing).
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token corresponds to a binary operator,
/// otherwise `None`.
///
/// # Example
/// ```
/// use tagcalc::{
///     ast::BinaryOperator,
///     evaluator::{lexer::Token, parser::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Percent), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}
