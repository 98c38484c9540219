//! # tagcalc
//!
//! tagcalc builds arithmetic formulas from named "tags" (operands with a
//! numeric value) and operator symbols, then evaluates them safely. The
//! sequence builder enforces strict alternation between tag and operator
//! entries; the evaluator parses the resulting token stream with a fixed
//! grammar and standard precedence instead of executing it as code, and
//! reports typed errors for malformed input.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use logos::Logos;

use crate::evaluator::{
    core::eval_expr,
    lexer::Token,
    parser::parse_expression,
    percent::rewrite_percent,
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the operator types that
/// represent a formula as a tree. The tree is built by the parser and folded
/// to a number by the evaluator.
///
/// # Responsibilities
/// - Defines expression node types for operands, negation, and binary
///   arithmetic.
/// - Keeps the evaluator independent of token-stream details.
pub mod ast;
/// Provides the unified error type for building and evaluation.
///
/// This module defines every failure the crate can report: rejected inputs,
/// empty or malformed expressions, unbalanced parentheses, and division by
/// zero. All failures are typed and recoverable.
///
/// # Responsibilities
/// - Defines the `EvalError` enum covering all failure modes.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the evaluation pipeline.
///
/// This module ties together tokenization, percent normalization, parsing,
/// and AST folding. The pipeline is stateless: it is a pure function of the
/// token stream it is handed.
///
/// # Responsibilities
/// - Coordinates lexer, percent rewrite, parser, and fold.
/// - Exposes the token type shared with the sequence builder.
pub mod evaluator;
/// Owns the alternating tag/operator sequence.
///
/// This module defines the tags, operator symbols, and the builder that
/// maintains the alternation invariant and renders the sequence into a token
/// stream for the evaluator.
///
/// # Responsibilities
/// - Enforces the alternation invariant across all mutations.
/// - Validates operator entries against the accepted symbol set.
/// - Renders the interleaved, trimmed token stream.
pub mod sequence;
/// Drives one formula-widget session.
///
/// This module implements the host-facing state machine: tag and operator
/// events, backspace handling with pending-input precedence, compute
/// triggers, and the suggestion collaborator interface.
///
/// # Responsibilities
/// - Derives the display state from the sequence and the last outcome.
/// - Guards builder preconditions for host events.
/// - Defines the read-only suggestion interface the host implements.
pub mod session;

/// Evaluates a pre-built token stream.
///
/// This is the evaluator's entry point: percent tokens are normalized, the
/// stream is parsed with standard precedence (`^` right-associative, then
/// `*` and `/`, then `+` and `-`, parentheses innermost-first), and the tree
/// is folded to a number. The call is pure; nothing is retained between
/// invocations.
///
/// # Errors
/// Returns an error if the stream holds no operands, the parentheses do not
/// balance, the grammar is violated, or a division by exact zero occurs.
///
/// # Examples
/// ```
/// use tagcalc::{evaluate_tokens, evaluator::lexer::Token};
///
/// let stream = vec![Token::Number(3.0), Token::Plus, Token::Number(4.0)];
/// assert_eq!(evaluate_tokens(&stream).unwrap(), 7.0);
/// ```
pub fn evaluate_tokens(tokens: &[Token]) -> Result<f64, error::EvalError> {
    if !tokens.iter().any(|token| matches!(token, Token::Number(_))) {
        return Err(error::EvalError::EmptyExpression);
    }

    let rewritten = rewrite_percent(tokens)?;

    let mut iter = rewritten.iter().peekable();
    let expr = parse_expression(&mut iter)?;

    match iter.next() {
        None => eval_expr(&expr),
        Some(Token::RParen) => Err(error::EvalError::UnbalancedParentheses),
        Some(token) => {
            Err(error::EvalError::SyntaxError { details:
                    format!("unexpected trailing token {token:?}"), })
        },
    }
}

/// Evaluates a plain expression string.
///
/// The string is tokenized first and then handed to [`evaluate_tokens`].
/// This front-end exists for the CLI and for tests; the sequence builder
/// produces token streams directly and never goes through it.
///
/// # Errors
/// Returns [`error::EvalError::InvalidToken`] for characters outside the
/// accepted set, and any error [`evaluate_tokens`] reports.
///
/// # Examples
/// ```
/// use tagcalc::evaluate;
///
/// assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
/// assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
/// assert_eq!(evaluate("200*10%").unwrap(), 20.0);
///
/// // Malformed input is a typed error, never a crash.
/// assert!(evaluate("5/0").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<f64, error::EvalError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push(tok);
        } else {
            let slice = lexer.slice();
            return Err(error::EvalError::InvalidToken { token: slice.to_string() });
        }
    }

    evaluate_tokens(&tokens)
}
