/// The lexer module tokenizes plain expression strings.
///
/// It defines the shared [`Token`](lexer::Token) type for the whole
/// evaluation pipeline. Token streams are normally built directly by the
/// sequence builder; the lexer exists so the CLI and tests can phrase
/// expressions as text.
///
/// # Responsibilities
/// - Defines the token enum for operands and the eight operator symbols.
/// - Converts an input character stream into tokens, skipping whitespace.
/// - Reports lexical errors for characters outside the accepted set.
pub mod lexer;
/// Percent normalization.
///
/// Rewrites postfix percent tokens into explicit divisions by 100 before any
/// grammar parsing happens. After this pass no `%` token remains in the
/// stream.
pub mod percent;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes a normalized token stream and constructs an AST with
/// standard arithmetic precedence: parentheses bind tightest, then `^`
/// (right-associative), then `*` and `/`, then `+` and `-`.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes.
/// - Validates the expression grammar, reporting typed errors.
pub mod parser;
/// Core evaluation logic.
///
/// Folds a parsed expression tree into a 64-bit floating point result. The
/// fold is a pure function of its input: it holds no state between calls and
/// reports division by zero as a typed error rather than producing a
/// non-finite number.
pub mod core;
