#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while building or evaluating a
/// formula.
///
/// Every failure is recoverable: builder-time rejections leave the sequence
/// unchanged, and evaluation-time errors leave the sequence intact so the
/// user can correct it and recompute.
pub enum EvalError {
    /// The token stream contains no operands to evaluate.
    EmptyExpression,
    /// Parenthesis depth never returns to zero, or a closing parenthesis
    /// appears with no matching open.
    UnbalancedParentheses,
    /// A division whose denominator is exactly zero.
    DivisionByZero,
    /// An input was rejected before it entered the sequence.
    InvalidToken {
        /// The rejected input.
        token: String,
    },
    /// The token stream violates the expression grammar.
    SyntaxError {
        /// Details about the malformed construct.
        details: String,
    },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyExpression => write!(f, "Error: The expression is empty."),

            Self::UnbalancedParentheses => write!(f, "Error: Parentheses are unbalanced."),

            Self::DivisionByZero => write!(f, "Error: Division by zero."),

            Self::InvalidToken { token } => write!(f, "Error: Invalid token '{token}'."),

            Self::SyntaxError { details } => write!(f, "Error: {details}."),
        }
    }
}

impl std::error::Error for EvalError {}
