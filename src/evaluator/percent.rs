use crate::{error::EvalError, evaluator::lexer::Token};

/// Rewrites postfix percent tokens into explicit divisions by 100.
///
/// `%` is not modulo in this grammar: `x%` means "x divided by 100". The
/// rewrite runs once, on the raw token stream, before any parsing:
///
/// - `NUMBER %` becomes `( NUMBER / 100 )`.
/// - `) %` wraps the whole parenthesized group: `(2+3)%` becomes
///   `((2+3)/100)`.
/// - A `%` in any other position (start of stream, or directly after an
///   operator) is a syntax error.
///
/// # Errors
/// - `SyntaxError` when a `%` does not follow a value or a closing
///   parenthesis.
/// - `UnbalancedParentheses` when the group preceding a `%` has no matching
///   open parenthesis.
///
/// # Example
/// ```
/// use tagcalc::evaluator::{lexer::Token, percent::rewrite_percent};
///
/// let stream = vec![Token::Number(50.0), Token::Percent];
/// assert_eq!(rewrite_percent(&stream).unwrap(),
///            vec![Token::LParen,
///                 Token::Number(50.0),
///                 Token::Slash,
///                 Token::Number(100.0),
///                 Token::RParen]);
/// ```
pub fn rewrite_percent(tokens: &[Token]) -> Result<Vec<Token>, EvalError> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());

    for token in tokens {
        if !matches!(token, Token::Percent) {
            out.push(token.clone());
            continue;
        }

        match out.last() {
            Some(Token::Number(value)) => {
                let value = *value;
                out.pop();
                out.push(Token::LParen);
                out.push(Token::Number(value));
                out.extend(divisor());
            },

            Some(Token::RParen) => {
                let open = matching_open(&out)?;
                out.insert(open, Token::LParen);
                out.extend(divisor());
            },

            _ => {
                return Err(EvalError::SyntaxError { details:
                               "'%' must follow a value or a closing parenthesis".to_string(), });
            },
        }
    }

    Ok(out)
}

/// The `/ 100 )` suffix appended to a wrapped operand.
fn divisor() -> [Token; 3] {
    [Token::Slash, Token::Number(100.0), Token::RParen]
}

/// Finds the opening parenthesis matching the trailing `)` of `tokens`.
///
/// # Errors
/// `UnbalancedParentheses` when the scan exhausts the stream without closing
/// the group.
fn matching_open(tokens: &[Token]) -> Result<usize, EvalError> {
    let mut depth = 0usize;

    for (index, token) in tokens.iter().enumerate().rev() {
        match token {
            Token::RParen => depth += 1,
            Token::LParen => {
                if depth == 1 {
                    return Ok(index);
                }
                depth = depth.saturating_sub(1);
            },
            _ => {},
        }
    }

    Err(EvalError::UnbalancedParentheses)
}
