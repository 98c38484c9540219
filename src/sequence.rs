use crate::{error::EvalError, evaluator::lexer::Token};

/// A named operand with a numeric value.
///
/// Tags are created when the host accepts a suggestion or the user confirms
/// a numeric entry, and they can be edited in place afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Display name of the operand.
    pub title:    String,
    /// Grouping label shown alongside the title.
    pub category: String,
    /// The numeric value the operand contributes to the expression.
    pub value:    f64,
}

impl Tag {
    /// Creates a new tag.
    #[must_use]
    pub fn new(title: &str, category: &str, value: f64) -> Self {
        Self { title:    title.to_string(),
               category: category.to_string(),
               value }
    }
}

/// A single operator symbol accepted between tags.
///
/// The set is closed: anything outside it is rejected with
/// [`EvalError::InvalidToken`] at parse time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OperatorSymbol {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl OperatorSymbol {
    /// Returns the character the symbol is entered and displayed as.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::LParen => "(",
            Self::RParen => ")",
        }
    }

    /// Converts the symbol into its evaluator token.
    #[must_use]
    pub const fn token(self) -> Token {
        match self {
            Self::Plus => Token::Plus,
            Self::Minus => Token::Minus,
            Self::Star => Token::Star,
            Self::Slash => Token::Slash,
            Self::Percent => Token::Percent,
            Self::Caret => Token::Caret,
            Self::LParen => Token::LParen,
            Self::RParen => Token::RParen,
        }
    }

    /// Whether a dangling occurrence of this symbol at the end of a token
    /// stream is dropped before evaluation.
    ///
    /// The binary operators and `(` leave the expression waiting for an
    /// operand, so a trailing one is ignored. A trailing `%` is a meaningful
    /// postfix ("divide by 100") and a trailing `)` closes a group; both are
    /// kept.
    #[must_use]
    pub const fn is_trimmable(self) -> bool {
        matches!(self,
                 Self::Plus | Self::Minus | Self::Star | Self::Slash | Self::Caret | Self::LParen)
    }
}

impl std::fmt::Display for OperatorSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OperatorSymbol {
    type Err = EvalError;

    /// Parses a host-supplied operator entry.
    ///
    /// ## Example
    /// ```
    /// use tagcalc::sequence::OperatorSymbol;
    ///
    /// assert_eq!("+".parse::<OperatorSymbol>().unwrap(), OperatorSymbol::Plus);
    /// assert!("&".parse::<OperatorSymbol>().is_err());
    /// assert!("**".parse::<OperatorSymbol>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Plus),
            "-" => Ok(Self::Minus),
            "*" => Ok(Self::Star),
            "/" => Ok(Self::Slash),
            "%" => Ok(Self::Percent),
            "^" => Ok(Self::Caret),
            "(" => Ok(Self::LParen),
            ")" => Ok(Self::RParen),
            _ => Err(EvalError::InvalidToken { token: s.to_string() }),
        }
    }
}

/// What the builder will accept next.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Expecting {
    /// The sequence is empty or ends on an operator; a tag comes next.
    Tag,
    /// The sequence ends on a tag; an operator comes next.
    Operator,
}

/// Owns the tag and operator lists for one formula session.
///
/// The two lists always satisfy the alternation invariant
/// `operators.len() == tags.len()` (an operator is pending its next tag) or
/// `operators.len() == tags.len() - 1` (the sequence ends on a tag). Every
/// mutating operation preserves it.
///
/// ## Example
/// ```
/// use tagcalc::{
///     evaluate_tokens,
///     sequence::{SequenceBuilder, Tag},
/// };
///
/// let mut builder = SequenceBuilder::new();
/// builder.add_tag(Tag::new("budget", "finance", 3.0));
/// builder.add_operator("+").unwrap();
/// builder.add_tag(Tag::new("buffer", "finance", 4.0));
///
/// let stream = builder.token_stream().unwrap();
/// assert_eq!(evaluate_tokens(&stream).unwrap(), 7.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequenceBuilder {
    tags:      Vec<Tag>,
    operators: Vec<OperatorSymbol>,
}

impl SequenceBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns what the builder will accept next: `Operator` if a tag is
    /// pending an operator, `Tag` otherwise.
    #[must_use]
    pub fn expecting(&self) -> Expecting {
        if self.tags.len() > self.operators.len() {
            Expecting::Operator
        } else {
            Expecting::Tag
        }
    }

    /// Appends a tag to the sequence.
    ///
    /// Precondition: the builder is expecting a tag (`expecting()` returns
    /// [`Expecting::Tag`]). Callers query `expecting()` first; the session
    /// layer enforces this for host events.
    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Appends an operator entry to the sequence.
    ///
    /// The entry must be a single symbol from `{+, -, *, /, %, ^, (, )}` and
    /// a tag must already be pending an operator.
    ///
    /// # Errors
    /// - [`EvalError::InvalidToken`] when the symbol is outside the accepted
    ///   set (checked for all inputs, whatever the builder state).
    /// - [`EvalError::SyntaxError`] when no tag is pending an operator.
    pub fn add_operator(&mut self, symbol: &str) -> Result<(), EvalError> {
        let symbol = symbol.parse::<OperatorSymbol>()?;

        if self.expecting() != Expecting::Operator {
            return Err(EvalError::SyntaxError { details:
                           "an operator must follow a tag".to_string(), });
        }

        self.operators.push(symbol);
        Ok(())
    }

    /// Removes the most recently committed element.
    ///
    /// Pops the last operator when the sequence ends on one, otherwise the
    /// last tag — what a user expects Backspace to remove. Does nothing on
    /// an empty sequence. The alternation invariant is preserved.
    pub fn remove_last(&mut self) {
        if self.tags.len() == self.operators.len() {
            self.operators.pop();
        } else {
            self.tags.pop();
        }
    }

    /// Removes the tag at `index` together with its adjacent operator.
    ///
    /// The operator in the gap after the tag goes with it; when the last tag
    /// is removed, the operator before it goes instead. Out-of-range indices
    /// are ignored.
    pub fn remove_tag(&mut self, index: usize) {
        if index >= self.tags.len() {
            return;
        }

        self.tags.remove(index);

        if index < self.operators.len() {
            self.operators.remove(index);
        } else {
            self.operators.pop();
        }
    }

    /// Replaces the value of the tag at `index`.
    ///
    /// # Errors
    /// [`EvalError::InvalidToken`] when the index is out of bounds or the
    /// value is not finite.
    pub fn update_tag(&mut self, index: usize, value: f64) -> Result<(), EvalError> {
        if !value.is_finite() {
            return Err(EvalError::InvalidToken { token: value.to_string() });
        }

        match self.tags.get_mut(index) {
            Some(tag) => {
                tag.value = value;
                Ok(())
            },
            None => Err(EvalError::InvalidToken { token: index.to_string() }),
        }
    }

    /// The tags in sequence order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The operator entries in gap order.
    #[must_use]
    pub fn operators(&self) -> &[OperatorSymbol] {
        &self.operators
    }

    /// Whether the sequence holds no elements at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.operators.is_empty()
    }

    /// Resets the sequence for a new formula session.
    pub fn clear(&mut self) {
        self.tags.clear();
        self.operators.clear();
    }

    /// Renders the sequence into the token stream the evaluator consumes.
    ///
    /// Tag values and operator symbols are interleaved in index order. A
    /// dangling trailing operator (one typed with no following tag yet) is
    /// trimmed when it is a binary operator or `(`; a trailing `%` or `)`
    /// is kept. For a complete alternating sequence the result holds
    /// `2 * tags.len() - 1` tokens.
    ///
    /// # Errors
    /// [`EvalError::EmptyExpression`] when the sequence holds no tags.
    pub fn token_stream(&self) -> Result<Vec<Token>, EvalError> {
        if self.tags.is_empty() {
            return Err(EvalError::EmptyExpression);
        }

        let mut stream = Vec::with_capacity(self.tags.len() + self.operators.len());

        for (index, tag) in self.tags.iter().enumerate() {
            stream.push(Token::Number(tag.value));
            if let Some(op) = self.operators.get(index) {
                stream.push(op.token());
            }
        }

        if self.operators.len() == self.tags.len()
           && let Some(op) = self.operators.last()
           && op.is_trimmable()
        {
            stream.pop();
        }

        Ok(stream)
    }
}
