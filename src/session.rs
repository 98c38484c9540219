use crate::{
    error::EvalError,
    evaluate_tokens,
    sequence::{Expecting, OperatorSymbol, SequenceBuilder, Tag},
};

/// A selectable operand suggestion offered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// Name shown in the dropdown; becomes the tag title when accepted.
    pub name:     String,
    /// The numeric value the resulting tag carries.
    pub value:    f64,
    /// Grouping label carried over to the tag.
    pub category: String,
}

impl From<Suggestion> for Tag {
    fn from(suggestion: Suggestion) -> Self {
        Self { title:    suggestion.name,
               category: suggestion.category,
               value:    suggestion.value, }
    }
}

/// Read-only provider of tag suggestions.
///
/// The suggestion list and its filtering strategy belong to the host; the
/// core only consumes the result. The customary host behavior is a
/// case-insensitive substring match returning at most five entries, but
/// nothing here depends on it.
pub trait SuggestionSource {
    /// Returns the suggestions matching `query`.
    fn lookup(&self, query: &str) -> Vec<Suggestion>;
}

/// Observable display state of a formula session.
///
/// The session moves `Idle → AwaitingTag ⇄ AwaitingOperator` while the
/// sequence is edited, and lands in `Computed` or `Errored` after a compute
/// trigger. Any further edit leaves the terminal state and clears the
/// displayed outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// The sequence is empty.
    Idle,
    /// The sequence ends on an operator; a tag entry is accepted.
    AwaitingTag,
    /// The sequence ends on a tag; an operator entry or a compute trigger is
    /// accepted.
    AwaitingOperator,
    /// The last compute succeeded; holds the numeric result.
    Computed(f64),
    /// The last compute failed; holds the reported error.
    Errored(EvalError),
}

/// Drives one formula-widget session.
///
/// Owns the sequence builder, the uncommitted free-text entry, and the last
/// compute outcome. All operations are synchronous and immediately
/// observable; the evaluator itself retains nothing between calls.
///
/// ## Example
/// ```
/// use tagcalc::{
///     sequence::Tag,
///     session::{FormulaSession, SessionState},
/// };
///
/// let mut session = FormulaSession::new();
/// assert_eq!(session.state(), SessionState::Idle);
///
/// session.on_add_tag(Tag::new("revenue", "sales", 200.0));
/// session.on_add_operator("*").unwrap();
/// session.on_add_tag(Tag::new("margin", "finance", 10.0));
/// session.on_add_operator("%").unwrap();
///
/// assert_eq!(session.on_compute().unwrap(), 20.0);
/// assert_eq!(session.state(), SessionState::Computed(20.0));
/// ```
#[derive(Debug, Default)]
pub struct FormulaSession {
    builder: SequenceBuilder,
    pending: String,
    outcome: Option<Result<f64, EvalError>>,
}

impl FormulaSession {
    /// Creates a session with an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current display state, derived from the builder and the
    /// retained outcome.
    #[must_use]
    pub fn state(&self) -> SessionState {
        match &self.outcome {
            Some(Ok(value)) => SessionState::Computed(*value),
            Some(Err(error)) => SessionState::Errored(error.clone()),
            None if self.builder.is_empty() => SessionState::Idle,
            None => match self.builder.expecting() {
                Expecting::Tag => SessionState::AwaitingTag,
                Expecting::Operator => SessionState::AwaitingOperator,
            },
        }
    }

    /// Accepts a tag entry.
    ///
    /// Ignored while an operator is expected (the host's suggestion dropdown
    /// is hidden in that state). On acceptance the pending free-text entry
    /// is consumed and any displayed outcome is cleared.
    pub fn on_add_tag(&mut self, tag: Tag) {
        self.outcome = None;

        if self.builder.expecting() != Expecting::Tag {
            return;
        }

        self.builder.add_tag(tag);
        self.pending.clear();
    }

    /// Accepts an operator entry.
    ///
    /// # Errors
    /// Forwards the builder's rejections: [`EvalError::InvalidToken`] for a
    /// symbol outside the accepted set, [`EvalError::SyntaxError`] when no
    /// tag is pending an operator. The sequence is unchanged on error.
    pub fn on_add_operator(&mut self, symbol: &str) -> Result<(), EvalError> {
        self.outcome = None;
        self.builder.add_operator(symbol)?;
        self.pending.clear();
        Ok(())
    }

    /// Handles a Backspace-like event.
    ///
    /// Pending free-text input is consumed first, one character per event,
    /// and the sequence is untouched while any remains. Only with an empty
    /// pending entry does the event remove the last committed element.
    pub fn on_remove_last(&mut self) {
        self.outcome = None;

        if self.pending.pop().is_some() {
            return;
        }

        self.builder.remove_last();
    }

    /// Replaces the value of the tag at `index`.
    ///
    /// # Errors
    /// [`EvalError::InvalidToken`] when the index is out of bounds or the
    /// value is not finite.
    pub fn on_update_tag_value(&mut self, index: usize, value: f64) -> Result<(), EvalError> {
        self.outcome = None;
        self.builder.update_tag(index, value)
    }

    /// Removes the tag at `index` together with its adjacent operator.
    pub fn on_remove_tag(&mut self, index: usize) {
        self.outcome = None;
        self.builder.remove_tag(index);
    }

    /// Evaluates the current sequence.
    ///
    /// A dangling trailing operator is trimmed as part of building the token
    /// stream. The outcome is retained as the display state and returned;
    /// the sequence is left intact so the user can correct it.
    ///
    /// # Errors
    /// Any [`EvalError`] raised while building or evaluating the stream.
    pub fn on_compute(&mut self) -> Result<f64, EvalError> {
        let result = self.builder
                         .token_stream()
                         .and_then(|stream| evaluate_tokens(&stream));
        self.outcome = Some(result.clone());
        result
    }

    /// Replaces the uncommitted free-text entry.
    ///
    /// Typing dismisses a displayed error, but a displayed result stays
    /// visible until the next edit or compute.
    pub fn set_pending(&mut self, text: &str) {
        if matches!(self.outcome, Some(Err(_))) {
            self.outcome = None;
        }
        self.pending = text.to_string();
    }

    /// The uncommitted free-text entry.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// What the sequence will accept next.
    #[must_use]
    pub fn current_expecting(&self) -> Expecting {
        self.builder.expecting()
    }

    /// The tags committed so far, in sequence order.
    #[must_use]
    pub fn current_tags(&self) -> &[Tag] {
        self.builder.tags()
    }

    /// The operator entries committed so far, in gap order.
    #[must_use]
    pub fn current_operators(&self) -> &[OperatorSymbol] {
        self.builder.operators()
    }

    /// Clears the whole session: sequence, pending entry and outcome.
    pub fn reset(&mut self) {
        self.builder.clear();
        self.pending.clear();
        self.outcome = None;
    }
}
