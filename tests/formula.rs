use tagcalc::{
    error::EvalError,
    evaluate, evaluate_tokens,
    evaluator::lexer::Token,
    sequence::{Expecting, SequenceBuilder, Tag},
    session::{FormulaSession, SessionState, Suggestion, SuggestionSource},
};

fn assert_value(source: &str, expected: f64) {
    match evaluate(source) {
        Ok(value) => {
            assert!((value - expected).abs() < 1e-12,
                    "'{source}' evaluated to {value}, expected {expected}")
        },
        Err(e) => panic!("'{source}' failed: {e}"),
    }
}

fn tag(value: f64) -> Tag {
    Tag::new("metric", "demo", value)
}

#[test]
fn precedence_and_associativity() {
    assert_value("2+3*4", 14.0);
    assert_value("(2+3)*4", 20.0);
    assert_value("2^3^2", 512.0);
    assert_value("100-10-20", 70.0);
    assert_value("2*3^2", 18.0);
    assert_value("20/2/5", 2.0);
}

#[test]
fn percent_is_divide_by_hundred() {
    assert_value("50%", 0.5);
    assert_value("200*10%", 20.0);
    assert_value("(2+3)%", 0.05);
    assert_value("50%%", 0.005);
}

#[test]
fn unary_minus() {
    assert_value("-5+10", 5.0);
    assert_value("2--3", 5.0);
    assert_value("-(2+3)", -5.0);
    assert_value("2^-3", 0.125);
    assert_value("-2^2", 4.0);
}

#[test]
fn division_by_zero_is_typed() {
    assert!(matches!(evaluate("5/0"), Err(EvalError::DivisionByZero)));
    assert!(matches!(evaluate("1/(3-3)"), Err(EvalError::DivisionByZero)));
}

#[test]
fn empty_and_invalid_input() {
    assert!(matches!(evaluate(""), Err(EvalError::EmptyExpression)));
    assert!(matches!(evaluate("()"), Err(EvalError::EmptyExpression)));
    assert!(matches!(evaluate("2 $ 3"), Err(EvalError::InvalidToken { .. })));
    assert!(matches!(evaluate("two"), Err(EvalError::InvalidToken { .. })));
}

#[test]
fn unbalanced_parentheses() {
    assert!(matches!(evaluate("(2+3"), Err(EvalError::UnbalancedParentheses)));
    assert!(matches!(evaluate("2+3)"), Err(EvalError::UnbalancedParentheses)));
    assert!(matches!(evaluate("((2)"), Err(EvalError::UnbalancedParentheses)));
}

#[test]
fn malformed_expressions_are_syntax_errors() {
    assert!(matches!(evaluate("2+*3"), Err(EvalError::SyntaxError { .. })));
    assert!(matches!(evaluate("2 3"), Err(EvalError::SyntaxError { .. })));
    assert!(matches!(evaluate("2*"), Err(EvalError::SyntaxError { .. })));
    assert!(matches!(evaluate("%5"), Err(EvalError::SyntaxError { .. })));
    assert!(matches!(evaluate("2+%"), Err(EvalError::SyntaxError { .. })));
}

#[test]
fn evaluation_is_idempotent() {
    let stream = vec![Token::Number(0.1),
                      Token::Plus,
                      Token::Number(0.2),
                      Token::Star,
                      Token::Number(3.0)];

    let first = evaluate_tokens(&stream).unwrap();
    let second = evaluate_tokens(&stream).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn builder_round_trip() {
    let mut builder = SequenceBuilder::new();
    builder.add_tag(tag(3.0));
    builder.add_operator("+").unwrap();
    builder.add_tag(tag(4.0));

    let stream = builder.token_stream().unwrap();
    assert_eq!(evaluate_tokens(&stream).unwrap(), 7.0);
}

#[test]
fn alternation_and_expecting() {
    let mut builder = SequenceBuilder::new();
    assert_eq!(builder.expecting(), Expecting::Tag);

    builder.add_tag(tag(1.0));
    assert_eq!(builder.expecting(), Expecting::Operator);

    builder.add_operator("*").unwrap();
    assert_eq!(builder.expecting(), Expecting::Tag);
}

#[test]
fn operator_symbols_are_validated() {
    for symbol in ["&", "!", "=", "**", "plus", ""] {
        let mut builder = SequenceBuilder::new();
        builder.add_tag(tag(1.0));
        assert!(matches!(builder.add_operator(symbol), Err(EvalError::InvalidToken { .. })),
                "'{symbol}' was accepted");
    }

    for symbol in ["+", "-", "*", "/", "%", "^", "(", ")"] {
        let mut builder = SequenceBuilder::new();
        builder.add_tag(tag(1.0));
        assert!(builder.add_operator(symbol).is_ok(), "'{symbol}' was rejected");
    }
}

#[test]
fn operator_symbol_is_rejected_before_position() {
    // A bad symbol is InvalidToken in every builder state.
    let mut builder = SequenceBuilder::new();
    assert!(matches!(builder.add_operator("&"), Err(EvalError::InvalidToken { .. })));
    // A good symbol with no pending tag is an operand-missing error.
    assert!(matches!(builder.add_operator("+"), Err(EvalError::SyntaxError { .. })));
    assert!(builder.is_empty());
}

#[test]
fn trailing_operator_is_trimmed() {
    let mut builder = SequenceBuilder::new();
    builder.add_tag(tag(3.0));
    builder.add_operator("+").unwrap();
    builder.add_tag(tag(4.0));
    builder.add_operator("*").unwrap();

    let stream = builder.token_stream().unwrap();
    assert_eq!(stream.len(), 2 * builder.tags().len() - 1);
    assert_eq!(evaluate_tokens(&stream).unwrap(), 7.0);
}

#[test]
fn trailing_percent_is_kept() {
    let mut builder = SequenceBuilder::new();
    builder.add_tag(tag(50.0));
    builder.add_operator("%").unwrap();

    let stream = builder.token_stream().unwrap();
    assert_eq!(evaluate_tokens(&stream).unwrap(), 0.5);
}

#[test]
fn remove_last_drains_to_empty() {
    let mut builder = SequenceBuilder::new();
    builder.add_tag(tag(1.0));
    builder.add_operator("+").unwrap();
    builder.add_tag(tag(2.0));
    builder.add_operator("*").unwrap();

    let presses = builder.tags().len() + builder.operators().len();
    for _ in 0..presses {
        builder.remove_last();
    }
    assert!(builder.is_empty());

    // No-op on an empty sequence.
    builder.remove_last();
    assert!(builder.is_empty());
}

#[test]
fn remove_last_pops_most_recent_element() {
    let mut builder = SequenceBuilder::new();
    builder.add_tag(tag(1.0));
    builder.add_operator("+").unwrap();

    builder.remove_last();
    assert!(builder.operators().is_empty());
    assert_eq!(builder.tags().len(), 1);

    builder.remove_last();
    assert!(builder.is_empty());
}

#[test]
fn remove_tag_keeps_alternation() {
    let mut builder = SequenceBuilder::new();
    builder.add_tag(tag(1.0));
    builder.add_operator("+").unwrap();
    builder.add_tag(tag(2.0));
    builder.add_operator("*").unwrap();
    builder.add_tag(tag(3.0));

    // Removing a middle tag takes the operator in the gap after it.
    builder.remove_tag(1);
    assert_eq!(builder.tags().len(), 2);
    assert_eq!(builder.operators().len(), 1);
    let stream = builder.token_stream().unwrap();
    assert_eq!(evaluate_tokens(&stream).unwrap(), 4.0);

    // Removing the last tag takes the operator before it.
    builder.remove_tag(1);
    assert_eq!(builder.tags().len(), 1);
    assert!(builder.operators().is_empty());

    // Out-of-range indices are ignored.
    builder.remove_tag(5);
    assert_eq!(builder.tags().len(), 1);
}

#[test]
fn update_tag_is_checked() {
    let mut builder = SequenceBuilder::new();
    builder.add_tag(tag(1.0));

    builder.update_tag(0, 9.5).unwrap();
    assert_eq!(builder.tags()[0].value, 9.5);

    assert!(matches!(builder.update_tag(3, 1.0), Err(EvalError::InvalidToken { .. })));
    assert!(matches!(builder.update_tag(0, f64::NAN), Err(EvalError::InvalidToken { .. })));
    assert!(matches!(builder.update_tag(0, f64::INFINITY),
                     Err(EvalError::InvalidToken { .. })));
    assert_eq!(builder.tags()[0].value, 9.5);
}

#[test]
fn empty_builder_has_no_stream() {
    let builder = SequenceBuilder::new();
    assert!(matches!(builder.token_stream(), Err(EvalError::EmptyExpression)));
}

#[test]
fn session_state_machine() {
    let mut session = FormulaSession::new();
    assert_eq!(session.state(), SessionState::Idle);

    session.on_add_tag(tag(200.0));
    assert_eq!(session.state(), SessionState::AwaitingOperator);

    session.on_add_operator("*").unwrap();
    assert_eq!(session.state(), SessionState::AwaitingTag);

    session.on_add_tag(tag(10.0));
    session.on_add_operator("%").unwrap();

    assert_eq!(session.on_compute().unwrap(), 20.0);
    assert_eq!(session.state(), SessionState::Computed(20.0));

    // Any further edit leaves the terminal state.
    session.on_remove_last();
    assert_eq!(session.state(), SessionState::AwaitingOperator);
}

#[test]
fn session_errored_state_and_correction() {
    let mut session = FormulaSession::new();
    session.on_add_tag(tag(5.0));
    session.on_add_operator("/").unwrap();
    session.on_add_tag(tag(0.0));

    assert!(matches!(session.on_compute(), Err(EvalError::DivisionByZero)));
    assert_eq!(session.state(), SessionState::Errored(EvalError::DivisionByZero));

    // The sequence is left intact for correction.
    assert_eq!(session.current_tags().len(), 2);
    session.on_update_tag_value(1, 2.0).unwrap();
    assert_eq!(session.on_compute().unwrap(), 2.5);
}

#[test]
fn compute_trims_dangling_operator() {
    let mut session = FormulaSession::new();
    session.on_add_tag(tag(6.0));
    session.on_add_operator("+").unwrap();
    assert_eq!(session.current_expecting(), Expecting::Tag);

    // The dangling '+' is ignored, not an error.
    assert_eq!(session.on_compute().unwrap(), 6.0);
    // ...and it is still in the sequence afterwards.
    assert_eq!(session.current_operators().len(), 1);
}

#[test]
fn backspace_prefers_pending_input() {
    let mut session = FormulaSession::new();
    session.on_add_tag(tag(1.0));
    session.set_pending("ab");

    session.on_remove_last();
    assert_eq!(session.pending(), "a");
    assert_eq!(session.current_tags().len(), 1);

    session.on_remove_last();
    assert_eq!(session.pending(), "");
    assert_eq!(session.current_tags().len(), 1);

    session.on_remove_last();
    assert!(session.current_tags().is_empty());
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn typing_dismisses_error_but_not_result() {
    let mut session = FormulaSession::new();
    session.on_add_tag(tag(4.0));
    session.on_compute().unwrap();

    session.set_pending("x");
    assert_eq!(session.state(), SessionState::Computed(4.0));

    let mut errored = FormulaSession::new();
    errored.on_add_tag(tag(1.0));
    errored.on_add_operator("/").unwrap();
    errored.on_add_tag(tag(0.0));
    let _ = errored.on_compute();
    assert!(matches!(errored.state(), SessionState::Errored(_)));

    errored.set_pending("2");
    assert_eq!(errored.state(), SessionState::AwaitingOperator);
}

#[test]
fn tag_entry_ignored_while_operator_expected() {
    let mut session = FormulaSession::new();
    session.on_add_tag(tag(1.0));
    session.on_add_tag(tag(2.0));
    assert_eq!(session.current_tags().len(), 1);
    assert_eq!(session.current_expecting(), Expecting::Operator);
}

#[test]
fn session_reset() {
    let mut session = FormulaSession::new();
    session.on_add_tag(tag(1.0));
    session.set_pending("rev");
    session.on_compute().unwrap();

    session.reset();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.pending(), "");
    assert!(session.current_tags().is_empty());
}

#[test]
fn suggestions_become_tags() {
    struct FixedSource(Vec<Suggestion>);

    impl SuggestionSource for FixedSource {
        fn lookup(&self, query: &str) -> Vec<Suggestion> {
            let query = query.to_lowercase();
            self.0
                .iter()
                .filter(|suggestion| suggestion.name.to_lowercase().contains(&query))
                .take(5)
                .cloned()
                .collect()
        }
    }

    let source = FixedSource(vec![Suggestion { name:     "Revenue".to_string(),
                                               value:    2500.0,
                                               category: "sales".to_string(), },
                                  Suggestion { name:     "Headcount".to_string(),
                                               value:    12.0,
                                               category: "ops".to_string(), }]);

    let found = source.lookup("rev");
    assert_eq!(found.len(), 1);

    let mut session = FormulaSession::new();
    session.on_add_tag(found[0].clone().into());
    assert_eq!(session.current_tags()[0].title, "Revenue");
    assert_eq!(session.current_tags()[0].category, "sales");
    assert_eq!(session.on_compute().unwrap(), 2500.0);
}
