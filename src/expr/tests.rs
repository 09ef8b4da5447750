use super::*;
use crate::types::GameState;

fn state_with(vars: &[(&str, i64)]) -> GameState {
    let mut state = GameState::default();
    for (name, value) in vars.iter().copied() {
        state.set(name, value);
    }
    state
}

#[test]
fn tokenize_splits_on_spaces_and_parens() {
    assert_eq!(
        tokenize("(x == 1) AND y"),
        vec!["(", "x", "==", "1", ")", "AND", "y"]
    );
}

#[test]
fn tokenize_handles_adjacent_parens() {
    assert_eq!(tokenize("((x))"), vec!["(", "(", "x", ")", ")"]);
    assert_eq!(tokenize(""), Vec::<String>::new());
}

#[test]
fn literal_truthiness() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    assert!(eval.eval_as_bool(&state, "1"));
    assert!(!eval.eval_as_bool(&state, "0"));
    assert!(eval.eval_as_bool(&state, "-1"));
    assert!(eval.is_valid());
}

#[test]
fn bare_variable_is_truthy_when_nonzero() {
    let state = state_with(&[("lamp", 2), ("door", 0)]);
    let mut eval = Evaluator::new();
    assert!(eval.eval_as_bool(&state, "lamp"));
    assert!(!eval.eval_as_bool(&state, "door"));
    assert!(eval.is_valid());
}

#[test]
fn comparison_operators() {
    let state = state_with(&[("x", 5)]);
    let mut eval = Evaluator::new();
    assert!(eval.eval_as_bool(&state, "x == 5"));
    assert!(eval.eval_as_bool(&state, "x != 4"));
    assert!(eval.eval_as_bool(&state, "x >= 3"));
    assert!(eval.eval_as_bool(&state, "x <= 5"));
    assert!(eval.eval_as_bool(&state, "x > 4"));
    assert!(eval.eval_as_bool(&state, "x < 6"));
    assert!(!eval.eval_as_bool(&state, "x == 4"));
    assert!(eval.is_valid());
}

#[test]
fn comparison_reads_both_sides_from_variables() {
    let state = state_with(&[("a", 3), ("b", 3)]);
    let mut eval = Evaluator::new();
    assert!(eval.eval_as_bool(&state, "a == b"));
    assert!(eval.is_valid());
}

#[test]
fn negative_literals_compare() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    assert!(eval.eval_as_bool(&state, "-3 == -3"));
    assert!(eval.eval_as_bool(&state, "-3 < 0"));
    assert!(eval.is_valid());
}

#[test]
fn not_negates_following_expression() {
    let state = state_with(&[("x", 0)]);
    let mut eval = Evaluator::new();
    assert!(eval.eval_as_bool(&state, "NOT 0"));
    assert!(!eval.eval_as_bool(&state, "NOT (x == 0)"));
    assert!(eval.is_valid());
}

#[test]
fn not_applies_to_the_whole_continuation() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    // NOT parses the rest greedily: NOT (0 AND 0), not (NOT 0) AND 0.
    assert!(eval.eval_as_bool(&state, "NOT 0 AND 0"));
    assert!(eval.is_valid());
}

#[test]
fn and_or_group_by_textual_order_not_precedence() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    // 0 AND (1 OR 1): conventional precedence would give true.
    assert!(!eval.eval_as_bool(&state, "0 AND 1 OR 1"));
    // 1 OR (0 AND 0)
    assert!(eval.eval_as_bool(&state, "1 OR 0 AND 0"));
    assert!(eval.is_valid());
}

#[test]
fn parentheses_override_grouping() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    assert!(eval.eval_as_bool(&state, "( 0 AND 1 ) OR 1"));
    assert!(!eval.eval_as_bool(&state, "(0 OR 1) AND 0"));
    assert!(eval.is_valid());
}

#[test]
fn and_or_evaluate_the_right_side_even_when_decided() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    assert!(!eval.eval_as_bool(&state, "0 AND bogus"));
    assert!(!eval.is_valid());
    assert!(eval.eval_as_bool(&state, "1 OR bogus"));
    assert!(!eval.is_valid());
}

#[test]
fn unclosed_parenthesis_is_reported() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    assert!(!eval.eval_as_bool(&state, "( 1"));
    assert_eq!(eval.errors(), &[EvalError::UnclosedParen]);
}

#[test]
fn unknown_token_is_reported() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    assert!(!eval.eval_as_bool(&state, "ghost"));
    assert_eq!(eval.errors(), &[EvalError::UnknownToken("ghost".into())]);
}

#[test]
fn unexpected_end_after_operator_is_reported() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    assert!(!eval.eval_as_bool(&state, "1 =="));
    assert_eq!(eval.errors(), &[EvalError::UnexpectedEnd]);
}

#[test]
fn empty_expression_is_reported() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    assert!(!eval.eval_as_bool(&state, ""));
    assert_eq!(eval.errors(), &[EvalError::UnexpectedEnd]);
}

#[test]
fn trailing_tokens_are_reported() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    // The first value still decides the result.
    assert!(eval.eval_as_bool(&state, "1 2"));
    assert_eq!(eval.errors(), &[EvalError::TrailingTokens("1 2".into())]);
}

#[test]
fn malformed_operand_compares_against_zero() {
    let state = state_with(&[("x", 0)]);
    let mut eval = Evaluator::new();
    // The bad operand becomes 0 and is also left over for the trailing
    // token check, so two errors come out of one bad comparison.
    assert!(eval.eval_as_bool(&state, "x == banana"));
    assert_eq!(
        eval.errors(),
        &[
            EvalError::ExpectedValue("banana".into()),
            EvalError::TrailingTokens("x == banana".into()),
        ]
    );
}

#[test]
fn oversized_literal_is_reported() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    assert!(!eval.eval_as_bool(&state, "99999999999999999999"));
    assert_eq!(
        eval.errors(),
        &[EvalError::IntOutOfRange("99999999999999999999".into())]
    );
}

#[test]
fn errors_reset_between_calls() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    eval.eval_as_bool(&state, "bogus");
    assert!(!eval.is_valid());
    assert!(eval.eval_as_bool(&state, "1"));
    assert!(eval.is_valid());
}

#[test]
fn error_text_joins_all_messages() {
    let state = GameState::default();
    let mut eval = Evaluator::new();
    eval.eval_as_bool(&state, "( bogus");
    let text = eval.error_text();
    assert!(text.contains("Unknown token 'bogus'"));
    assert!(text.contains("Unclosed parenthesis"));
}

#[test]
fn assignment_writes_literal() {
    let mut state = state_with(&[("x", 0)]);
    let mut eval = Evaluator::new();
    eval.exec_assignment(&mut state, "x = 5");
    assert!(eval.is_valid());
    assert_eq!(state.get("x"), Some(5));
}

#[test]
fn assignment_copies_variable() {
    let mut state = state_with(&[("x", 0), ("y", 7)]);
    let mut eval = Evaluator::new();
    eval.exec_assignment(&mut state, "x = y");
    assert!(eval.is_valid());
    assert_eq!(state.get("x"), Some(7));
}

#[test]
fn assignment_accepts_negative_literal() {
    let mut state = state_with(&[("x", 0)]);
    let mut eval = Evaluator::new();
    eval.exec_assignment(&mut state, "x = -2");
    assert!(eval.is_valid());
    assert_eq!(state.get("x"), Some(-2));
}

#[test]
fn assignment_to_undeclared_variable_is_rejected() {
    let mut state = GameState::default();
    let mut eval = Evaluator::new();
    eval.exec_assignment(&mut state, "ghost = 5");
    assert!(!eval.is_valid());
    assert!(!state.has_var("ghost"));
}

#[test]
fn assignment_requires_equals_sign() {
    let mut state = state_with(&[("x", 3)]);
    let mut eval = Evaluator::new();
    eval.exec_assignment(&mut state, "x 5");
    assert_eq!(
        eval.errors(),
        &[EvalError::LetMissingEquals, EvalError::LetBadSource]
    );
    // Best effort: the destination still ends up in a known state.
    assert_eq!(state.get("x"), Some(0));
}

#[test]
fn assignment_rejects_unknown_source() {
    let mut state = state_with(&[("x", 3)]);
    let mut eval = Evaluator::new();
    eval.exec_assignment(&mut state, "x = banana");
    assert_eq!(eval.errors(), &[EvalError::LetBadSource]);
    assert_eq!(state.get("x"), Some(0));
}

#[test]
fn assignment_reports_trailing_tokens() {
    let mut state = state_with(&[("x", 0)]);
    let mut eval = Evaluator::new();
    eval.exec_assignment(&mut state, "x = 5 junk");
    assert_eq!(
        eval.errors(),
        &[EvalError::TrailingTokens("x = 5 junk".into())]
    );
    assert_eq!(state.get("x"), Some(5));
}

#[test]
fn assignment_with_empty_body_records_every_failure() {
    let mut state = GameState::default();
    let mut eval = Evaluator::new();
    eval.exec_assignment(&mut state, "");
    assert_eq!(
        eval.errors(),
        &[
            EvalError::LetDestination,
            EvalError::LetMissingEquals,
            EvalError::LetBadSource,
        ]
    );
    assert!(state.vars.is_empty());
}
