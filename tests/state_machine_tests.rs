// Tests for the session state machine (pure core)
//
// Transitions, the reasoning-before-answer rule, cursor clamping and the
// completion predicate.

use qa_capture::{
    parse_question_set, RecordField, RecordingMode, SessionError, SessionState,
};

fn three_question_state() -> SessionState {
    let questions = parse_question_set(
        "Category,Question\nA,First question\nB,Second question\nC,Third question\n",
    )
    .unwrap();
    let mut state = SessionState::new();
    state
        .replace_questions(questions, Some("test".to_string()), None)
        .unwrap();
    state
}

#[test]
fn test_begin_capture_requires_questions() {
    let mut state = SessionState::new();
    let err = state.begin_capture(RecordField::Reasoning).unwrap_err();
    assert!(matches!(err, SessionError::NoQuestions));
    assert_eq!(state.mode(), RecordingMode::Idle);
}

#[test]
fn test_start_while_capturing_is_rejected_without_mutation() {
    let mut state = three_question_state();
    state.edit_field(RecordField::Reasoning, "already reasoned").unwrap();
    state.begin_capture(RecordField::Response).unwrap();
    assert_eq!(state.mode(), RecordingMode::CapturingAnswer);

    let err = state.begin_capture(RecordField::Reasoning).unwrap_err();
    assert!(matches!(err, SessionError::CaptureInProgress));

    // Mode and ledger untouched by the rejected start
    assert_eq!(state.mode(), RecordingMode::CapturingAnswer);
    let record = state.ledger().get("First question").unwrap();
    assert_eq!(record.reasoning, "already reasoned");
    assert_eq!(record.response, "");
}

#[test]
fn test_answer_capture_requires_reasoning() {
    let mut state = three_question_state();
    let err = state.begin_capture(RecordField::Response).unwrap_err();
    assert!(matches!(err, SessionError::ReasoningRequired));
    assert_eq!(state.mode(), RecordingMode::Idle);
}

#[test]
fn test_typed_reasoning_satisfies_answer_precondition() {
    let mut state = three_question_state();
    state.edit_field(RecordField::Reasoning, "typed, not spoken").unwrap();

    state.begin_capture(RecordField::Response).unwrap();
    assert_eq!(state.mode(), RecordingMode::CapturingAnswer);
}

#[test]
fn test_commit_capture_writes_trimmed_text_and_returns_to_idle() {
    let mut state = three_question_state();
    state.begin_capture(RecordField::Reasoning).unwrap();

    let field = state.commit_capture("  spoken reasoning  ");

    assert_eq!(field, Some(RecordField::Reasoning));
    assert_eq!(state.mode(), RecordingMode::Idle);
    assert_eq!(
        state.ledger().get("First question").unwrap().reasoning,
        "spoken reasoning"
    );
}

#[test]
fn test_stop_while_idle_is_a_noop() {
    let mut state = three_question_state();
    assert_eq!(state.commit_capture("stray text"), None);
    assert!(state.ledger().is_empty());
}

#[test]
fn test_empty_commit_does_not_leave_empty_record() {
    let mut state = three_question_state();
    state.begin_capture(RecordField::Reasoning).unwrap();
    state.commit_capture("   ");

    // A record with both fields empty would violate the ledger invariant
    assert!(state.ledger().get("First question").is_none());
}

#[test]
fn test_next_question_rejected_while_capturing() {
    let mut state = three_question_state();
    state.begin_capture(RecordField::Reasoning).unwrap();

    let err = state.next_question().unwrap_err();
    assert!(matches!(err, SessionError::CaptureInProgress));
    assert_eq!(state.cursor(), 0);
}

#[test]
fn test_next_question_clamps_at_the_last_question() {
    let mut state = three_question_state();
    assert!(state.next_question().unwrap());
    assert!(state.next_question().unwrap());
    assert_eq!(state.cursor(), 2);

    // No wraparound, no error
    assert!(!state.next_question().unwrap());
    assert_eq!(state.cursor(), 2);
}

#[test]
fn test_completion_predicate() {
    let mut state = three_question_state();
    state.next_question().unwrap();
    state.next_question().unwrap();
    assert_eq!(state.cursor(), 2);
    assert!(!state.is_complete());

    state.edit_field(RecordField::Reasoning, "r").unwrap();
    state.edit_field(RecordField::Response, "x").unwrap();
    assert!(state.is_complete());

    state.edit_field(RecordField::Response, "").unwrap();
    assert!(!state.is_complete());
}

#[test]
fn test_completion_requires_cursor_on_last_question() {
    let mut state = three_question_state();
    state.edit_field(RecordField::Reasoning, "r").unwrap();
    state.edit_field(RecordField::Response, "x").unwrap();

    // First question answered but the cursor is not on the last question
    assert!(!state.is_complete());
}

#[test]
fn test_replace_questions_keeps_ledger_and_resets_cursor() {
    let mut state = three_question_state();
    state.edit_field(RecordField::Reasoning, "keep me").unwrap();
    state.next_question().unwrap();

    let new_questions =
        parse_question_set("Category,Question\nA,First question\nB,Brand new question\n").unwrap();
    state
        .replace_questions(new_questions, Some("other".to_string()), None)
        .unwrap();

    assert_eq!(state.cursor(), 0);
    assert_eq!(state.questions().len(), 2);
    // Re-loading a set with a shared question resumes its prior record
    assert_eq!(
        state.ledger().get("First question").unwrap().reasoning,
        "keep me"
    );
}

#[test]
fn test_reset_all_clears_answers_and_progress_but_keeps_questions() {
    let mut state = three_question_state();
    state.edit_field(RecordField::Reasoning, "r").unwrap();
    state.next_question().unwrap();

    state.reset_all();

    assert_eq!(state.cursor(), 0);
    assert_eq!(state.mode(), RecordingMode::Idle);
    assert!(state.ledger().is_empty());
    assert_eq!(state.questions().len(), 3);
}
