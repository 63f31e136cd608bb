// Unit tests for the transcript accumulator
//
// The accumulator is a pure fold over final/interim segments; these tests
// pin down the preview formula and the reset contract.

use qa_capture::{SpeechSegment, TranscriptAccumulator};

#[test]
fn test_finals_then_interim_preview() {
    let mut acc = TranscriptAccumulator::new();
    acc.push(&SpeechSegment::final_text("a "));
    acc.push(&SpeechSegment::final_text("b "));
    acc.push(&SpeechSegment::interim("c"));

    assert_eq!(acc.current_text(), "a b c");
}

#[test]
fn test_interim_is_superseded_by_next_interim() {
    let mut acc = TranscriptAccumulator::new();
    acc.push(&SpeechSegment::final_text("hello"));
    acc.push(&SpeechSegment::interim("wor"));
    acc.push(&SpeechSegment::interim("world"));

    assert_eq!(acc.current_text(), "hello world");
}

#[test]
fn test_interim_is_superseded_by_final() {
    let mut acc = TranscriptAccumulator::new();
    acc.push(&SpeechSegment::interim("hel"));
    acc.push(&SpeechSegment::final_text("hello"));

    // The interim hypothesis was finalized; it must not appear twice
    assert_eq!(acc.current_text(), "hello");
}

#[test]
fn test_reset_clears_both_buffers() {
    let mut acc = TranscriptAccumulator::new();
    acc.push(&SpeechSegment::final_text("committed"));
    acc.push(&SpeechSegment::interim("pending"));

    acc.reset();

    assert_eq!(acc.current_text(), "");
    assert!(acc.is_empty());
}

#[test]
fn test_current_text_is_idempotent() {
    let mut acc = TranscriptAccumulator::new();
    acc.push(&SpeechSegment::final_text("once"));

    assert_eq!(acc.current_text(), "once");
    assert_eq!(acc.current_text(), "once");
}

#[test]
fn test_whitespace_only_final_is_ignored() {
    let mut acc = TranscriptAccumulator::new();
    acc.push(&SpeechSegment::final_text("   "));
    acc.push(&SpeechSegment::final_text("text"));

    assert_eq!(acc.current_text(), "text");
}
