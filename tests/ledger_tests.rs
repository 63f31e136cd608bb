// Unit tests for the response ledger
//
// The key properties: field isolation under arbitrary upsert sequences,
// at most one record per question, and reset semantics.

use qa_capture::{RecordField, ResponseLedger};

#[test]
fn test_upsert_creates_record_with_other_field_empty() {
    let mut ledger = ResponseLedger::new();
    ledger.upsert("q1", RecordField::Reasoning, "because");

    let record = ledger.get("q1").expect("record should exist");
    assert_eq!(record.question_text, "q1");
    assert_eq!(record.reasoning, "because");
    assert_eq!(record.response, "");
}

#[test]
fn test_field_isolation() {
    let mut ledger = ResponseLedger::new();
    ledger.upsert("q1", RecordField::Reasoning, "r1");
    ledger.upsert("q1", RecordField::Response, "a1");
    ledger.upsert("q1", RecordField::Reasoning, "r2");

    let record = ledger.get("q1").unwrap();
    assert_eq!(record.reasoning, "r2", "last write to reasoning wins");
    assert_eq!(record.response, "a1", "response untouched by reasoning writes");

    ledger.upsert("q1", RecordField::Response, "a2");
    let record = ledger.get("q1").unwrap();
    assert_eq!(record.reasoning, "r2");
    assert_eq!(record.response, "a2");
}

#[test]
fn test_at_most_one_record_per_question() {
    let mut ledger = ResponseLedger::new();
    ledger.upsert("q1", RecordField::Reasoning, "a");
    ledger.upsert("q1", RecordField::Reasoning, "b");
    ledger.upsert("q1", RecordField::Response, "c");

    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_reset_one_removes_only_that_record() {
    let mut ledger = ResponseLedger::new();
    ledger.upsert("q1", RecordField::Reasoning, "r");
    ledger.upsert("q2", RecordField::Reasoning, "r");

    ledger.reset_one("q1");

    assert!(ledger.get("q1").is_none());
    assert!(ledger.get("q2").is_some());
}

#[test]
fn test_reset_one_absent_is_not_an_error() {
    let mut ledger = ResponseLedger::new();
    ledger.reset_one("never-existed");
    assert!(ledger.is_empty());
}

#[test]
fn test_reset_all_leaves_every_question_absent() {
    let mut ledger = ResponseLedger::new();
    ledger.upsert("q1", RecordField::Reasoning, "r");
    ledger.upsert("q2", RecordField::Response, "a");
    ledger.upsert("q3", RecordField::Reasoning, "r");

    ledger.reset_all();

    for q in ["q1", "q2", "q3"] {
        assert!(ledger.get(q).is_none());
    }
    assert!(ledger.is_empty());
}
