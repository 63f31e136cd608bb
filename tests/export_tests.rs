// Tests for the export encoder
//
// Row selection per layout, question-set ordering, quote escaping and the
// advisory file name.

use qa_capture::{
    encode_csv, export_file_name, parse_question_set, ExportLayout, RecordField, ResponseLedger,
};

#[test]
fn test_current_layout_emits_only_present_entries_in_question_order() {
    let questions =
        parse_question_set("Category,Question\nA,First\nB,Second\nC,Third\n").unwrap();
    let mut ledger = ResponseLedger::new();
    // Answer out of order; export order must follow the question sequence
    ledger.upsert("Third", RecordField::Reasoning, "r3");
    ledger.upsert("Third", RecordField::Response, "a3");
    ledger.upsert("First", RecordField::Reasoning, "r1");
    ledger.upsert("First", RecordField::Response, "a1");

    let csv = encode_csv(&questions, &ledger, ExportLayout::Current).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "Question,Reasoning,Response");
    assert_eq!(lines[1], "First,r1,a1");
    assert_eq!(lines[2], "Third,r3,a3");
    assert_eq!(lines.len(), 3, "unanswered questions produce no row");
}

#[test]
fn test_legacy_layout_emits_one_row_per_question() {
    let questions = parse_question_set("Category,Question\nA,First\nB,Second\n").unwrap();
    let mut ledger = ResponseLedger::new();
    ledger.upsert("First", RecordField::Reasoning, "r1");

    let csv = encode_csv(&questions, &ledger, ExportLayout::Legacy).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "Question,Complex_CoT,Response");
    assert_eq!(lines[1], "First,r1,");
    assert_eq!(lines[2], "Second,,");
}

#[test]
fn test_quote_escaping_round_trips() {
    let questions = parse_question_set("Category,Question\nA,q\n").unwrap();
    let mut ledger = ResponseLedger::new();
    ledger.upsert("q", RecordField::Reasoning, "r\"1");
    ledger.upsert("q", RecordField::Response, "r2");

    let csv = encode_csv(&questions, &ledger, ExportLayout::Current).unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "q");
    assert_eq!(&rows[0][1], "r\"1");
    assert_eq!(&rows[0][2], "r2");
}

#[test]
fn test_embedded_newlines_and_commas_round_trip() {
    let questions = parse_question_set("Category,Question\nA,q\n").unwrap();
    let mut ledger = ResponseLedger::new();
    ledger.upsert("q", RecordField::Reasoning, "line one\nline two, with comma");
    ledger.upsert("q", RecordField::Response, "plain");

    let csv = encode_csv(&questions, &ledger, ExportLayout::Current).unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&rows[0][1], "line one\nline two, with comma");
}

#[test]
fn test_orphaned_ledger_entries_are_not_exported() {
    let questions = parse_question_set("Category,Question\nA,Kept\n").unwrap();
    let mut ledger = ResponseLedger::new();
    ledger.upsert("Kept", RecordField::Reasoning, "r");
    ledger.upsert("Kept", RecordField::Response, "a");
    // Entry left over from a previously loaded set
    ledger.upsert("Removed question", RecordField::Response, "stale");

    let csv = encode_csv(&questions, &ledger, ExportLayout::Current).unwrap();

    assert!(!csv.contains("Removed question"));
    assert_eq!(csv.lines().count(), 2);
}

#[test]
fn test_export_file_name_carries_the_set_label() {
    let name = export_file_name(Some("My Set"));
    assert!(name.starts_with("qa_responses_my_set_"));
    assert!(name.ends_with(".csv"));

    let fallback = export_file_name(None);
    assert!(fallback.starts_with("qa_responses_session_"));
}
