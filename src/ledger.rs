use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which field of a [`ResponseRecord`] a capture or edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordField {
    Reasoning,
    Response,
}

/// One reasoning/answer record, keyed by the question's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub question_text: String,

    #[serde(default)]
    pub reasoning: String,

    #[serde(default)]
    pub response: String,
}

/// Mapping from question identity to its reasoning/answer record.
///
/// Holds at most one record per question text. No ordering is implied;
/// ordering for export comes from the question sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseLedger {
    records: HashMap<String, ResponseRecord>,
}

impl ResponseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one field of the record for `question_text`, creating the
    /// record (with the other field empty) if it does not exist yet. The
    /// untouched field keeps its prior value.
    pub fn upsert(&mut self, question_text: &str, field: RecordField, value: &str) {
        let record = self
            .records
            .entry(question_text.to_string())
            .or_insert_with(|| ResponseRecord {
                question_text: question_text.to_string(),
                reasoning: String::new(),
                response: String::new(),
            });

        match field {
            RecordField::Reasoning => record.reasoning = value.to_string(),
            RecordField::Response => record.response = value.to_string(),
        }
    }

    pub fn get(&self, question_text: &str) -> Option<&ResponseRecord> {
        self.records.get(question_text)
    }

    /// Remove the record for one question; absent records are not an error.
    pub fn reset_one(&mut self, question_text: &str) {
        self.records.remove(question_text);
    }

    /// Empty the mapping entirely. Irreversible; the caller confirms
    /// destructive intent before invoking.
    pub fn reset_all(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
