//! Export encoder
//!
//! Renders the ledger, ordered by the question sequence, into the CSV
//! interchange format consumed by the fine-tuning pipeline. Always a full
//! re-encode, never incremental.

use crate::error::ExportError;
use crate::ledger::ResponseLedger;
use crate::questions::Question;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Which historical column layout to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportLayout {
    /// `Question,Reasoning,Response`; one row per ledger entry present
    Current,
    /// `Question,Complex_CoT,Response`; one row per question, fields may
    /// be empty
    Legacy,
}

impl Default for ExportLayout {
    fn default() -> Self {
        ExportLayout::Current
    }
}

/// Encode the ledger as CSV in question-set order.
///
/// Fields containing the delimiter, a quote or a newline are quoted with
/// internal quotes doubled; lines terminate with `\n`. Ledger entries
/// keyed by questions absent from the sequence (orphans from a set
/// switch) are never reached.
pub fn encode_csv(
    questions: &[Question],
    ledger: &ResponseLedger,
    layout: ExportLayout,
) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    match layout {
        ExportLayout::Current => {
            writer.write_record(["Question", "Reasoning", "Response"])?;
            for question in questions {
                if let Some(record) = ledger.get(&question.text) {
                    writer.write_record([
                        question.text.as_str(),
                        record.reasoning.as_str(),
                        record.response.as_str(),
                    ])?;
                }
            }
        }
        ExportLayout::Legacy => {
            writer.write_record(["Question", "Complex_CoT", "Response"])?;
            for question in questions {
                let (cot, response) = ledger
                    .get(&question.text)
                    .map(|r| (r.reasoning.as_str(), r.response.as_str()))
                    .unwrap_or(("", ""));
                writer.write_record([question.text.as_str(), cot, response])?;
            }
        }
    }

    writer.flush().map_err(csv::Error::from)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Advisory download name for an export, carrying the set's label.
pub fn export_file_name(label: Option<&str>) -> String {
    let label = label
        .unwrap_or("session")
        .trim()
        .replace(char::is_whitespace, "_")
        .to_lowercase();
    format!("qa_responses_{}_{}.csv", label, Utc::now().format("%Y-%m-%d"))
}
