//! Question set loading and validation
//!
//! Question sets arrive either as a named built-in set (fetched from a
//! static asset location) or as user-supplied CSV text. Both go through
//! the same validation: the parsed data must be non-empty and every row
//! must carry non-empty question text.

use crate::error::LoadError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single question. Identity is the text value; there is no separate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Grouping label; rows without one default to empty
    #[serde(default)]
    pub category: String,

    /// Question text (non-empty, the ledger key)
    pub text: String,
}

/// Parse and validate CSV question-set text (header `Category,Question`).
///
/// Rows missing the `Category` cell default it to an empty string; a row
/// with a missing or empty `Question` cell fails the whole set. Returns
/// the ordered, immutable question sequence for the session.
pub fn parse_question_set(input: &str) -> Result<Vec<Question>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input.as_bytes());

    let headers = reader.headers()?.clone();
    let question_col = headers
        .iter()
        .position(|h| h.trim() == "Question")
        .ok_or(LoadError::MissingQuestionColumn)?;
    let category_col = headers.iter().position(|h| h.trim() == "Category");

    let mut questions = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = index + 1;

        let text = record
            .get(question_col)
            .map(str::trim)
            .unwrap_or_default();
        if text.is_empty() {
            return Err(LoadError::MissingQuestion { row });
        }

        let category = category_col
            .and_then(|col| record.get(col))
            .map(str::trim)
            .unwrap_or_default();

        questions.push(Question {
            category: category.to_string(),
            text: text.to_string(),
        });
    }

    if questions.is_empty() {
        return Err(LoadError::EmptySet);
    }

    Ok(questions)
}

/// Derive a human-readable set label from a file name ("my_set.csv" → "my_set").
pub fn set_label(file_name: &str) -> String {
    file_name
        .trim_end_matches(".csv")
        .trim_end_matches(".CSV")
        .to_string()
}

/// Fetches the raw CSV text of a named built-in question set.
///
/// Injected so tests can use an in-memory implementation with
/// deterministic content.
#[async_trait]
pub trait SetFetcher: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<String, LoadError>;
}

/// Fetches built-in sets from a static asset directory.
pub struct AssetFetcher {
    root: PathBuf,
}

impl AssetFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SetFetcher for AssetFetcher {
    async fn fetch(&self, name: &str) -> Result<String, LoadError> {
        let path = self.root.join(name);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| LoadError::Fetch {
                set: name.to_string(),
                reason: e.to_string(),
            })
    }
}
