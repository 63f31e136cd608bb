use super::state::RecordingMode;
use crate::ledger::ResponseRecord;
use crate::questions::Question;
use serde::Serialize;

/// Serializable status report of the session, consumed by the API layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Session identifier for log correlation
    pub session_id: String,

    /// Label of the loaded question set, if any
    pub selected_set: Option<String>,

    /// Name of the uploaded file, if the set came from an upload
    pub file_name: Option<String>,

    /// Total number of questions in the set
    pub question_count: usize,

    /// Index of the question currently presented
    pub cursor: usize,

    /// The question at the cursor
    pub current_question: Option<Question>,

    /// The ledger record for the current question
    pub current_record: Option<ResponseRecord>,

    /// Questions with a non-empty response
    pub answered_count: usize,

    /// Current recording mode
    pub mode: RecordingMode,

    /// Live transcript preview (committed + interim)
    pub live_preview: String,

    /// Whether the last question's response is filled
    pub complete: bool,

    /// Whether this session was restored from a snapshot
    pub resumed: bool,

    /// Whether a capture source is configured at all
    pub recognizer_available: bool,

    /// Last surfaced capture/persistence error, if any
    pub last_error: Option<String>,
}
