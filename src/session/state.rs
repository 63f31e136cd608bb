use crate::error::SessionError;
use crate::ledger::{RecordField, ResponseLedger, ResponseRecord};
use crate::persist::Snapshot;
use crate::questions::Question;
use serde::{Deserialize, Serialize};

/// Recording mode of the session. Exactly one is active at a time,
/// globally: only one field of one question may be captured concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordingMode {
    Idle,
    CapturingReasoning,
    CapturingAnswer,
}

impl RecordingMode {
    /// The ledger field a non-idle mode commits into.
    pub fn field(self) -> Option<RecordField> {
        match self {
            RecordingMode::Idle => None,
            RecordingMode::CapturingReasoning => Some(RecordField::Reasoning),
            RecordingMode::CapturingAnswer => Some(RecordField::Response),
        }
    }
}

impl From<RecordField> for RecordingMode {
    fn from(field: RecordField) -> Self {
        match field {
            RecordField::Reasoning => RecordingMode::CapturingReasoning,
            RecordField::Response => RecordingMode::CapturingAnswer,
        }
    }
}

/// The session: ordered question sequence, cursor, ledger and recording
/// mode. Pure and synchronous; all mutation happens through the methods
/// below, one event at a time.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    questions: Vec<Question>,
    cursor: usize,
    ledger: ResponseLedger,
    mode: RecordingMode,
    selected_set: Option<String>,
    file_name: Option<String>,
}

impl Default for RecordingMode {
    fn default() -> Self {
        RecordingMode::Idle
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct a session from a persisted snapshot. An out-of-range
    /// cursor (malformed or hand-edited snapshot) is clamped.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let len = snapshot.questions.len();
        let cursor = if len == 0 {
            0
        } else {
            snapshot.current_question_index.min(len - 1)
        };
        Self {
            questions: snapshot.questions,
            cursor,
            ledger: snapshot.responses,
            mode: RecordingMode::Idle,
            selected_set: snapshot.selected_set,
            file_name: snapshot.file_name,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            questions: self.questions.clone(),
            current_question_index: self.cursor,
            responses: self.ledger.clone(),
            selected_set: self.selected_set.clone(),
            file_name: self.file_name.clone(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> RecordingMode {
        self.mode
    }

    pub fn ledger(&self) -> &ResponseLedger {
        &self.ledger
    }

    pub fn selected_set(&self) -> Option<&str> {
        self.selected_set.as_deref()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    pub fn current_record(&self) -> Option<&ResponseRecord> {
        self.current_question()
            .and_then(|q| self.ledger.get(&q.text))
    }

    /// Validate a `startCapture(field)` transition without mutating.
    ///
    /// Rejected while any capture is active; capturing the answer
    /// requires the current question's reasoning to be non-empty (typed
    /// edits satisfy this too).
    pub fn check_capture(&self, field: RecordField) -> Result<(), SessionError> {
        match self.mode {
            RecordingMode::Idle => {}
            RecordingMode::CapturingReasoning | RecordingMode::CapturingAnswer => {
                return Err(SessionError::CaptureInProgress);
            }
        }
        let question = self.current_question().ok_or(SessionError::NoQuestions)?;
        if field == RecordField::Response {
            let has_reasoning = self
                .ledger
                .get(&question.text)
                .map(|r| !r.reasoning.is_empty())
                .unwrap_or(false);
            if !has_reasoning {
                return Err(SessionError::ReasoningRequired);
            }
        }
        Ok(())
    }

    /// `Idle → Capturing{field}`. On rejection nothing is mutated.
    pub fn begin_capture(&mut self, field: RecordField) -> Result<(), SessionError> {
        self.check_capture(field)?;
        self.mode = field.into();
        Ok(())
    }

    /// `Capturing{field} → Idle`, committing the trimmed captured text
    /// into the ledger. A stop while already idle is a no-op, not an
    /// error. Returns the committed field, if any.
    pub fn commit_capture(&mut self, text: &str) -> Option<RecordField> {
        let field = self.mode.field()?;
        self.mode = RecordingMode::Idle;

        let question_text = self.current_question()?.text.clone();
        let trimmed = text.trim();

        // An empty commit must not leave a record with both fields empty
        if trimmed.is_empty() {
            let other_empty = match (self.ledger.get(&question_text), field) {
                (None, _) => true,
                (Some(r), RecordField::Reasoning) => r.response.is_empty(),
                (Some(r), RecordField::Response) => r.reasoning.is_empty(),
            };
            if other_empty {
                self.ledger.reset_one(&question_text);
                return Some(field);
            }
        }

        self.ledger.upsert(&question_text, field, trimmed);
        Some(field)
    }

    /// Typed-input path: set one field of the current question directly.
    pub fn edit_field(&mut self, field: RecordField, text: &str) -> Result<(), SessionError> {
        let question_text = self
            .current_question()
            .ok_or(SessionError::NoQuestions)?
            .text
            .clone();
        self.ledger.upsert(&question_text, field, text.trim());
        Ok(())
    }

    /// Advance the cursor; only while idle, clamped at the last question
    /// (no wraparound, no error). Returns whether the cursor moved.
    pub fn next_question(&mut self) -> Result<bool, SessionError> {
        if self.mode != RecordingMode::Idle {
            return Err(SessionError::CaptureInProgress);
        }
        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Completion: cursor on the last question and its response filled.
    pub fn is_complete(&self) -> bool {
        if self.questions.is_empty() || self.cursor != self.questions.len() - 1 {
            return false;
        }
        self.current_record()
            .map(|r| !r.response.is_empty())
            .unwrap_or(false)
    }

    /// Number of questions whose response field is filled.
    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| {
                self.ledger
                    .get(&q.text)
                    .map(|r| !r.response.is_empty())
                    .unwrap_or(false)
            })
            .count()
    }

    /// Replace the whole question sequence (new set loaded). Resets the
    /// cursor, keeps the ledger: re-loading the same set resumes prior
    /// answers, and entries keyed by questions absent from the new set
    /// are retained as unreachable orphans.
    pub fn replace_questions(
        &mut self,
        questions: Vec<Question>,
        selected_set: Option<String>,
        file_name: Option<String>,
    ) -> Result<(), SessionError> {
        if self.mode != RecordingMode::Idle {
            return Err(SessionError::CaptureInProgress);
        }
        self.questions = questions;
        self.cursor = 0;
        self.selected_set = selected_set;
        self.file_name = file_name;
        Ok(())
    }

    /// Remove one question's record from the ledger.
    pub fn reset_one(&mut self, question_text: &str) {
        self.ledger.reset_one(question_text);
    }

    /// Clear all answers and progress. Keeps the loaded question set.
    pub fn reset_all(&mut self) {
        self.ledger.reset_all();
        self.cursor = 0;
        self.mode = RecordingMode::Idle;
    }
}
