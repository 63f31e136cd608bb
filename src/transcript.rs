use serde::{Deserialize, Serialize};

/// A single hypothesis from the capture source.
///
/// Final segments are immutable and appended permanently; an interim
/// segment is superseded by the next segment of either kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSegment {
    /// Transcribed text
    pub text: String,

    /// Whether this hypothesis is final (immutable) or interim
    pub is_final: bool,
}

impl SpeechSegment {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// Folds a stream of final/interim speech segments into one finalized
/// string per capture session.
///
/// Purely a fold over the event sequence: no timing or restart awareness.
/// The caller must invoke [`reset`](Self::reset) at the start of every
/// capture session, otherwise text leaks across questions and fields.
#[derive(Debug, Clone, Default)]
pub struct TranscriptAccumulator {
    /// All committed (final) segments since the last reset
    committed: Vec<String>,

    /// Latest interim hypothesis, superseded by every new segment
    interim: String,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one segment from the capture source.
    pub fn push(&mut self, segment: &SpeechSegment) {
        if segment.is_final {
            let text = segment.text.trim();
            if !text.is_empty() {
                self.committed.push(text.to_string());
            }
            self.interim.clear();
        } else {
            self.interim = segment.text.trim().to_string();
        }
    }

    /// Live preview: committed text followed by the latest interim
    /// hypothesis. Idempotent and side-effect free.
    pub fn current_text(&self) -> String {
        let committed = self.committed.join(" ");
        format!("{} {}", committed, self.interim).trim().to_string()
    }

    /// Clear both the committed text and the interim buffer.
    pub fn reset(&mut self) {
        self.committed.clear();
        self.interim.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty() && self.interim.is_empty()
    }
}
