use thiserror::Error;

/// Failures of the external capture source (speech recognizer).
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no capture source is configured")]
    RecognizerUnavailable,

    #[error("capture source failed to start: {0}")]
    StartFailure(String),

    #[error("capture source failed to stop: {0}")]
    StopFailure(String),

    #[error("capture source reported an error: {0}")]
    Recognizer(String),

    #[error("capture source ended and could not be kept alive after {attempts} restart attempts")]
    RestartExhausted { attempts: u32 },
}

/// Errors raised by session state transitions.
///
/// None of these are fatal: the session stays interactive, the caller
/// surfaces the message and the state is unchanged (or forced back to idle
/// for capture faults).
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("a capture is already in progress; stop it before starting another")]
    CaptureInProgress,

    #[error("record the reasoning for this question before capturing its answer")]
    ReasoningRequired,

    #[error("no question set is loaded")]
    NoQuestions,
}

/// Errors from question-set loading and validation.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("question set {set:?} could not be fetched: {reason}")]
    Fetch { set: String, reason: String },

    #[error("question set has no Question column")]
    MissingQuestionColumn,

    #[error("row {row} has an empty Question field")]
    MissingQuestion { row: usize },

    #[error("question set contains no questions")]
    EmptySet,

    #[error("malformed question set: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors from dataset export encoding.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode export: {0}")]
    Csv(#[from] csv::Error),

    #[error("export produced invalid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}
