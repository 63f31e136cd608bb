use super::state::SessionState;
use super::stats::SessionView;
use crate::capture::{run_pump, CaptureSource};
use crate::error::{CaptureError, SessionError};
use crate::ledger::RecordField;
use crate::persist::SnapshotStore;
use crate::questions::{parse_question_set, set_label, Question};
use crate::session::RecordingMode;
use crate::transcript::TranscriptAccumulator;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Handle to the capture event pump for one capture session.
struct PumpHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<(Box<dyn CaptureSource>, Option<CaptureError>)>,
}

/// Drives the session state machine from capture events and API calls.
///
/// This is the single writer of session state. Every mutation is mirrored
/// to the snapshot store; capture sources are supervised with a bounded
/// restart policy and handed back when the capture session ends.
pub struct SessionManager {
    /// Session identifier for log correlation
    id: String,

    /// The pure session core
    state: SessionState,

    /// Shared with the event pump while a capture is active
    accumulator: Arc<Mutex<TranscriptAccumulator>>,

    /// The capture source, parked here between capture sessions
    capture: Option<Box<dyn CaptureSource>>,

    /// Active pump, if a capture session is running
    pump: Option<PumpHandle>,

    /// Snapshot store; `None` disables persistence (tests)
    store: Option<SnapshotStore>,

    /// Consecutive restart cap for an ended capture source
    max_restart_attempts: u32,

    /// Whether this session was restored from a snapshot
    resumed: bool,

    /// Last surfaced capture fault, shown until the next capture starts
    last_error: Option<String>,
}

impl SessionManager {
    pub fn new(max_restart_attempts: u32) -> Self {
        let id = format!("session-{}", uuid::Uuid::new_v4());
        info!("Creating response session: {}", id);
        Self {
            id,
            state: SessionState::new(),
            accumulator: Arc::new(Mutex::new(TranscriptAccumulator::new())),
            capture: None,
            pump: None,
            store: None,
            max_restart_attempts,
            resumed: false,
            last_error: None,
        }
    }

    /// Create a manager backed by the given store, restoring the stored
    /// snapshot if one exists. A corrupt snapshot is logged and ignored.
    pub async fn restore_or_new(store: SnapshotStore, max_restart_attempts: u32) -> Self {
        let mut manager = Self::new(max_restart_attempts);
        match store.load().await {
            Ok(Some(snapshot)) => {
                info!(
                    "Restoring session from snapshot: {} questions, cursor {}",
                    snapshot.questions.len(),
                    snapshot.current_question_index
                );
                let started = snapshot.current_question_index > 0 || !snapshot.responses.is_empty();
                manager.state = SessionState::from_snapshot(snapshot);
                manager.resumed = started;
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring unreadable snapshot: {:#}", e),
        }
        manager.store = Some(store);
        manager
    }

    /// Configure the capture source. Without one, voice capture fails
    /// with `RecognizerUnavailable` but typed input still works.
    pub fn set_capture_source(&mut self, source: Box<dyn CaptureSource>) {
        info!("Capture source configured: {}", source.name());
        self.capture = Some(source);
    }

    pub fn session(&self) -> &SessionState {
        &self.state
    }

    /// Start capturing the given field for the current question.
    pub async fn start_capture(&mut self, field: RecordField) -> Result<(), SessionError> {
        self.reap_pump().await;
        self.state.check_capture(field)?;

        let mut source = self
            .capture
            .take()
            .ok_or(CaptureError::RecognizerUnavailable)?;

        self.accumulator.lock().await.reset();

        let rx = match source.start().await {
            Ok(rx) => rx,
            Err(e) => {
                self.capture = Some(source);
                return Err(CaptureError::StartFailure(e.to_string()).into());
            }
        };

        self.state.begin_capture(field)?;
        self.last_error = None;

        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(run_pump(
            source,
            rx,
            Arc::clone(&self.accumulator),
            stop_rx,
            self.max_restart_attempts,
        ));
        self.pump = Some(PumpHandle { stop_tx, task });

        info!("{}: capture started ({:?})", self.id, field);
        Ok(())
    }

    /// Stop the active capture and commit the accumulated text. A stop
    /// while idle is a no-op. Returns the committed field, if any.
    pub async fn stop_capture(&mut self) -> Result<Option<RecordField>, SessionError> {
        if self.state.mode() == RecordingMode::Idle {
            return Ok(None);
        }

        if let Some(handle) = self.pump.take() {
            let _ = handle.stop_tx.send(true);
            match handle.task.await {
                Ok((source, fault)) => {
                    self.capture = Some(source);
                    if let Some(fault) = fault {
                        warn!("{}: capture ended with fault: {}", self.id, fault);
                        self.last_error = Some(fault.to_string());
                    }
                }
                Err(e) => {
                    error!("{}: capture pump panicked: {}", self.id, e);
                    self.last_error = Some(CaptureError::StopFailure(e.to_string()).to_string());
                }
            }
        }

        let text = self.accumulator.lock().await.current_text();
        let field = self.state.commit_capture(&text);
        self.persist();

        info!("{}: capture stopped ({:?})", self.id, field);
        Ok(field)
    }

    /// Typed-input path: set one field of the current question directly.
    pub async fn edit_field(&mut self, field: RecordField, text: &str) -> Result<(), SessionError> {
        self.reap_pump().await;
        self.state.edit_field(field, text)?;
        self.persist();
        Ok(())
    }

    /// Advance to the next question. Clears the transcript preview but
    /// not the ledger. Returns whether the cursor moved.
    pub async fn next_question(&mut self) -> Result<bool, SessionError> {
        self.reap_pump().await;
        let moved = self.state.next_question()?;
        self.accumulator.lock().await.reset();
        self.persist();
        Ok(moved)
    }

    /// Parse CSV text, validate it, and replace the question sequence.
    /// On any parse/validation failure the session is left untouched.
    pub async fn load_csv(
        &mut self,
        content: &str,
        selected_set: Option<String>,
        file_name: Option<String>,
    ) -> Result<usize, SessionError> {
        self.reap_pump().await;
        let questions = parse_question_set(content).map_err(SessionError::Load)?;
        let count = questions.len();
        self.replace_questions(questions, selected_set, file_name)?;
        Ok(count)
    }

    /// Replace the question sequence with an already-validated set.
    pub fn replace_questions(
        &mut self,
        questions: Vec<Question>,
        selected_set: Option<String>,
        file_name: Option<String>,
    ) -> Result<(), SessionError> {
        let label = selected_set
            .clone()
            .or_else(|| file_name.as_deref().map(set_label));
        info!(
            "{}: loaded question set {:?} ({} questions)",
            self.id,
            label.as_deref().unwrap_or("unnamed"),
            questions.len()
        );
        self.state.replace_questions(questions, label, file_name)?;
        self.persist();
        Ok(())
    }

    /// Remove one question's record.
    pub async fn reset_one(&mut self, question_text: &str) {
        self.reap_pump().await;
        self.state.reset_one(question_text);
        self.persist();
    }

    /// Clear all answers and progress, and delete the stored snapshot.
    /// The caller confirms destructive intent before invoking.
    pub async fn reset_all(&mut self) {
        self.reap_pump().await;
        self.state.reset_all();
        self.accumulator.lock().await.reset();
        self.resumed = false;
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                warn!("{}: failed to delete snapshot: {:#}", self.id, e);
            }
        }
        info!("{}: session reset", self.id);
    }

    /// Current status report, including the live transcript preview.
    pub async fn view(&mut self) -> SessionView {
        self.reap_pump().await;
        let live_preview = self.accumulator.lock().await.current_text();
        SessionView {
            session_id: self.id.clone(),
            selected_set: self.state.selected_set().map(String::from),
            file_name: self.state.file_name().map(String::from),
            question_count: self.state.questions().len(),
            cursor: self.state.cursor(),
            current_question: self.state.current_question().cloned(),
            current_record: self.state.current_record().cloned(),
            answered_count: self.state.answered_count(),
            mode: self.state.mode(),
            live_preview,
            complete: self.state.is_complete(),
            resumed: self.resumed,
            recognizer_available: self.capture.is_some() || self.pump.is_some(),
            last_error: self.last_error.clone(),
        }
    }

    /// Reap a pump that ended on its own (restart policy exhausted or a
    /// hard recognizer fault). Forces the mode back to idle, commits
    /// whatever text had accumulated so speech is not lost, and surfaces
    /// the fault.
    async fn reap_pump(&mut self) {
        let finished = self
            .pump
            .as_ref()
            .map(|h| h.task.is_finished())
            .unwrap_or(false);
        if !finished {
            return;
        }

        let handle = self.pump.take().expect("pump checked above");
        match handle.task.await {
            Ok((source, fault)) => {
                self.capture = Some(source);
                if let Some(fault) = fault {
                    warn!("{}: capture source gave up: {}", self.id, fault);
                    self.last_error = Some(fault.to_string());
                }
            }
            Err(e) => {
                error!("{}: capture pump panicked: {}", self.id, e);
                self.last_error = Some(e.to_string());
            }
        }

        let text = self.accumulator.lock().await.current_text();
        self.state.commit_capture(&text);
        self.persist();
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            store.save_background(self.state.snapshot());
        }
    }
}
