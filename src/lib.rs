pub mod capture;
pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod ledger;
pub mod persist;
pub mod questions;
pub mod session;
pub mod transcript;

pub use capture::{CaptureEvent, CaptureSource, ScriptedCaptureSource};
pub use config::Config;
pub use error::{CaptureError, ExportError, LoadError, SessionError};
pub use export::{encode_csv, export_file_name, ExportLayout};
pub use http::{create_router, AppState};
pub use ledger::{RecordField, ResponseLedger, ResponseRecord};
pub use persist::{Snapshot, SnapshotStore};
pub use questions::{parse_question_set, AssetFetcher, Question, SetFetcher};
pub use session::{RecordingMode, SessionManager, SessionState, SessionView};
pub use transcript::{SpeechSegment, TranscriptAccumulator};
