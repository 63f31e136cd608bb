//! Response session management
//!
//! This module owns the session state machine and its async supervisor:
//! - `SessionState`: pure, single-threaded core — recording-mode
//!   transitions, cursor movement, ledger commits, completion predicate
//! - `SessionManager`: drives a `SessionState` from capture events and
//!   API calls, supervises the capture source, and mirrors every
//!   mutation to the snapshot store
//! - `SessionView`: serializable status report for the API surface

mod manager;
mod state;
mod stats;

pub use manager::SessionManager;
pub use state::{RecordingMode, SessionState};
pub use stats::SessionView;
