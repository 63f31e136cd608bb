//! Capture source abstraction
//!
//! The browser/OS speech recognizer is an external collaborator. This
//! module wraps it behind the [`CaptureSource`] trait and supervises its
//! event stream:
//! - `CaptureSource::start` yields a channel of final/interim segments
//! - the event pump feeds segments into the transcript accumulator
//! - a source that ends while a capture is still active is restarted with
//!   a bounded retry policy; the fault is surfaced once retries run out

mod pump;
mod source;

pub use pump::run_pump;
pub use source::{CaptureEvent, CaptureSource, ScriptedCaptureSource};
