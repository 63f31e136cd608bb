//! HTTP API server for external control (the rendering layer)
//!
//! This module provides a REST API that the UI drives; every state
//! mutation arrives here as a discrete request:
//! - GET  /session - Current session view (questions, cursor, mode, preview)
//! - POST /session/capture/start - Begin capturing a field by voice
//! - POST /session/capture/stop - Stop capturing and commit
//! - POST /session/response - Typed edit of a field
//! - POST /session/next - Advance to the next question
//! - POST /session/reset - Reset one question or the whole session
//! - POST /questions/load - Load a built-in question set
//! - POST /questions/upload - Load an uploaded CSV question set
//! - GET  /session/export - Download the dataset as CSV
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
