use super::state::AppState;
use crate::error::{CaptureError, SessionError};
use crate::export::{encode_csv, export_file_name};
use crate::ledger::RecordField;
use crate::questions::set_label;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartCaptureRequest {
    /// Which field of the current question to capture
    pub field: RecordField,
}

#[derive(Debug, Deserialize)]
pub struct EditResponseRequest {
    pub field: RecordField,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    /// Question to reset; when absent the whole session is reset
    pub question: Option<String>,

    /// Must be true for a full reset (irreversible)
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoadQuestionsRequest {
    /// Name of the built-in set, e.g. "extended_questionnaire.csv"
    pub set: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuestionsRequest {
    /// Original file name; persisted as a label only
    pub file_name: String,

    /// Raw CSV text of the uploaded file
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct LoadQuestionsResponse {
    pub label: String,
    pub question_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn session_error_response(e: SessionError) -> axum::response::Response {
    let status = match &e {
        SessionError::Capture(CaptureError::RecognizerUnavailable) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        SessionError::Capture(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SessionError::Load(_) => StatusCode::BAD_REQUEST,
        SessionError::CaptureInProgress
        | SessionError::ReasoningRequired
        | SessionError::NoQuestions => StatusCode::CONFLICT,
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /session
/// Current session view, including the live transcript preview
pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    let mut manager = state.manager.lock().await;
    Json(manager.view().await).into_response()
}

/// POST /session/capture/start
/// Begin capturing the requested field of the current question
pub async fn start_capture(
    State(state): State<AppState>,
    Json(req): Json<StartCaptureRequest>,
) -> impl IntoResponse {
    let mut manager = state.manager.lock().await;
    match manager.start_capture(req.field).await {
        Ok(()) => Json(manager.view().await).into_response(),
        Err(e) => {
            error!("Failed to start capture: {}", e);
            session_error_response(e)
        }
    }
}

/// POST /session/capture/stop
/// Stop the active capture and commit the transcript
pub async fn stop_capture(State(state): State<AppState>) -> impl IntoResponse {
    let mut manager = state.manager.lock().await;
    match manager.stop_capture().await {
        Ok(_) => Json(manager.view().await).into_response(),
        Err(e) => {
            error!("Failed to stop capture: {}", e);
            session_error_response(e)
        }
    }
}

/// POST /session/response
/// Typed edit of one field of the current question
pub async fn edit_response(
    State(state): State<AppState>,
    Json(req): Json<EditResponseRequest>,
) -> impl IntoResponse {
    let mut manager = state.manager.lock().await;
    match manager.edit_field(req.field, &req.text).await {
        Ok(()) => Json(manager.view().await).into_response(),
        Err(e) => session_error_response(e),
    }
}

/// POST /session/next
/// Advance to the next question (clamped at the last one)
pub async fn next_question(State(state): State<AppState>) -> impl IntoResponse {
    let mut manager = state.manager.lock().await;
    match manager.next_question().await {
        Ok(_) => Json(manager.view().await).into_response(),
        Err(e) => session_error_response(e),
    }
}

/// POST /session/reset
/// Reset one question's record, or the whole session (confirm required)
pub async fn reset(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> impl IntoResponse {
    let mut manager = state.manager.lock().await;
    match req.question {
        Some(question) => {
            manager.reset_one(&question).await;
            Json(manager.view().await).into_response()
        }
        None if req.confirm => {
            manager.reset_all().await;
            Json(manager.view().await).into_response()
        }
        None => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "resetting the whole session requires confirm: true".to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /questions/load
/// Fetch and load a built-in question set
pub async fn load_questions(
    State(state): State<AppState>,
    Json(req): Json<LoadQuestionsRequest>,
) -> impl IntoResponse {
    let content = match state.fetcher.fetch(&req.set).await {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to fetch question set {}: {}", req.set, e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let label = set_label(&req.set);
    let mut manager = state.manager.lock().await;
    match manager.load_csv(&content, Some(label.clone()), None).await {
        Ok(question_count) => {
            info!("Loaded question set {} ({} questions)", label, question_count);
            Json(LoadQuestionsResponse {
                label,
                question_count,
            })
            .into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// POST /questions/upload
/// Load an uploaded CSV question set; only the file name is persisted
pub async fn upload_questions(
    State(state): State<AppState>,
    Json(req): Json<UploadQuestionsRequest>,
) -> impl IntoResponse {
    let label = set_label(&req.file_name);
    let mut manager = state.manager.lock().await;
    match manager
        .load_csv(&req.content, None, Some(req.file_name.clone()))
        .await
    {
        Ok(question_count) => {
            info!(
                "Loaded uploaded question set {} ({} questions)",
                req.file_name, question_count
            );
            Json(LoadQuestionsResponse {
                label,
                question_count,
            })
            .into_response()
        }
        Err(e) => session_error_response(e),
    }
}

/// GET /session/export
/// Full re-encode of the ledger as a CSV download
pub async fn export_dataset(State(state): State<AppState>) -> impl IntoResponse {
    let manager = state.manager.lock().await;
    let session = manager.session();

    match encode_csv(session.questions(), session.ledger(), state.export_layout) {
        Ok(csv) => {
            let file_name = export_file_name(session.selected_set());
            (
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file_name),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => {
            error!("Export failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
