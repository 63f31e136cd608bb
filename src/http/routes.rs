use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session view and capture control
        .route("/session", get(handlers::get_session))
        .route("/session/capture/start", post(handlers::start_capture))
        .route("/session/capture/stop", post(handlers::stop_capture))
        .route("/session/response", post(handlers::edit_response))
        .route("/session/next", post(handlers::next_question))
        .route("/session/reset", post(handlers::reset))
        // Question set loading
        .route("/questions/load", post(handlers::load_questions))
        .route("/questions/upload", post(handlers::upload_questions))
        // Dataset export
        .route("/session/export", get(handlers::export_dataset))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
