pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session gate
        .route("/api/v1/session", get(handlers::handle_get_session))
        .route(
            "/api/v1/session/consent",
            post(handlers::handle_accept_consent),
        )
        // Cover letter pipeline
        .route(
            "/api/v1/letters/generate",
            post(handlers::handle_generate_letter),
        )
        .route(
            "/api/v1/letters/edited",
            patch(handlers::handle_edit_letter),
        )
        // Resume critique + rewrite pipeline
        .route(
            "/api/v1/resumes/analyze",
            post(handlers::handle_analyze_resume),
        )
        .with_state(state)
}
