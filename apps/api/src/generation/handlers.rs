//! Axum route handlers — thin I/O wrappers over the pipeline and session.
//! The rendering layer submits user actions here and redraws from the
//! returned session view.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::analysis::ResumeAnalysis;
use crate::generation::pipeline::{analyze_resume, generate_cover_letter, LetterRequest};
use crate::session::{ConsentGate, SessionState};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConsentRequest {
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConsentResponse {
    pub consent: ConsentGate,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume: String,
}

#[derive(Debug, Deserialize)]
pub struct EditLetterRequest {
    pub text: String,
}

/// Everything the rendering layer needs to redraw. The credential itself is
/// never serialized — only whether one is present.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub consent: ConsentGate,
    pub has_api_key: bool,
    pub generated_letter: String,
    pub edited_letter: String,
    pub error_message: String,
    pub analysis: Option<ResumeAnalysis>,
    pub improved_resume: String,
}

impl SessionView {
    fn from_session(session: &SessionState) -> Self {
        Self {
            consent: session.consent(),
            has_api_key: session.has_api_key(),
            generated_letter: session.generated_letter.clone(),
            edited_letter: session.edited_letter.clone(),
            error_message: session.error_message.clone(),
            analysis: session.analysis.clone(),
            improved_resume: session.improved_resume.clone(),
        }
    }
}

/// POST /api/v1/session/consent
///
/// The explicit accept action. Gates every other operation.
pub async fn handle_accept_consent(
    State(state): State<AppState>,
    Json(request): Json<ConsentRequest>,
) -> Result<Json<ConsentResponse>, AppError> {
    let mut session = state.session.lock().await;
    session
        .accept_consent(request.api_key.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(Json(ConsentResponse {
        consent: session.consent(),
    }))
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.lock().await;
    Json(SessionView::from_session(&session))
}

/// POST /api/v1/letters/generate
///
/// Stage 1. The session lock is held across the round trip, so at most one
/// generation request is in flight.
pub async fn handle_generate_letter(
    State(state): State<AppState>,
    Json(request): Json<LetterRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    if !session.is_ready() {
        return Err(AppError::ConsentRequired);
    }
    generate_cover_letter(state.backend.as_ref(), &mut session, request).await?;
    Ok(Json(SessionView::from_session(&session)))
}

/// PATCH /api/v1/letters/edited
///
/// The one session field the user mutates directly. The edit diverges from
/// `generated_letter` until the next successful generation re-seeds it.
pub async fn handle_edit_letter(
    State(state): State<AppState>,
    Json(request): Json<EditLetterRequest>,
) -> Result<StatusCode, AppError> {
    let mut session = state.session.lock().await;
    if !session.is_ready() {
        return Err(AppError::ConsentRequired);
    }
    session.edited_letter = request.text;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resumes/analyze
///
/// Stages 2 + 3: analysis, then the automatically chained rewrite.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.session.lock().await;
    if !session.is_ready() {
        return Err(AppError::ConsentRequired);
    }
    analyze_resume(state.backend.as_ref(), &mut session, &request.resume).await?;
    Ok(Json(SessionView::from_session(&session)))
}
