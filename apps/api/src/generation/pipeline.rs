//! Pipeline orchestration — sequences validation, prompt building, the
//! service round trip, and response parsing for each stage, and owns every
//! SessionState result-field mutation.
//!
//! Stages run strictly sequentially within one user action. A stage failure
//! is local to that stage: it lands in `error_message` and never invalidates
//! results an unrelated prior stage already stored.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::analysis::parse_analysis;
use crate::generation::prompts::{
    build_analysis_prompt, build_cover_letter_prompt, build_improvement_prompt,
    COVER_LETTER_SYSTEM, RESUME_ANALYSIS_SYSTEM, RESUME_IMPROVEMENT_SYSTEM,
};
use crate::generation::validation::{
    validate_input, MAX_INPUT_LEN, MAX_PARAGRAPHS, MIN_PARAGRAPHS,
};
use crate::llm_client::{CompletionBackend, CompletionRequest};
use crate::session::SessionState;

/// Sampling temperature for every stage.
const TEMPERATURE: f32 = 0.7;

/// Tone used when the caller leaves the field empty.
pub const DEFAULT_TONE: &str = "professional job seeker wants to convey enthusiasm \
    for the next role and excited to match past experiences with future expectations";

/// Cover letter layout variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum LetterStyle {
    #[default]
    Normal,
    #[serde(rename = "T-Style")]
    TStyle,
}

/// One cover letter submission. Built per user action, discarded after use.
#[derive(Debug, Clone, Deserialize)]
pub struct LetterRequest {
    pub job_description: String,
    pub resume: String,
    #[serde(default = "default_paragraph_count")]
    pub paragraph_count: u8,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default)]
    pub style: LetterStyle,
}

fn default_paragraph_count() -> u8 {
    3
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

/// Pre-entry validation. A failure here aborts the stage before any prompt
/// is built or any service call is made, and leaves the session untouched.
fn validate_letter_request(request: &LetterRequest) -> Result<(), AppError> {
    validate_input(&request.job_description, MAX_INPUT_LEN)
        .map_err(|e| AppError::Validation(format!("Job Description: {e}")))?;
    validate_input(&request.resume, MAX_INPUT_LEN)
        .map_err(|e| AppError::Validation(format!("Resume: {e}")))?;
    if !(MIN_PARAGRAPHS..=MAX_PARAGRAPHS).contains(&request.paragraph_count) {
        return Err(AppError::Validation(format!(
            "paragraph_count must be between {MIN_PARAGRAPHS} and {MAX_PARAGRAPHS}"
        )));
    }
    Ok(())
}

/// Stage 1 — cover letter generation.
///
/// On success `generated_letter` is overwritten and `edited_letter` is
/// re-seeded to a copy of it, discarding any in-progress edits. On a service
/// failure the letter is cleared and `error_message` carries the cause.
/// Analysis results from earlier actions survive either outcome.
pub async fn generate_cover_letter(
    backend: &dyn CompletionBackend,
    session: &mut SessionState,
    request: LetterRequest,
) -> Result<(), AppError> {
    validate_letter_request(&request)?;

    let prompt = build_cover_letter_prompt(&request);
    let api_key = session.api_key().to_owned();
    info!(
        style = ?request.style,
        paragraphs = request.paragraph_count,
        "Generating cover letter"
    );

    let completion = backend
        .complete(
            &api_key,
            CompletionRequest {
                system: COVER_LETTER_SYSTEM,
                prompt: &prompt,
                temperature: TEMPERATURE,
                json_response: false,
            },
        )
        .await;

    match completion {
        Ok(letter) => {
            session.generated_letter = letter;
            session.edited_letter = session.generated_letter.clone();
            session.error_message.clear();
        }
        Err(e) => {
            warn!("Cover letter generation failed: {e}");
            session.error_message = format!("Error generating cover letter: {e}");
            session.generated_letter.clear();
        }
    }

    Ok(())
}

/// Stage 2 — resume analysis, automatically chained into stage 3 on success.
///
/// A service failure or a schema decode failure sets `error_message` only;
/// letter fields and any previously stored analysis survive. The rewrite
/// never runs without a fresh successful analysis.
pub async fn analyze_resume(
    backend: &dyn CompletionBackend,
    session: &mut SessionState,
    resume: &str,
) -> Result<(), AppError> {
    validate_input(resume, MAX_INPUT_LEN)
        .map_err(|e| AppError::Validation(format!("Resume: {e}")))?;

    let prompt = build_analysis_prompt(resume);
    let api_key = session.api_key().to_owned();
    info!("Analyzing resume");

    let completion = backend
        .complete(
            &api_key,
            CompletionRequest {
                system: RESUME_ANALYSIS_SYSTEM,
                prompt: &prompt,
                temperature: TEMPERATURE,
                json_response: true,
            },
        )
        .await;

    let raw = match completion {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Resume analysis failed: {e}");
            session.error_message = format!("Error analyzing resume: {e}");
            return Ok(());
        }
    };

    // Schema failures are reported distinctly from service failures
    match parse_analysis(&raw) {
        Ok(analysis) => {
            session.analysis = Some(analysis);
            session.error_message.clear();
        }
        Err(e) => {
            warn!("Resume analysis response failed to decode: {e}");
            session.error_message = e.to_string();
            return Ok(());
        }
    }

    // Stage 3 — chained rewrite, fed the raw analysis text
    improve_resume(backend, session, resume, &raw).await;
    Ok(())
}

/// Stage 3 — rewrites the resume against the raw analysis text. Its failure
/// surfaces in `error_message` without invalidating the stored analysis.
async fn improve_resume(
    backend: &dyn CompletionBackend,
    session: &mut SessionState,
    resume: &str,
    analysis_text: &str,
) {
    let prompt = build_improvement_prompt(resume, analysis_text);
    let api_key = session.api_key().to_owned();
    info!("Generating improved resume");

    let completion = backend
        .complete(
            &api_key,
            CompletionRequest {
                system: RESUME_IMPROVEMENT_SYSTEM,
                prompt: &prompt,
                temperature: TEMPERATURE,
                json_response: false,
            },
        )
        .await;

    match completion {
        Ok(improved) => {
            session.improved_resume = improved;
        }
        Err(e) => {
            warn!("Improved resume generation failed: {e}");
            session.error_message = format!("Error generating improved resume: {e}");
            session.improved_resume.clear();
        }
    }
}
