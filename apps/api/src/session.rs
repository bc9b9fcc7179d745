//! Session store — the gate and memory for every pipeline stage.
//!
//! One session per process, created empty at startup and discarded at exit.
//! Result fields are mutated only by the pipeline; `edited_letter` is the one
//! field the user mutates directly.

use serde::Serialize;
use thiserror::Error;

use crate::generation::analysis::ResumeAnalysis;

/// Consent gate. The session starts in `AwaitingConsent` and there is no
/// transition back: once the disclaimer is accepted with a usable credential,
/// the session stays `Ready` for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentGate {
    AwaitingConsent,
    Ready,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsentError {
    #[error("Please enter your API key to proceed")]
    MissingCredential,
}

/// All session-lifetime state. Fields are mutually independent except
/// `edited_letter`, which is re-seeded from `generated_letter` (a copy, not
/// an alias) on every successful letter generation.
#[derive(Debug)]
pub struct SessionState {
    pub generated_letter: String,
    pub edited_letter: String,
    pub error_message: String,
    pub analysis: Option<ResumeAnalysis>,
    pub improved_resume: String,
    /// The service credential. Kept private so it can only leave through
    /// `api_key()` — it is never serialized and never logged.
    api_key: String,
    consent: ConsentGate,
}

impl SessionState {
    /// Creates a fresh gated session. The environment credential, if any, is
    /// consumed here once; later lookups go through the session value only.
    pub fn new(env_api_key: Option<&str>) -> Self {
        Self {
            generated_letter: String::new(),
            edited_letter: String::new(),
            error_message: String::new(),
            analysis: None,
            improved_resume: String::new(),
            api_key: resolve_credential("", env_api_key).unwrap_or_default(),
            consent: ConsentGate::AwaitingConsent,
        }
    }

    pub fn consent(&self) -> ConsentGate {
        self.consent
    }

    pub fn is_ready(&self) -> bool {
        self.consent == ConsentGate::Ready
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// The explicit accept action. A key supplied with the accept overrides
    /// the session value; the transition requires a non-empty credential
    /// either way.
    pub fn accept_consent(&mut self, provided_key: Option<&str>) -> Result<(), ConsentError> {
        if let Some(key) = provided_key {
            if !key.trim().is_empty() {
                self.api_key = key.trim().to_string();
            }
        }

        if self.api_key.is_empty() {
            return Err(ConsentError::MissingCredential);
        }

        self.consent = ConsentGate::Ready;
        Ok(())
    }
}

/// Credential resolution with fixed priority: the session-provided value
/// wins; the environment value is a fallback only when the session value is
/// empty or whitespace.
pub fn resolve_credential(session_value: &str, env_value: Option<&str>) -> Option<String> {
    let session_value = session_value.trim();
    if !session_value.is_empty() {
        return Some(session_value.to_string());
    }
    env_value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
