//! Input validation — gates every stage before a prompt is built or a
//! service call is made.

use thiserror::Error;

/// Maximum accepted length for pasted job descriptions and resumes,
/// in characters (not bytes).
pub const MAX_INPUT_LEN: usize = 75_000;

pub const MIN_PARAGRAPHS: u8 = 1;
pub const MAX_PARAGRAPHS: u8 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Input cannot be empty")]
    Empty,

    #[error("Input exceeds maximum length of {max} characters")]
    TooLong { max: usize },
}

/// Validates input text length and content. Side-effect-free.
pub fn validate_input(text: &str, max_length: usize) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if text.chars().count() > max_length {
        return Err(ValidationError::TooLong { max: max_length });
    }
    Ok(())
}
