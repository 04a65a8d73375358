use thiserror::Error;

/// Errors that can occur while building a normalization config or normalizing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("invalid replacement spec: {0}")]
    InvalidReplacementSpec(String),
    #[error("invalid replacement pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl NormalizeError {
    pub(crate) fn invalid_pattern(pattern: &str, err: &regex::Error) -> Self {
        NormalizeError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}
