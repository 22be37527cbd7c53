//! Input validation error model.

use thiserror::Error;

/// Result type used for form/value validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A value supplied by a caller failed validation.
///
/// These are raised before anything is sent to the backend, so they never
/// carry transport details.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty or whitespace.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A field was present but malformed.
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
