use thiserror::Error;

use mfs_core::ValidationError;

/// Failure talking to the remote backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("invalid backend base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("network error: {0}")]
    Network(String),

    /// The backend refused the session credential (HTTP 401 on an
    /// authenticated call). Carries the backend's message.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    /// 2xx response whose envelope says `success: false`.
    #[error("{0}")]
    Rejected(String),

    #[error("unexpected backend response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Unauthorized(_))
    }
}

/// Failure of a data action: bad input (never sent) or a backend failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ActionError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ActionError::Backend(e) if e.is_unauthorized())
    }

    /// HTTP status to report for this failure.
    ///
    /// Backend 4xx statuses pass through; anything that means "the backend is
    /// unreachable or misbehaving" is a 502.
    pub fn status_code(&self) -> u16 {
        match self {
            ActionError::Validation(_) => 400,
            ActionError::Backend(BackendError::Unauthorized(_)) => 401,
            ActionError::Backend(BackendError::Api { status, .. }) if (400..500).contains(status) => *status,
            ActionError::Backend(BackendError::Rejected(_)) => 422,
            ActionError::Backend(_) => 502,
        }
    }
}

pub type ActionResult<T> = Result<T, ActionError>;
