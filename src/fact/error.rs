//! Fetch error definitions.

use thiserror::Error;

/// Errors that can occur while fetching a fact.
#[derive(Debug, Error)]
pub enum FactError {
    /// Connecting to upstream or reading its response failed.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned status {status}")]
    Status { status: u16 },

    /// The fetch context was canceled before upstream answered.
    #[error("fetch canceled")]
    Canceled,

    /// The fetch context deadline passed before upstream answered.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// The response body is not valid JSON.
    #[error("invalid JSON body: {0}")]
    Json(#[source] serde_json::Error),

    /// The response body is JSON but not an object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A required field is absent.
    #[error("missing field '{0}'")]
    MissingField(String),

    /// A field has the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    /// The fact text is empty.
    #[error("fact text is empty")]
    EmptyText,
}

/// Coarse classification of a [`FactError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, non-success status, or the call never completed.
    Upstream,
    /// Malformed or incomplete response body.
    Decode,
}

impl FactError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FactError::Transport(_)
            | FactError::Status { .. }
            | FactError::Canceled
            | FactError::DeadlineExceeded => ErrorKind::Upstream,
            FactError::Json(_)
            | FactError::NotAnObject(_)
            | FactError::MissingField(_)
            | FactError::InvalidField { .. }
            | FactError::EmptyText => ErrorKind::Decode,
        }
    }
}

/// Result type for fact operations.
pub type FactResult<T> = Result<T, FactError>;
