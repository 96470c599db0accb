//! JSON response envelopes.
//!
//! # Responsibilities
//! - Serialize facts for successful requests
//! - Wrap fetch errors in an `{"error": "..."}` object
//! - Set `Content-Type: application/json` on every response

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::fact::FactError;

/// Body sent when a fetch fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&FactError> for ErrorBody {
    fn from(err: &FactError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Write `value` as a JSON response with the given status.
pub fn write_json<T: Serialize>(status: StatusCode, value: T) -> Response {
    (status, Json(value)).into_response()
}
