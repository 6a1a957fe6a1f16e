//! Error responses for the HTTP layer.
//!
//! Every failure is rendered with the same envelope:
//!
//! ```json
//! {"error": {"message": "...", "type": "validation_error", "details": [...]}}
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::framework::FetchError;
use crate::record::{ErrorDetail, ValidationErrors};

/// Errors a handler can turn into an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body decoded as JSON but violated the record's rules.
    #[error("Request validation failed")]
    Validation(#[from] ValidationErrors),

    /// The body was not JSON, or not sent as JSON.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// The concurrent fetch failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidBody(JsonRejection::MissingJsonContentType(_)) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::InvalidBody(_) => "invalid_request_error",
            ApiError::Fetch(_) => "fetch_error",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type")]
    error_type: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<ErrorDetail>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = match &self {
            ApiError::Validation(errors) => errors.details(),
            _ => Vec::new(),
        };
        warn!(status = status.as_u16(), error = %self, violations = details.len(), "Request failed");

        let body = ErrorResponse {
            error: ErrorBody {
                message: self.to_string(),
                error_type: self.error_type(),
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
