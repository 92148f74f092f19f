//! # Error Handling Middleware
//!
//! Maps engine errors to HTTP status codes and JSON error responses so
//! every endpoint reports failures consistently. Schedule validation
//! failures additionally carry the structured, index-addressed conflict
//! diagnostics so a form layer can map them back to the offending rows.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use slotbook_core::errors::EngineError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps [`EngineError`] and implements `IntoResponse` to
/// convert it into an HTTP response with the appropriate status code and
/// JSON payload.
#[derive(Debug)]
pub struct AppError(pub EngineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes. Upstream maps to 503 so
        // fail-safe-closed is observable and distinct from a correctly
        // computed empty slot list.
        let status = match &self.0 {
            EngineError::NotFound(_) => StatusCode::NOT_FOUND,
            EngineError::InvalidParameter(_) | EngineError::Precondition(_) => {
                StatusCode::BAD_REQUEST
            }
            EngineError::InvalidTimezone(_) | EngineError::InvalidSchedule(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            EngineError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        // Get the error message and format as JSON, attaching structured
        // diagnostics when the schedule failed validation.
        let message = self.0.to_string();
        let body = match &self.0 {
            EngineError::InvalidSchedule(conflicts) => {
                Json(json!({ "error": message, "conflicts": conflicts }))
            }
            _ => Json(json!({ "error": message })),
        };

        (status, body).into_response()
    }
}

/// Allows using the `?` operator with functions returning
/// `Result<T, EngineError>` in handlers returning `Result<T, AppError>`.
impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError(err)
    }
}
