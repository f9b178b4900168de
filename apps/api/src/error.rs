//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! Domain errors from libris-core keep their kind all the way to the wire:
//! the response body is `{code, message}` and the status follows the kind,
//! so the frontend can show "no copies available" instead of a generic
//! failure. Nothing is translated into a catch-all 500 except genuine
//! internal-consistency faults.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use libris_core::CoreError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "UNAVAILABLE",
///   "message": "No copies of book 3f2e... are available"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Referenced id does not exist (404)
    NotFound,

    /// Input validation failed before any mutation (400)
    ValidationError,

    /// Borrow requested with zero available copies (422)
    Unavailable,

    /// Return of an already-returned loan (422)
    InvalidState,

    /// Delete or shrink blocked by outstanding loans (409)
    Conflict,

    /// Internal-consistency fault (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unavailable => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InvalidState => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }
}

/// Converts domain errors to API errors, preserving kind and message.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::BookNotFound(_)
            | CoreError::UserNotFound(_)
            | CoreError::LoanNotFound(_) => ErrorCode::NotFound,
            CoreError::NoCopiesAvailable { .. } => ErrorCode::Unavailable,
            CoreError::AlreadyReturned { .. } => ErrorCode::InvalidState,
            CoreError::ActiveLoans { .. } | CoreError::QuantityBelowLoans { .. } => {
                ErrorCode::Conflict
            }
            CoreError::InvariantViolation { .. } => {
                tracing::error!(%err, "Internal consistency fault surfaced to API");
                ErrorCode::Internal
            }
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };

        ApiError::new(code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unavailable.status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::Conflict.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_core_error_keeps_its_message() {
        let err: ApiError = CoreError::NoCopiesAvailable {
            book_id: "b-1".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::Unavailable);
        assert_eq!(err.message, "No copies of book b-1 are available");
    }

    #[test]
    fn test_conflict_kinds() {
        let err: ApiError = CoreError::ActiveLoans {
            entity: "User",
            id: "u-1".to_string(),
            count: 1,
        }
        .into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = CoreError::QuantityBelowLoans {
            book_id: "b-1".to_string(),
            requested: 1,
            on_loan: 2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::Conflict);
    }
}
