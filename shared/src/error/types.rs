//! Error type and its HTTP representation

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::{HeaderName, HeaderValue, StatusCode};
use thiserror::Error;

/// Response header carrying the numeric [`ErrorCode`] of a failed request
pub const ERROR_CODE_HEADER: HeaderName = HeaderName::from_static("x-error-code");

/// Application error with a structured error code
///
/// The wire representation is the bare message as a JSON string, which is
/// what existing clients of the store API decode. The code travels in the
/// [`ERROR_CODE_HEADER`] header and selects the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// A mandatory request parameter is missing or empty
    pub fn required_field(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::RequiredField, msg)
    }

    /// The request payload could not be decoded
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, msg)
    }

    /// The site parameter names no configured site
    pub fn site_not_found(site: &str) -> Self {
        Self::with_message(ErrorCode::SiteNotFound, format!("unknown site '{site}'"))
    }

    /// No store matched the lookup
    pub fn store_not_found() -> Self {
        Self::new(ErrorCode::StoreNotFound)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        if matches!(self.code.category(), ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        let mut response = (status, Json(self.message)).into_response();
        response
            .headers_mut()
            .insert(ERROR_CODE_HEADER, HeaderValue::from(self.code.code()));
        response
    }
}
