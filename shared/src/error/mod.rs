//! Unified error system for the store service
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error type carrying a code and a message
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 3xxx: Site errors
//! - 6xxx: Store errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::required_field("API site is a mandatory attribute");
//! assert_eq!(err.code, ErrorCode::RequiredField);
//! assert_eq!(err.http_status(), shared::http::StatusCode::BAD_REQUEST);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ERROR_CODE_HEADER};
