//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::StoreNotFound => StatusCode::NOT_FOUND,

            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // Missing parameters, undecodable bodies and unknown sites are
            // all problems with the request itself
            Self::InvalidFormat | Self::RequiredField | Self::SiteNotFound => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        assert_eq!(
            ErrorCode::StoreNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ErrorCode::RequiredField.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidFormat.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::SiteNotFound.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
