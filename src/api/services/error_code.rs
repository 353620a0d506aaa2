//! Unified API error codes

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::PortfolioError;

/// API error code enum
///
/// Serialized as a number via serde_repr. Grouped by thousands:
/// - 0: success
/// - 1000-1099: generic errors
/// - 2000-2099: auth errors
/// - 3000-3099: content errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // Generic errors 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // Auth errors 2000-2099
    AuthFailed = 2000,
    TokenExpired = 2001,
    TokenInvalid = 2002,
    RateLimitExceeded = 2004,

    // Content errors 3000-3099
    ResourceNotFound = 3000,
    ResourceAlreadyExists = 3001,
    InvalidPayload = 3002,
    DatabaseError = 3005,
}

impl From<&PortfolioError> for ErrorCode {
    fn from(err: &PortfolioError) -> Self {
        match err {
            PortfolioError::Validation(_) => ErrorCode::InvalidPayload,
            PortfolioError::NotFound(_) => ErrorCode::ResourceNotFound,
            PortfolioError::Unauthorized(_) => ErrorCode::Unauthorized,
            PortfolioError::DatabaseConfig(_)
            | PortfolioError::DatabaseConnection(_)
            | PortfolioError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            _ => ErrorCode::InternalServerError,
        }
    }
}
