//! Error codes for the academy backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in Problem Details responses.

use core::fmt;

/// Centralized error codes for the academy backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Token signature valid but past its expiration
    TokenExpired,
    /// Bad signature, malformed payload, wrong type or missing claims
    TokenInvalid,
    /// Authenticated, but the role does not allow the operation
    Forbidden,

    // Request Validation
    /// Semantically corrupt input (e.g. a non-UUID subject claim)
    ValidationError,
    /// General bad request error
    BadRequest,
    /// Refresh request without a refresh token
    MissingRefreshToken,

    // Throttling
    /// Too many requests from one client within the window
    RateLimited,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::Forbidden => "FORBIDDEN",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::MissingRefreshToken => "MISSING_REFRESH_TOKEN",

            Self::RateLimited => "RATE_LIMITED",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
