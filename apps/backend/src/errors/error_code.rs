//! Error codes for the roshambo API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All codes
//! are SCREAMING_SNAKE_CASE and map 1:1 to the strings in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// Hand is not rock, paper, or scissors
    InvalidHand,
    /// Username fails the length rule
    InvalidUsername,
    /// General validation error
    ValidationError,
    /// Malformed request body or query
    BadRequest,

    // Resource Not Found
    /// Player not found
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Username already registered
    UsernameTaken,
    /// Player changed concurrently
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Foreign key constraint violation
    FkViolation,
    /// Check constraint violation
    CheckViolation,
    /// Data corruption detected
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidHand => "INVALID_HAND",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::DataCorruption => "DATA_CORRUPTION",
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
