//! Error codes for the guessr backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the string in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,

    // Request Validation
    InvalidLatitude,
    InvalidLongitude,
    InvalidRoundDuration,
    InvalidGameMode,
    /// Game is not in `pending`
    GameNotPending,
    /// Game is not in `in_progress`
    GameNotInProgress,
    /// All rounds already played
    GameAlreadyCompleted,
    RoundNotPending,
    RoundNotInProgress,
    /// General validation error
    ValidationError,
    /// Malformed request (body, path, headers)
    BadRequest,

    // Resource Not Found
    GameNotFound,
    RoundNotFound,
    MapNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Player already has an unfinished game
    ActiveGameExists,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbUnavailable,
    /// Gateway timeout while running a unit of work
    DbTimeout,
    /// Unit of work cancelled before completion
    RequestCancelled,
    DataCorruption,
    ConfigError,
    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// The exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",

            Self::InvalidLatitude => "INVALID_LATITUDE",
            Self::InvalidLongitude => "INVALID_LONGITUDE",
            Self::InvalidRoundDuration => "INVALID_ROUND_DURATION",
            Self::InvalidGameMode => "INVALID_GAME_MODE",
            Self::GameNotPending => "GAME_NOT_PENDING",
            Self::GameNotInProgress => "GAME_NOT_IN_PROGRESS",
            Self::GameAlreadyCompleted => "GAME_ALREADY_COMPLETED",
            Self::RoundNotPending => "ROUND_NOT_PENDING",
            Self::RoundNotInProgress => "ROUND_NOT_IN_PROGRESS",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::MapNotFound => "MAP_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::ActiveGameExists => "ACTIVE_GAME_EXISTS",
            Self::Conflict => "CONFLICT",

            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::RequestCancelled => "REQUEST_CANCELLED",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
