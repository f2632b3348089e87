//! Unified error codes for Hostee
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 7xxx: Table / realtime feed errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values so UI shells in other languages can switch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (wrong password)
    InvalidCredentials = 1002,
    /// Account is disabled
    AccountDisabled = 1007,
    /// No account registered for the email
    AccountNotFound = 1008,
    /// Email address is malformed
    InvalidEmail = 1009,
    /// Too many attempts, backend is rate limiting
    TooManyAttempts = 1010,
    /// Email already registered
    EmailAlreadyInUse = 1011,
    /// Password shorter than the minimum length
    PasswordTooShort = 1012,
    /// Password and confirmation differ
    PasswordMismatch = 1013,

    // ==================== 7xxx: Table ====================
    /// Realtime feed path is empty or malformed
    FeedPathInvalid = 7102,

    // ==================== 9xxx: System ====================
    /// Document store error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::AccountDisabled => "Account is disabled",
            ErrorCode::AccountNotFound => "No account exists for this email",
            ErrorCode::InvalidEmail => "Email address is invalid",
            ErrorCode::TooManyAttempts => "Too many attempts, try again later",
            ErrorCode::EmailAlreadyInUse => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password must be at least 6 characters",
            ErrorCode::PasswordMismatch => "Passwords do not match",

            // Table
            ErrorCode::FeedPathInvalid => "Realtime feed path is invalid",

            // System
            ErrorCode::DatabaseError => "Document store error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a u16 does not map to any [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ErrorCode::Unknown),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1007 => Ok(ErrorCode::AccountDisabled),
            1008 => Ok(ErrorCode::AccountNotFound),
            1009 => Ok(ErrorCode::InvalidEmail),
            1010 => Ok(ErrorCode::TooManyAttempts),
            1011 => Ok(ErrorCode::EmailAlreadyInUse),
            1012 => Ok(ErrorCode::PasswordTooShort),
            1013 => Ok(ErrorCode::PasswordMismatch),

            7102 => Ok(ErrorCode::FeedPathInvalid),

            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
