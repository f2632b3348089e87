//! Error types

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Carries a standardized [`ErrorCode`], a developer-facing message and
/// optional structured details (field names, backend reason codes).
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }
}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

/// Result alias using [`AppError`]
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::AccountDisabled);
        assert_eq!(err.code, ErrorCode::AccountDisabled);
        assert_eq!(err.message, "Account is disabled");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::RequiredField)
            .with_detail("field", "email")
            .with_detail("min", 6);
        let details = err.details.unwrap();
        assert_eq!(details.get("field"), Some(&Value::from("email")));
        assert_eq!(details.get("min"), Some(&Value::from(6)));
    }

    #[test]
    fn test_app_error_from_code() {
        let err: AppError = ErrorCode::NotAuthenticated.into();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
        assert_eq!(err.message, "User is not authenticated");
    }

    #[test]
    fn test_app_error_display_and_serialize() {
        let err = AppError::with_message(ErrorCode::TimeoutError, "sign-in timed out");
        assert_eq!(err.to_string(), "sign-in timed out");

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], 9004);
        assert!(json.get("details").is_none());
    }
}
