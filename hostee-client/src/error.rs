//! Client error types

use std::time::Duration;

use shared::ErrorCode;
use thiserror::Error;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Local form validation failure; no remote call is made when one occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Registration: email, password or name missing
    #[error("required fields are missing")]
    RequiredFields,

    /// Login: email or password blank
    #[error("email and password are required")]
    MissingCredentials,

    #[error("password and confirmation do not match")]
    PasswordMismatch,

    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    #[error("subscription path must not be empty")]
    EmptyPath,
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::RequiredFields | Self::MissingCredentials => ErrorCode::RequiredField,
            Self::PasswordMismatch => ErrorCode::PasswordMismatch,
            Self::PasswordTooShort => ErrorCode::PasswordTooShort,
            Self::EmptyPath => ErrorCode::FeedPathInvalid,
        }
    }

    /// Message shown to staff
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RequiredFields => "Por favor completa los campos obligatorios",
            Self::MissingCredentials => "Por favor completa todos los campos",
            Self::PasswordMismatch => "Las contraseñas no coinciden",
            Self::PasswordTooShort => "La contraseña debe tener al menos 6 caracteres",
            Self::EmptyPath => "No se indicó qué datos observar",
        }
    }
}

/// Reason an auth call was rejected by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("no account for this email")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("malformed email")]
    InvalidEmail,

    #[error("account disabled")]
    UserDisabled,

    #[error("too many requests")]
    TooManyRequests,

    #[error("email already in use")]
    EmailAlreadyInUse,

    #[error("password rejected as too weak")]
    WeakPassword,

    #[error("auth failure: {0}")]
    Other(String),
}

impl AuthFailure {
    /// Map a backend reason code to a failure
    ///
    /// Accepts both REST reason codes (`EMAIL_NOT_FOUND`, optionally followed
    /// by ` : detail`) and SDK-style codes (`auth/user-not-found`).
    pub fn from_code(code: &str) -> Self {
        let reason = code.split(" : ").next().unwrap_or(code).trim();
        match reason {
            "EMAIL_NOT_FOUND" | "auth/user-not-found" => Self::UserNotFound,
            "INVALID_PASSWORD" | "auth/wrong-password" => Self::WrongPassword,
            "INVALID_EMAIL" | "auth/invalid-email" => Self::InvalidEmail,
            "USER_DISABLED" | "auth/user-disabled" => Self::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" | "auth/too-many-requests" => Self::TooManyRequests,
            "EMAIL_EXISTS" | "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            "WEAK_PASSWORD" | "auth/weak-password" => Self::WeakPassword,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UserNotFound => ErrorCode::AccountNotFound,
            Self::WrongPassword => ErrorCode::InvalidCredentials,
            Self::InvalidEmail => ErrorCode::InvalidEmail,
            Self::UserDisabled => ErrorCode::AccountDisabled,
            Self::TooManyRequests => ErrorCode::TooManyAttempts,
            Self::EmailAlreadyInUse => ErrorCode::EmailAlreadyInUse,
            Self::WeakPassword => ErrorCode::PasswordTooShort,
            Self::Other(_) => ErrorCode::Unknown,
        }
    }

    /// Message shown to staff
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UserNotFound => "No existe una cuenta con este correo",
            Self::WrongPassword => "Contraseña incorrecta",
            Self::InvalidEmail => "Correo electrónico inválido",
            Self::UserDisabled => "Esta cuenta ha sido deshabilitada",
            Self::TooManyRequests => "Demasiados intentos. Intenta más tarde",
            Self::EmailAlreadyInUse => "Ya existe una cuenta con este correo",
            Self::WeakPassword => "La contraseña debe tener al menos 6 caracteres",
            Self::Other(_) => "Error al iniciar sesión. Verifica tus credenciales",
        }
    }
}

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local validation rejected the input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Auth service rejected the credentials
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    /// Operation needs a signed-in user
    #[error("Authentication required")]
    NotAuthenticated,

    /// Document store unreachable or write rejected
    #[error("Document store error: {0}")]
    Store(String),

    /// Remote call did not resolve in time
    #[error("{operation} timed out after {elapsed:?}")]
    Timeout {
        operation: &'static str,
        elapsed: Duration,
    },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Validation(e) => e.code(),
            Self::Auth(e) => e.code(),
            Self::NotAuthenticated => ErrorCode::NotAuthenticated,
            Self::Store(_) => ErrorCode::DatabaseError,
            Self::Timeout { .. } => ErrorCode::TimeoutError,
            Self::InvalidResponse(_) => ErrorCode::InvalidFormat,
            Self::Config(_) => ErrorCode::ConfigError,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<ClientError> for shared::AppError {
    fn from(err: ClientError) -> Self {
        let app = shared::AppError::with_message(err.code(), err.to_string());
        match err {
            ClientError::Timeout { operation, elapsed } => app
                .with_detail("operation", operation)
                .with_detail("elapsed_ms", elapsed.as_millis() as u64),
            ClientError::Auth(AuthFailure::Other(reason)) => app.with_detail("reason", reason),
            _ => app,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_from_rest_codes() {
        assert_eq!(AuthFailure::from_code("EMAIL_NOT_FOUND"), AuthFailure::UserNotFound);
        assert_eq!(AuthFailure::from_code("INVALID_PASSWORD"), AuthFailure::WrongPassword);
        assert_eq!(AuthFailure::from_code("USER_DISABLED"), AuthFailure::UserDisabled);
        assert_eq!(
            AuthFailure::from_code(
                "TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled"
            ),
            AuthFailure::TooManyRequests
        );
        assert_eq!(
            AuthFailure::from_code("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthFailure::WeakPassword
        );
    }

    #[test]
    fn test_auth_failure_from_sdk_codes() {
        assert_eq!(AuthFailure::from_code("auth/invalid-email"), AuthFailure::InvalidEmail);
        assert_eq!(
            AuthFailure::from_code("auth/email-already-in-use"),
            AuthFailure::EmailAlreadyInUse
        );
    }

    #[test]
    fn test_unknown_auth_code_is_other() {
        let failure = AuthFailure::from_code("INVALID_LOGIN_CREDENTIALS");
        assert_eq!(failure, AuthFailure::Other("INVALID_LOGIN_CREDENTIALS".into()));
        assert_eq!(
            failure.user_message(),
            "Error al iniciar sesión. Verifica tus credenciales"
        );
    }

    #[test]
    fn test_client_error_codes() {
        assert_eq!(
            ClientError::from(ValidationError::PasswordMismatch).code(),
            ErrorCode::PasswordMismatch
        );
        assert_eq!(
            ClientError::from(AuthFailure::UserDisabled).code(),
            ErrorCode::AccountDisabled
        );
        let timeout = ClientError::Timeout {
            operation: "sign_in",
            elapsed: Duration::from_secs(15),
        };
        assert!(timeout.is_timeout());
        assert_eq!(timeout.code(), ErrorCode::TimeoutError);
        assert_eq!(timeout.to_string(), "sign_in timed out after 15s");
    }

    #[test]
    fn test_into_app_error() {
        let app: shared::AppError = ClientError::NotAuthenticated.into();
        assert_eq!(app.code, ErrorCode::NotAuthenticated);
        assert_eq!(app.message, "Authentication required");
    }

    #[test]
    fn test_into_app_error_details() {
        let app: shared::AppError = ClientError::Timeout {
            operation: "load_profile",
            elapsed: Duration::from_millis(1500),
        }
        .into();
        let details = app.details.unwrap();
        assert_eq!(details["operation"], "load_profile");
        assert_eq!(details["elapsed_ms"], 1500);

        let app: shared::AppError =
            ClientError::from(AuthFailure::Other("INVALID_LOGIN_CREDENTIALS".into())).into();
        assert_eq!(app.code, ErrorCode::Unknown);
        assert_eq!(app.details.unwrap()["reason"], "INVALID_LOGIN_CREDENTIALS");
    }
}
