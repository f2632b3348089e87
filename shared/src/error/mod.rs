//! Unified error system for Hostee
//!
//! - [`ErrorCode`]: Standardized error codes for all client-observed failures
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors (local validation included)
//! - 1xxx: Authentication errors
//! - 7xxx: Table / realtime feed errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::AccountNotFound);
//! assert_eq!(err.code.code(), 1008);
//!
//! let err = AppError::new(ErrorCode::RequiredField)
//!     .with_detail("field", "email");
//! assert!(err.details.is_some());
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
