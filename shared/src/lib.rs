//! Shared types for Hostee
//!
//! Models mirrored from the hosted backend, error codes, and small
//! utilities used by `hostee-client` and any UI shell built on top of it.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Session, TableState, TableStatus, UserProfile};
