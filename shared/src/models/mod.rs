//! Data models
//!
//! Local mirrors of documents owned by the hosted backend. Field names on the
//! wire are the backend's (Spanish) names, mapped with `serde(rename)`.

pub mod alert;
pub mod session;
pub mod table_status;
pub mod user_profile;

// Re-exports
pub use alert::*;
pub use session::*;
pub use table_status::*;
pub use user_profile::*;

/// Field mapping of a remote document
pub type Fields = serde_json::Map<String, serde_json::Value>;
