//! Hostee Client - staff app core over the hosted backend
//!
//! Account flows, the staff profile document and a live mirror of table
//! status. The backend is reached through three traits ([`AuthService`],
//! [`DocumentStore`], [`RealtimeFeed`]) with HTTP implementations for the
//! hosted services and an in-process [`MemoryBackend`].

pub mod accounts;
pub mod alerts;
pub mod backend;
pub mod builder;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod notice;
pub mod profile;
pub mod session;
pub mod settings;
pub mod tables;
pub mod view;

pub use accounts::{Accounts, LoginForm, RegistrationForm};
pub use alerts::{AlertSource, MockAlertSource};
pub use backend::{
    AuthService, DocumentStore, FeedEvent, FirestoreStore, HttpTransport, IdentityToolkitAuth,
    MemoryBackend, PollingFeed, RealtimeFeed, Subscription,
};
pub use builder::HosteeClientBuilder;
pub use client::HosteeClient;
pub use config::ClientConfig;
pub use dashboard::{DashboardHeader, greeting_for_hour};
pub use error::{AuthFailure, ClientError, ClientResult, MIN_PASSWORD_LEN, ValidationError};
pub use notice::{Action, Notice, NoticeKind};
pub use profile::{Loaded, Profiles};
pub use session::AuthContext;
pub use settings::{HelpTopic, Preferences};
pub use tables::{TableStatusView, Tables};
pub use view::{FeedState, RemoteCollectionView};

// Re-export shared models for convenience
pub use shared::models::{
    AlertPriority, ProfileDraft, ProfileField, ProfilePatch, Session, StaffStats, TableAlert,
    TableState, TableStatus, TableSummary, UserProfile,
};
