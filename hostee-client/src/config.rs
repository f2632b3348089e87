//! Client configuration

use std::time::Duration;

use crate::{ClientError, ClientResult};

pub const DEFAULT_AUTH_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

/// Client configuration for connecting to the hosted backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Web API key of the backend project
    pub api_key: String,

    /// Backend project id (document database namespace)
    pub project_id: String,

    /// Auth service base URL
    pub auth_url: String,

    /// Document store base URL
    pub firestore_url: String,

    /// Realtime database base URL; derived from the project id when unset
    pub realtime_url: Option<String>,

    /// Upper bound for every one-shot remote call
    pub request_timeout: Duration,

    /// How often the HTTP feed re-reads a watched path
    pub poll_interval: Duration,

    /// Collection holding profile documents
    pub users_collection: String,

    /// Realtime path holding table status records
    pub tables_path: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            firestore_url: DEFAULT_FIRESTORE_URL.to_string(),
            realtime_url: None,
            request_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_secs(2),
            users_collection: shared::models::USERS_COLLECTION.to_string(),
            tables_path: "/".to_string(),
        }
    }

    /// Read configuration from `HOSTEE_*` environment variables
    ///
    /// `HOSTEE_API_KEY` and `HOSTEE_PROJECT_ID` are required; everything else
    /// falls back to the defaults of [`ClientConfig::new`].
    pub fn from_env() -> ClientResult<Self> {
        let api_key = std::env::var("HOSTEE_API_KEY")
            .map_err(|_| ClientError::Config("HOSTEE_API_KEY must be set".into()))?;
        let project_id = std::env::var("HOSTEE_PROJECT_ID")
            .map_err(|_| ClientError::Config("HOSTEE_PROJECT_ID must be set".into()))?;

        let mut config = Self::new(api_key, project_id);
        if let Ok(url) = std::env::var("HOSTEE_AUTH_URL") {
            config.auth_url = url;
        }
        if let Ok(url) = std::env::var("HOSTEE_FIRESTORE_URL") {
            config.firestore_url = url;
        }
        config.realtime_url = std::env::var("HOSTEE_REALTIME_URL").ok();
        if let Some(secs) = env_parse::<u64>("HOSTEE_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = env_parse::<u64>("HOSTEE_POLL_INTERVAL_MS")? {
            config.poll_interval = Duration::from_millis(ms);
        }
        if let Ok(collection) = std::env::var("HOSTEE_USERS_COLLECTION") {
            config.users_collection = collection;
        }
        if let Ok(path) = std::env::var("HOSTEE_TABLES_PATH") {
            config.tables_path = path;
        }
        Ok(config)
    }

    /// Set the auth service base URL
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Set the document store base URL
    pub fn with_firestore_url(mut self, url: impl Into<String>) -> Self {
        self.firestore_url = url.into();
        self
    }

    /// Set the realtime database base URL
    pub fn with_realtime_url(mut self, url: impl Into<String>) -> Self {
        self.realtime_url = Some(url.into());
        self
    }

    /// Set the one-shot call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the feed polling interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the realtime path of table records
    pub fn with_tables_path(mut self, path: impl Into<String>) -> Self {
        self.tables_path = path.into();
        self
    }

    /// Realtime database URL, explicit or `https://{project}-default-rtdb.firebaseio.com`
    pub fn realtime_base_url(&self) -> String {
        self.realtime_url
            .clone()
            .unwrap_or_else(|| format!("https://{}-default-rtdb.firebaseio.com", self.project_id))
    }

    /// Check the fields the HTTP backends cannot work without
    pub fn validate(&self) -> ClientResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ClientError::Config("api_key is required".into()));
        }
        if self.project_id.trim().is_empty() {
            return Err(ClientError::Config("project_id is required".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(ClientError::Config("request_timeout must be positive".into()));
        }
        if self.poll_interval.is_zero() {
            return Err(ClientError::Config("poll_interval must be positive".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("", "hostee")
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> ClientResult<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ClientError::Config(format!("{key} is not a valid number: {raw}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("key", "hostee2");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.users_collection, "users");
        assert_eq!(config.tables_path, "/");
        assert_eq!(
            config.realtime_base_url(),
            "https://hostee2-default-rtdb.firebaseio.com"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("key", "hostee2")
            .with_timeout(Duration::from_secs(3))
            .with_poll_interval(Duration::from_millis(250))
            .with_realtime_url("http://localhost:9000")
            .with_tables_path("/mesas");

        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.realtime_base_url(), "http://localhost:9000");
        assert_eq!(config.tables_path, "/mesas");
    }

    #[test]
    fn test_config_validate() {
        assert!(matches!(
            ClientConfig::default().validate(),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("key", "p").with_timeout(Duration::ZERO).validate(),
            Err(ClientError::Config(_))
        ));
    }
}
