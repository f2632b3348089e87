//! Builder for [`HosteeClient`] construction.
//!
//! Backends left unset are created from the configuration as HTTP clients
//! of the hosted services, so a fully configured builder needs nothing but
//! [`HosteeClientBuilder::config`].

use std::sync::Arc;

use crate::backend::{
    AuthService, DocumentStore, FirestoreStore, HttpTransport, IdentityToolkitAuth, MemoryBackend,
    PollingFeed, RealtimeFeed,
};
use crate::client::HosteeClient;
use crate::session::AuthContext;
use crate::{ClientConfig, ClientError, ClientResult};

/// Builder for `HosteeClient`.
///
/// # Example
///
/// ```
/// use hostee_client::{HosteeClient, MemoryBackend};
///
/// let backend = MemoryBackend::new();
/// let client = HosteeClient::builder()
///     .memory(&backend)
///     .build()
///     .expect("memory backends need no configuration");
/// assert!(client.session().is_none());
/// ```
#[derive(Default)]
pub struct HosteeClientBuilder {
    config: Option<ClientConfig>,
    auth: Option<AuthContext>,
    auth_service: Option<Arc<dyn AuthService>>,
    documents: Option<Arc<dyn DocumentStore>>,
    feed: Option<Arc<dyn RealtimeFeed>>,
}

impl HosteeClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing auth context instead of starting signed out
    pub fn auth_context(mut self, auth: AuthContext) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn auth_service(mut self, service: Arc<dyn AuthService>) -> Self {
        self.auth_service = Some(service);
        self
    }

    pub fn document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.documents = Some(store);
        self
    }

    pub fn realtime_feed(mut self, feed: Arc<dyn RealtimeFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Use `backend` for all three services
    pub fn memory(self, backend: &MemoryBackend) -> Self {
        self.auth_service(Arc::new(backend.clone()))
            .document_store(Arc::new(backend.clone()))
            .realtime_feed(Arc::new(backend.clone()))
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` when an HTTP backend has to be created
    /// and the configuration is incomplete.
    pub fn build(self) -> ClientResult<HosteeClient> {
        let config = self.config.unwrap_or_default();
        let needs_http =
            self.auth_service.is_none() || self.documents.is_none() || self.feed.is_none();

        let http = if needs_http {
            config.validate()?;
            Some(
                HttpTransport::new(config.request_timeout).map_err(|e| {
                    ClientError::Config(format!("Failed to create HTTP client: {e}"))
                })?,
            )
        } else {
            None
        };

        // 未指定的后端使用 HTTP 实现
        let auth_service: Arc<dyn AuthService> = match (self.auth_service, &http) {
            (Some(service), _) => service,
            (None, Some(http)) => Arc::new(IdentityToolkitAuth::new(http.clone(), &config)),
            (None, None) => return Err(ClientError::Config("auth_service is required".into())),
        };
        let documents: Arc<dyn DocumentStore> = match (self.documents, &http) {
            (Some(store), _) => store,
            (None, Some(http)) => Arc::new(FirestoreStore::new(http.clone(), &config)),
            (None, None) => return Err(ClientError::Config("document_store is required".into())),
        };
        let feed: Arc<dyn RealtimeFeed> = match (self.feed, &http) {
            (Some(feed), _) => feed,
            (None, Some(http)) => Arc::new(PollingFeed::new(http.clone(), &config)),
            (None, None) => return Err(ClientError::Config("realtime_feed is required".into())),
        };

        tracing::debug!(
            project_id = %config.project_id,
            http = needs_http,
            "Hostee client built"
        );
        Ok(HosteeClient::with_backends(
            config,
            self.auth.unwrap_or_default(),
            auth_service,
            documents,
            feed,
        ))
    }
}
