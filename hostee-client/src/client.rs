// hostee-client/src/client.rs
// 客户端入口 - 持有配置、认证上下文和三个后端

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use shared::models::Session;

use crate::accounts::Accounts;
use crate::backend::{AuthService, DocumentStore, MemoryBackend, RealtimeFeed};
use crate::builder::HosteeClientBuilder;
use crate::profile::Profiles;
use crate::session::AuthContext;
use crate::tables::Tables;
use crate::{ClientConfig, ClientError, ClientResult};

/// Entry point of the staff app core
///
/// Cheap to clone; clones share the auth context and backends.
///
/// # Example
///
/// ```no_run
/// use hostee_client::{ClientConfig, HosteeClient, LoginForm};
///
/// # async fn run() -> hostee_client::ClientResult<()> {
/// let client = HosteeClient::http(ClientConfig::from_env()?)?;
/// client
///     .accounts()
///     .sign_in(&LoginForm::new("ana@hostee.com", "secreto"))
///     .await?;
/// let profile = client.profiles().load().await?;
/// println!("{}", profile.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HosteeClient {
    pub(crate) config: Arc<ClientConfig>,
    pub(crate) auth: AuthContext,
    pub(crate) auth_service: Arc<dyn AuthService>,
    pub(crate) documents: Arc<dyn DocumentStore>,
    pub(crate) feed: Arc<dyn RealtimeFeed>,
}

impl fmt::Debug for HosteeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HosteeClient")
            .field("project_id", &self.config.project_id)
            .field("signed_in", &self.auth.is_signed_in())
            .finish_non_exhaustive()
    }
}

impl HosteeClient {
    pub fn builder() -> HosteeClientBuilder {
        HosteeClientBuilder::new()
    }

    /// Client over the hosted services described by `config`
    pub fn http(config: ClientConfig) -> ClientResult<Self> {
        Self::builder().config(config).build()
    }

    /// Client over an in-process backend
    pub fn in_memory(backend: &MemoryBackend) -> Self {
        Self::with_backends(
            ClientConfig::default(),
            AuthContext::new(),
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
            Arc::new(backend.clone()),
        )
    }

    pub(crate) fn with_backends(
        config: ClientConfig,
        auth: AuthContext,
        auth_service: Arc<dyn AuthService>,
        documents: Arc<dyn DocumentStore>,
        feed: Arc<dyn RealtimeFeed>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            auth_service,
            documents,
            feed,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn auth_context(&self) -> &AuthContext {
        &self.auth
    }

    /// Signed-in session, if any
    pub fn session(&self) -> Option<Session> {
        self.auth.current()
    }

    /// Registration, sign-in and sign-out
    pub fn accounts(&self) -> Accounts<'_> {
        Accounts::new(self)
    }

    /// The signed-in user's profile document
    pub fn profiles(&self) -> Profiles<'_> {
        Profiles::new(self)
    }

    /// Live table status
    pub fn tables(&self) -> Tables<'_> {
        Tables::new(self)
    }

    /// Run a one-shot remote call under the configured timeout
    pub(crate) async fn bounded<T, F>(&self, operation: &'static str, call: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        let limit = self.config.request_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, ?limit, "Remote call timed out");
                Err(ClientError::Timeout {
                    operation,
                    elapsed: limit,
                })
            }
        }
    }
}
