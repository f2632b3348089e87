// hostee-client/src/backend/identity.rs
// 认证服务 - 邮箱密码登录与注册 (Identity Toolkit REST)

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use shared::models::Session;

use super::AuthService;
use super::http::HttpTransport;
use crate::{AuthFailure, ClientConfig, ClientResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthReply {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    /// Seconds, sent as a string
    #[serde(default)]
    expires_in: Option<String>,
}

impl AuthReply {
    fn into_session(self, requested_email: &str) -> Session {
        let email = self.email.unwrap_or_else(|| requested_email.to_string());
        let mut session = Session::new(self.local_id, email, self.id_token);
        if let Some(token) = self.refresh_token {
            session = session.with_refresh_token(token);
        }
        if let Some(secs) = self.expires_in.and_then(|s| s.parse::<i64>().ok()) {
            session = session.with_expires_at(Utc::now() + ChronoDuration::seconds(secs));
        }
        session
    }
}

/// Email/password auth over the Identity Toolkit REST API
#[derive(Debug, Clone)]
pub struct IdentityToolkitAuth {
    http: HttpTransport,
    base_url: String,
    api_key: String,
}

impl IdentityToolkitAuth {
    pub fn new(http: HttpTransport, config: &ClientConfig) -> Self {
        Self {
            http,
            base_url: config.auth_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/accounts:{}?key={}", self.base_url, action, self.api_key)
    }

    async fn exchange(&self, action: &str, email: &str, password: &str) -> ClientResult<Session> {
        let body = CredentialsRequest {
            email,
            password,
            return_secure_token: true,
        };
        let request = self.http.post(&self.endpoint(action)).json(&body);
        match self.http.send(request).await? {
            Ok(response) => {
                let reply: AuthReply = HttpTransport::decode(response).await?;
                Ok(reply.into_session(email))
            }
            Err(rejection) => Err(AuthFailure::from_code(&rejection.message).into()),
        }
    }
}

#[async_trait]
impl AuthService for IdentityToolkitAuth {
    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        self.exchange("signInWithPassword", email, password).await
    }

    async fn create_account(&self, email: &str, password: &str) -> ClientResult<Session> {
        self.exchange("signUp", email, password).await
    }

    /// Tokens are stateless bearer tokens; forgetting them is the sign-out
    async fn sign_out(&self, session: &Session) -> ClientResult<()> {
        tracing::debug!(uid = %session.uid, "Discarding identity tokens");
        Ok(())
    }
}
