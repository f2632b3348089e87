// hostee-client/src/session.rs
// 认证上下文 - 显式传递的当前会话

use std::sync::{Arc, PoisonError, RwLock};

use shared::models::Session;

use crate::{ClientError, ClientResult};

/// Holder of the signed-in session
///
/// Cloning shares the same slot. Only sign-in, sign-up and sign-out write it;
/// everything else reads.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current session, if any
    pub fn current(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current session or [`ClientError::NotAuthenticated`]
    pub fn require(&self) -> ClientResult<Session> {
        self.current().ok_or(ClientError::NotAuthenticated)
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub(crate) fn set(&self, session: Session) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Returns the session that was cleared
    pub(crate) fn clear(&self) -> Option<Session> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
