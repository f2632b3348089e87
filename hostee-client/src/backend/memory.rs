// hostee-client/src/backend/memory.rs
// 内存后端 - 同进程模拟认证、文档存储和实时数据

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{Fields, Session};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::{
    AuthService, DocumentStore, FEED_BUFFER, FeedEvent, RealtimeFeed, Subscription, validate_path,
};
use crate::{AuthFailure, ClientError, ClientResult, MIN_PASSWORD_LEN};

/// Consecutive wrong passwords before sign-in is rate limited
const MAX_FAILED_ATTEMPTS: u32 = 5;

#[derive(Debug)]
struct Account {
    uid: String,
    email: String,
    password: String,
    disabled: bool,
    failed_attempts: u32,
}

#[derive(Debug, Default)]
struct Inner {
    /// lowercase email -> account
    accounts: Mutex<HashMap<String, Account>>,
    /// collection -> id -> fields
    documents: Mutex<HashMap<String, HashMap<String, Fields>>>,
    /// normalized path -> latest event
    paths: Mutex<HashMap<String, watch::Sender<FeedEvent>>>,
    remote_calls: AtomicUsize,
    store_offline: AtomicBool,
    stalled: AtomicBool,
}

/// In-process backend implementing all three collaborators
///
/// Cheap to clone; clones share state. Besides the trait operations it
/// offers hooks to drive the feed (`push`, `disconnect`) and to inject
/// failures (`set_store_offline`, `set_stalled`, `disable_account`).
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Inner>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `/mesas/` and `mesas` both become `/mesas`; root stays `/`
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{trimmed}")
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total calls received through the backend traits
    pub fn remote_calls(&self) -> usize {
        self.inner.remote_calls.load(Ordering::SeqCst)
    }

    /// Make every document operation fail as if the store were unreachable
    pub fn set_store_offline(&self, offline: bool) {
        self.inner.store_offline.store(offline, Ordering::SeqCst);
    }

    /// Make every trait call hang forever
    pub fn set_stalled(&self, stalled: bool) {
        self.inner.stalled.store(stalled, Ordering::SeqCst);
    }

    /// Returns false when no account exists for `email`
    pub fn disable_account(&self, email: &str) -> bool {
        match lock(&self.inner.accounts).get_mut(&email.to_lowercase()) {
            Some(account) => {
                account.disabled = true;
                true
            }
            None => false,
        }
    }

    /// Stored document, read without counting as a remote call
    pub fn document(&self, collection: &str, id: &str) -> Option<Fields> {
        lock(&self.inner.documents)
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    /// Seed a document without counting as a remote call
    pub fn put_document(&self, collection: &str, id: &str, fields: Fields) {
        lock(&self.inner.documents)
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields);
    }

    /// Publish a full snapshot to every subscriber of `path`
    pub fn push(&self, path: &str, value: Value) {
        tracing::debug!(path, "Memory feed push");
        self.sender(path).send_replace(FeedEvent::Snapshot(value));
    }

    /// Signal a disruption to every subscriber of `path`
    pub fn disconnect(&self, path: &str, reason: impl Into<String>) {
        self.sender(path)
            .send_replace(FeedEvent::Disconnected(reason.into()));
    }

    /// Open subscriptions on `path`
    pub fn subscriber_count(&self, path: &str) -> usize {
        lock(&self.inner.paths)
            .get(&normalize_path(path))
            .map_or(0, |tx| tx.receiver_count())
    }

    fn sender(&self, path: &str) -> watch::Sender<FeedEvent> {
        lock(&self.inner.paths)
            .entry(normalize_path(path))
            .or_insert_with(|| watch::channel(FeedEvent::Snapshot(Value::Null)).0)
            .clone()
    }

    /// Count the call and honor the stall switch
    async fn enter(&self) {
        self.inner.remote_calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }

    fn check_store(&self) -> ClientResult<()> {
        if self.inner.store_offline.load(Ordering::SeqCst) {
            return Err(ClientError::Store("document store unavailable".into()));
        }
        Ok(())
    }

    fn issue_session(account: &Account) -> Session {
        Session::new(
            account.uid.clone(),
            account.email.clone(),
            format!("mem-{}", Uuid::new_v4()),
        )
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session> {
        self.enter().await;
        if !is_valid_email(email) {
            return Err(AuthFailure::InvalidEmail.into());
        }

        let mut accounts = lock(&self.inner.accounts);
        let account = accounts
            .get_mut(&email.to_lowercase())
            .ok_or(AuthFailure::UserNotFound)?;

        if account.disabled {
            return Err(AuthFailure::UserDisabled.into());
        }
        if account.failed_attempts >= MAX_FAILED_ATTEMPTS {
            return Err(AuthFailure::TooManyRequests.into());
        }
        if account.password != password {
            account.failed_attempts += 1;
            return Err(AuthFailure::WrongPassword.into());
        }

        account.failed_attempts = 0;
        Ok(Self::issue_session(account))
    }

    async fn create_account(&self, email: &str, password: &str) -> ClientResult<Session> {
        self.enter().await;
        if !is_valid_email(email) {
            return Err(AuthFailure::InvalidEmail.into());
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthFailure::WeakPassword.into());
        }

        let mut accounts = lock(&self.inner.accounts);
        let key = email.to_lowercase();
        if accounts.contains_key(&key) {
            return Err(AuthFailure::EmailAlreadyInUse.into());
        }

        let account = Account {
            uid: Uuid::new_v4().simple().to_string(),
            email: email.to_string(),
            password: password.to_string(),
            disabled: false,
            failed_attempts: 0,
        };
        let session = Self::issue_session(&account);
        accounts.insert(key, account);
        Ok(session)
    }

    async fn sign_out(&self, session: &Session) -> ClientResult<()> {
        self.enter().await;
        tracing::debug!(uid = %session.uid, "Memory auth sign-out");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn get_document(
        &self,
        _session: &Session,
        collection: &str,
        id: &str,
    ) -> ClientResult<Option<Fields>> {
        self.enter().await;
        self.check_store()?;
        Ok(self.document(collection, id))
    }

    async fn set_document(
        &self,
        _session: &Session,
        collection: &str,
        id: &str,
        fields: Fields,
        merge: bool,
    ) -> ClientResult<()> {
        self.enter().await;
        self.check_store()?;

        let mut documents = lock(&self.inner.documents);
        let docs = documents.entry(collection.to_string()).or_default();
        if merge {
            docs.entry(id.to_string()).or_default().extend(fields);
        } else {
            docs.insert(id.to_string(), fields);
        }
        Ok(())
    }
}

#[async_trait]
impl RealtimeFeed for MemoryBackend {
    async fn subscribe(
        &self,
        _session: Option<&Session>,
        path: &str,
    ) -> ClientResult<Subscription> {
        self.enter().await;
        validate_path(path)?;

        let mut watch_rx = self.sender(path).subscribe();
        let (tx, rx) = mpsc::channel(FEED_BUFFER);
        let cancel = CancellationToken::new();

        // Current value first, so a new subscriber never waits for the next push
        let initial = watch_rx.borrow_and_update().clone();
        let _ = tx.try_send(initial);

        let token = cancel.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    changed = watch_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let event = watch_rx.borrow_and_update().clone();
                        tokio::select! {
                            _ = token.cancelled() => break,
                            sent = tx.send(event) => {
                                if sent.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                }
            }
        });

        Ok(Subscription::new(normalize_path(path), rx, cancel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("mesas"), "/mesas");
        assert_eq!(normalize_path("/mesas/"), "/mesas");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ana@hostee.com"));
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("@hostee.com"));
        assert!(!is_valid_email("ana@hostee"));
        assert!(!is_valid_email("ana maria@hostee.com"));
    }

    #[tokio::test]
    async fn test_account_lifecycle() {
        let backend = MemoryBackend::new();
        let created = backend.create_account("Ana@Hostee.com", "secreto").await.unwrap();

        let session = backend.sign_in("ana@hostee.com", "secreto").await.unwrap();
        assert_eq!(session.uid, created.uid);
        assert_ne!(session.id_token, created.id_token);

        let err = backend.create_account("ana@hostee.com", "otro123").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthFailure::EmailAlreadyInUse)));
    }

    #[tokio::test]
    async fn test_sign_in_failures() {
        let backend = MemoryBackend::new();
        backend.create_account("ana@hostee.com", "secreto").await.unwrap();

        let err = backend.sign_in("nadie@hostee.com", "secreto").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthFailure::UserNotFound)));

        let err = backend.sign_in("ana@hostee.com", "mal").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthFailure::WrongPassword)));

        let err = backend.sign_in("no-email", "secreto").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthFailure::InvalidEmail)));

        assert!(backend.disable_account("ana@hostee.com"));
        let err = backend.sign_in("ana@hostee.com", "secreto").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthFailure::UserDisabled)));
    }

    #[tokio::test]
    async fn test_rate_limit_after_failed_attempts() {
        let backend = MemoryBackend::new();
        backend.create_account("ana@hostee.com", "secreto").await.unwrap();

        for _ in 0..MAX_FAILED_ATTEMPTS {
            let _ = backend.sign_in("ana@hostee.com", "mal").await;
        }
        let err = backend.sign_in("ana@hostee.com", "secreto").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthFailure::TooManyRequests)));
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let backend = MemoryBackend::new();
        let err = backend.create_account("ana@hostee.com", "123").await.unwrap_err();
        assert!(matches!(err, ClientError::Auth(AuthFailure::WeakPassword)));
    }

    #[tokio::test]
    async fn test_merge_and_replace_writes() {
        let backend = MemoryBackend::new();
        let session = Session::new("u1", "ana@hostee.com", "t");
        backend
            .set_document(&session, "users", "u1", fields(json!({ "a": 1, "b": 2 })), false)
            .await
            .unwrap();
        backend
            .set_document(&session, "users", "u1", fields(json!({ "b": 3 })), true)
            .await
            .unwrap();
        assert_eq!(
            backend.document("users", "u1"),
            Some(fields(json!({ "a": 1, "b": 3 })))
        );

        backend
            .set_document(&session, "users", "u1", fields(json!({ "c": 4 })), false)
            .await
            .unwrap();
        assert_eq!(backend.document("users", "u1"), Some(fields(json!({ "c": 4 }))));

        let missing = backend.get_document(&session, "users", "u2").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_store_offline() {
        let backend = MemoryBackend::new();
        backend.set_store_offline(true);
        let session = Session::new("u1", "ana@hostee.com", "t");
        let err = backend.get_document(&session, "users", "u1").await.unwrap_err();
        assert!(matches!(err, ClientError::Store(_)));
    }

    #[tokio::test]
    async fn test_feed_delivers_current_then_pushes() {
        let backend = MemoryBackend::new();
        backend.push("/", json!({ "mesa1": { "numero": 1 } }));

        let mut sub = backend.subscribe(None, "/").await.unwrap();
        assert_eq!(
            sub.recv().await,
            Some(FeedEvent::Snapshot(json!({ "mesa1": { "numero": 1 } })))
        );

        backend.disconnect("/", "socket closed");
        assert_eq!(
            sub.recv().await,
            Some(FeedEvent::Disconnected("socket closed".into()))
        );
    }

    #[tokio::test]
    async fn test_feed_empty_path_rejected() {
        let backend = MemoryBackend::new();
        assert!(backend.subscribe(None, "").await.is_err());
    }
}
