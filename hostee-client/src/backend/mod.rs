//! Backend seams
//!
//! The hosted backend is three opaque collaborators. Each is a trait so the
//! client can run against the real services over HTTP or against the
//! in-process [`MemoryBackend`] used by tests and demos.

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{Fields, Session};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::ClientResult;

mod firestore;
mod http;
mod identity;
mod memory;
mod polling;

pub use firestore::FirestoreStore;
pub use http::HttpTransport;
pub use identity::IdentityToolkitAuth;
pub use memory::MemoryBackend;
pub use polling::PollingFeed;

/// Events buffered per subscription before producers wait
pub(crate) const FEED_BUFFER: usize = 64;

/// Email/password authentication service
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<Session>;

    async fn create_account(&self, email: &str, password: &str) -> ClientResult<Session>;

    async fn sign_out(&self, session: &Session) -> ClientResult<()>;
}

/// Document database keyed by collection and document id
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when the document does not exist
    async fn get_document(
        &self,
        session: &Session,
        collection: &str,
        id: &str,
    ) -> ClientResult<Option<Fields>>;

    /// Write `fields`; with `merge` only the given fields are replaced,
    /// otherwise the whole document is
    async fn set_document(
        &self,
        session: &Session,
        collection: &str,
        id: &str,
        fields: Fields,
        merge: bool,
    ) -> ClientResult<()>;
}

/// Push-based realtime data source
#[async_trait]
pub trait RealtimeFeed: Send + Sync {
    /// Open an independent subscription to `path`
    ///
    /// The first event is the current value of the path. Every later event
    /// is a complete snapshot or a disruption notice.
    async fn subscribe(&self, session: Option<&Session>, path: &str)
    -> ClientResult<Subscription>;
}

/// Event delivered on a subscription
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Full value of the watched path; `Null` when nothing is written there
    Snapshot(Value),
    /// The source could not deliver; later snapshots may follow
    Disconnected(String),
}

/// Live subscription to a realtime path
///
/// Dropping the subscription cancels it; [`Subscription::cancel`] does the
/// same explicitly and may be called any number of times.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    path: String,
    events: mpsc::Receiver<FeedEvent>,
    cancel: CancellationToken,
}

impl Subscription {
    pub fn new(
        path: impl Into<String>,
        events: mpsc::Receiver<FeedEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            events,
            cancel,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Next event; `None` once cancelled or when the producer has gone away
    pub async fn recv(&mut self) -> Option<FeedEvent> {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            event = self.events.recv() => event,
        }
    }

    /// Next already-delivered event, without waiting
    pub fn try_recv(&mut self) -> Option<FeedEvent> {
        if self.cancel.is_cancelled() {
            return None;
        }
        self.events.try_recv().ok()
    }

    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(path = %self.path, id = %self.id, "Cancelling feed subscription");
            self.cancel.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Reject empty paths before any remote call
pub(crate) fn validate_path(path: &str) -> ClientResult<()> {
    if path.trim().is_empty() {
        return Err(crate::ValidationError::EmptyPath.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_subscription_recv_and_cancel() {
        let (tx, rx) = mpsc::channel(4);
        let cancel = CancellationToken::new();
        let mut sub = Subscription::new("/", rx, cancel.clone());

        tx.send(FeedEvent::Snapshot(json!({}))).await.unwrap();
        assert_eq!(sub.recv().await, Some(FeedEvent::Snapshot(json!({}))));

        sub.cancel();
        sub.cancel();
        assert!(cancel.is_cancelled());

        // Producer side may still push; the subscription no longer yields
        let _ = tx.send(FeedEvent::Snapshot(json!({ "a": 1 }))).await;
        assert_eq!(sub.recv().await, None);
        assert_eq!(sub.try_recv(), None);
    }

    #[tokio::test]
    async fn test_drop_cancels_token() {
        let (_tx, rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();
        drop(Subscription::new("/", rx, cancel.clone()));
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("/").is_ok());
        assert!(validate_path("mesas").is_ok());
        assert!(matches!(
            validate_path("  "),
            Err(crate::ClientError::Validation(crate::ValidationError::EmptyPath))
        ));
    }
}
