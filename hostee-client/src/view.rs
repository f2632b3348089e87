//! Live mirror of a remote keyed collection
//!
//! A [`RemoteCollectionView`] owns one feed subscription. Every snapshot the
//! feed delivers replaces the local mapping in full: ids missing from the new
//! snapshot disappear, nothing is merged. Events are applied when the owner
//! pulls them with [`RemoteCollectionView::next_update`] or
//! [`RemoteCollectionView::drain_pending`], so the mapping only changes under
//! `&mut self`. Records that do not decode are left out of the mapping and
//! counted in [`RemoteCollectionView::skipped`].
//!
//! ```text
//! open() ──> Connecting ──snapshot──> Live <──┐
//!                │                      │     │ snapshot
//!                └──disruption──> Disconnected┘
//!
//! unsubscribe() / drop ──> Closed (entries frozen)
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::models::Session;
use uuid::Uuid;

use crate::ClientResult;
use crate::backend::{FeedEvent, RealtimeFeed, Subscription, validate_path};

/// Connection state of a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    /// Subscribed, no snapshot yet
    Connecting,
    /// Entries reflect the latest snapshot
    Live,
    /// The source reported a problem; entries are the last good snapshot
    Disconnected { reason: String },
    /// Unsubscribed; terminal
    Closed,
}

#[derive(Debug)]
pub struct RemoteCollectionView<T> {
    path: String,
    subscription: Option<Subscription>,
    entries: BTreeMap<String, T>,
    state: FeedState,
    snapshots: u64,
    skipped: usize,
}

impl<T: DeserializeOwned> RemoteCollectionView<T> {
    /// Subscribe to `path` and start in [`FeedState::Connecting`]
    pub async fn open(
        feed: &dyn RealtimeFeed,
        session: Option<&Session>,
        path: &str,
    ) -> ClientResult<Self> {
        validate_path(path)?;
        let subscription = feed.subscribe(session, path).await?;
        tracing::debug!(path, id = %subscription.id(), "View subscribed");
        Ok(Self::from_subscription(subscription))
    }

    pub fn from_subscription(subscription: Subscription) -> Self {
        Self {
            path: subscription.path().to_string(),
            subscription: Some(subscription),
            entries: BTreeMap::new(),
            state: FeedState::Connecting,
            snapshots: 0,
            skipped: 0,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn is_live(&self) -> bool {
        self.state == FeedState::Live
    }

    pub fn is_closed(&self) -> bool {
        self.state == FeedState::Closed
    }

    /// Current mapping `id -> value`
    pub fn entries(&self) -> &BTreeMap<String, T> {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshots applied so far
    pub fn snapshot_count(&self) -> u64 {
        self.snapshots
    }

    /// Entries of the latest snapshot that could not be decoded
    ///
    /// Non-zero means the mapping is missing records the source holds.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Live with every entry of the latest snapshot decoded
    pub fn is_complete(&self) -> bool {
        self.is_live() && self.skipped == 0
    }

    pub fn subscription_id(&self) -> Option<Uuid> {
        self.subscription.as_ref().map(Subscription::id)
    }

    /// Wait for the next event and apply it
    ///
    /// Returns `false` once the view is closed or the source has gone away;
    /// in the latter case the state becomes `Disconnected`.
    pub async fn next_update(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        match subscription.recv().await {
            Some(event) => {
                self.apply(event);
                true
            }
            None => {
                if !subscription.is_cancelled() {
                    self.mark_disconnected("feed ended".to_string());
                }
                false
            }
        }
    }

    /// Apply every already-delivered event without waiting; returns how many
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.subscription.as_mut().and_then(Subscription::try_recv) {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Release the subscription
    ///
    /// Returns `true` only for the call that actually released it; later
    /// calls are no-ops. Entries stay as they were.
    pub fn unsubscribe(&mut self) -> bool {
        match self.subscription.take() {
            Some(subscription) => {
                subscription.cancel();
                self.state = FeedState::Closed;
                tracing::debug!(path = %self.path, "View unsubscribed");
                true
            }
            None => false,
        }
    }

    /// Release the subscription and discard the view
    pub fn close(mut self) {
        self.unsubscribe();
    }

    fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Snapshot(value) => match decode_snapshot::<T>(&self.path, value) {
                Some(decoded) => {
                    self.entries = decoded.entries;
                    self.skipped = decoded.skipped;
                    self.snapshots += 1;
                    self.state = FeedState::Live;
                    if self.skipped > 0 {
                        tracing::warn!(
                            path = %self.path,
                            entries = self.entries.len(),
                            skipped = self.skipped,
                            "Snapshot applied with undecodable entries"
                        );
                    } else {
                        tracing::debug!(path = %self.path, entries = self.entries.len(), "Snapshot applied");
                    }
                }
                None => self.mark_disconnected("unexpected snapshot payload".to_string()),
            },
            FeedEvent::Disconnected(reason) => self.mark_disconnected(reason),
        }
    }

    fn mark_disconnected(&mut self, reason: String) {
        tracing::warn!(path = %self.path, %reason, "Feed disrupted, keeping last snapshot");
        self.state = FeedState::Disconnected { reason };
    }
}

struct Decoded<T> {
    entries: BTreeMap<String, T>,
    skipped: usize,
}

/// Snapshot payload to a full mapping
///
/// `null` is an empty collection. Arrays appear when ids are small integers
/// and map index to id. Entries that fail to decode are left out and counted.
/// `None` when the payload is not a collection at all.
fn decode_snapshot<T: DeserializeOwned>(path: &str, value: Value) -> Option<Decoded<T>> {
    let pairs: Vec<(String, Value)> = match value {
        Value::Null => Vec::new(),
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => return None,
    };

    let mut decoded = Decoded {
        entries: BTreeMap::new(),
        skipped: 0,
    };
    for (id, raw) in pairs {
        match serde_json::from_value::<T>(raw) {
            Ok(value) => {
                decoded.entries.insert(id, value);
            }
            Err(e) => {
                tracing::warn!(path, %id, error = %e, "Skipping malformed entry");
                decoded.skipped += 1;
            }
        }
    }
    Some(decoded)
}
