// hostee-client/src/backend/polling.rs
// 实时数据 - 按固定间隔读取路径的完整快照

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use shared::models::Session;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::http::HttpTransport;
use super::{FEED_BUFFER, FeedEvent, RealtimeFeed, Subscription, validate_path};
use crate::{ClientConfig, ClientResult};

/// Shortest accepted polling interval
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Realtime feed that re-reads `{path}.json` from the realtime database
///
/// Every successful read is delivered as a full snapshot, unchanged values
/// included. Failed reads are delivered as [`FeedEvent::Disconnected`] and
/// polling continues, so the view recovers on the next good read.
#[derive(Debug, Clone)]
pub struct PollingFeed {
    http: HttpTransport,
    base_url: String,
    interval: Duration,
}

impl PollingFeed {
    /// Intervals below [`MIN_POLL_INTERVAL`] are raised to it
    pub fn new(http: HttpTransport, config: &ClientConfig) -> Self {
        if config.poll_interval < MIN_POLL_INTERVAL {
            tracing::warn!(
                requested = ?config.poll_interval,
                min = ?MIN_POLL_INTERVAL,
                "Poll interval too short, using minimum"
            );
        }
        Self {
            http,
            base_url: config.realtime_base_url().trim_end_matches('/').to_string(),
            interval: config.poll_interval.max(MIN_POLL_INTERVAL),
        }
    }

    fn path_url(&self, path: &str) -> String {
        let trimmed = path.trim().trim_matches('/');
        if trimmed.is_empty() {
            format!("{}/.json", self.base_url)
        } else {
            format!("{}/{}.json", self.base_url, trimmed)
        }
    }
}

#[async_trait]
impl RealtimeFeed for PollingFeed {
    async fn subscribe(
        &self,
        session: Option<&Session>,
        path: &str,
    ) -> ClientResult<Subscription> {
        validate_path(path)?;

        let (tx, rx) = mpsc::channel(FEED_BUFFER);
        let cancel = CancellationToken::new();
        let poller = Poller {
            http: self.http.clone(),
            url: self.path_url(path),
            path: path.trim().to_string(),
            auth: session.map(|s| s.id_token.clone()),
            interval: self.interval,
        };
        tokio::spawn(poller.run(tx, cancel.clone()));

        Ok(Subscription::new(path.trim(), rx, cancel))
    }
}

struct Poller {
    http: HttpTransport,
    url: String,
    path: String,
    auth: Option<String>,
    interval: Duration,
}

impl Poller {
    async fn run(self, tx: mpsc::Sender<FeedEvent>, cancel: CancellationToken) {
        tracing::debug!(path = %self.path, interval = ?self.interval, "Feed polling started");
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let event = tokio::select! {
                _ = cancel.cancelled() => break,
                event = self.fetch() => event,
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                sent = tx.send(event) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::debug!(path = %self.path, "Feed polling stopped");
    }

    async fn fetch(&self) -> FeedEvent {
        let mut request = self.http.get(&self.url);
        if let Some(token) = &self.auth {
            request = request.query(&[("auth", token.as_str())]);
        }

        match self.http.send(request).await {
            Ok(Ok(response)) => match HttpTransport::decode::<Value>(response).await {
                Ok(value) => FeedEvent::Snapshot(value),
                Err(e) => FeedEvent::Disconnected(e.to_string()),
            },
            Ok(Err(rejection)) => {
                FeedEvent::Disconnected(format!("{}: {}", rejection.status, rejection.message))
            }
            Err(e) => FeedEvent::Disconnected(e.to_string()),
        }
    }
}
