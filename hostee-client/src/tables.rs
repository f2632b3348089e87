// hostee-client/src/tables.rs
// 桌台状态 - 实时镜像

use shared::models::{TableStatus, TableSummary, tables_by_number};

use crate::client::HosteeClient;
use crate::view::RemoteCollectionView;
use crate::ClientResult;

/// Live mirror of table status records keyed by table id
pub type TableStatusView = RemoteCollectionView<TableStatus>;

impl RemoteCollectionView<TableStatus> {
    /// Tables ordered by number, for rendering
    pub fn sorted(&self) -> Vec<(&str, &TableStatus)> {
        tables_by_number(self.entries())
    }

    /// Counts per state
    pub fn summary(&self) -> TableSummary {
        TableSummary::from_snapshot(self.entries().values())
    }
}

pub struct Tables<'a> {
    client: &'a HosteeClient,
}

impl<'a> Tables<'a> {
    pub(crate) fn new(client: &'a HosteeClient) -> Self {
        Self { client }
    }

    /// Watch the configured tables path
    pub async fn watch(&self) -> ClientResult<TableStatusView> {
        self.watch_path(&self.client.config.tables_path).await
    }

    /// Watch table records under `path`
    ///
    /// Each call opens an independent subscription. The signed-in session,
    /// if any, authorizes the read.
    pub async fn watch_path(&self, path: &str) -> ClientResult<TableStatusView> {
        let session = self.client.auth.current();
        let view = self
            .client
            .bounded(
                "subscribe",
                RemoteCollectionView::open(self.client.feed.as_ref(), session.as_ref(), path),
            )
            .await?;
        tracing::info!(path = %view.path(), "Watching tables");
        Ok(view)
    }
}
