// hostee-client/src/alerts.rs
// 桌台提醒 - 数据源 trait 与内置示例数据

use async_trait::async_trait;
use shared::models::{AlertPriority, TableAlert};

use crate::ClientResult;

/// Source of table alerts
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Alerts in display order
    async fn alerts(&self) -> ClientResult<Vec<TableAlert>>;
}

/// Fixed alert list for demos and screens without a live source
#[derive(Debug, Clone)]
pub struct MockAlertSource {
    alerts: Vec<TableAlert>,
}

impl MockAlertSource {
    pub fn new(alerts: Vec<TableAlert>) -> Self {
        Self { alerts }
    }
}

impl Default for MockAlertSource {
    /// The three sample alerts of the alerts screen
    fn default() -> Self {
        let alert = |id: &str, table, message: &str, raised_at: &str, priority| TableAlert {
            id: id.to_string(),
            table,
            message: message.to_string(),
            raised_at: raised_at.to_string(),
            priority,
        };
        Self::new(vec![
            alert("a1", 5, "¡Bebida derramada!", "2024-06-24 14:10", AlertPriority::High),
            alert("a2", 8, "Mesa lista para ordenar", "2024-06-24 14:12", AlertPriority::Medium),
            alert("a3", 3, "Cliente solicita la cuenta", "2024-06-24 14:15", AlertPriority::Low),
        ])
    }
}

#[async_trait]
impl AlertSource for MockAlertSource {
    async fn alerts(&self) -> ClientResult<Vec<TableAlert>> {
        Ok(self.alerts.clone())
    }
}
