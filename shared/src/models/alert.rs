//! Table Alert Model

use serde::{Deserialize, Serialize};

/// Priority of a table alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
    /// No or unrecognised priority
    #[default]
    Normal,
}

impl AlertPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "alta",
            Self::Medium => "media",
            Self::Low => "baja",
            Self::Normal => "normal",
        }
    }

    /// Uppercase badge text
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "ALTA",
            Self::Medium => "MEDIA",
            Self::Low => "BAJA",
            Self::Normal => "NORMAL",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::High => "#FF5252",
            Self::Medium => "#FFA726",
            Self::Low | Self::Normal => "#4A90E2",
        }
    }
}

impl From<String> for AlertPriority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "alta" => Self::High,
            "media" => Self::Medium,
            "baja" => Self::Low,
            _ => Self::Normal,
        }
    }
}

impl From<AlertPriority> for String {
    fn from(priority: AlertPriority) -> Self {
        priority.as_str().to_string()
    }
}

/// Notification raised for one of the waiter's tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableAlert {
    pub id: String,
    /// Table number
    #[serde(rename = "mesa")]
    pub table: u32,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "fecha")]
    pub raised_at: String,
    #[serde(rename = "prioridad", default)]
    pub priority: AlertPriority,
}

impl TableAlert {
    /// Headline shown on the alert card, e.g. `Mesa 5: ¡Bebida derramada!`
    pub fn headline(&self) -> String {
        format!("Mesa {}: {}", self.table, self.message)
    }
}
