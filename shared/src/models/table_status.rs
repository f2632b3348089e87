//! Table Status Model

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Occupancy state of a dining table (桌台状态)
///
/// The feed writes lowercase Spanish names. Anything unrecognised is
/// treated as free, matching how the floor plan has always colored it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TableState {
    #[default]
    Free,
    Occupied,
    Reserved,
}

impl TableState {
    /// Wire name used by the realtime feed
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "libre",
            Self::Occupied => "ocupada",
            Self::Reserved => "reservada",
        }
    }

    /// Capitalized label for the detail dialog
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "Libre",
            Self::Occupied => "Ocupada",
            Self::Reserved => "Reservada",
        }
    }

    /// Hex color of the table icon
    pub fn color(&self) -> &'static str {
        match self {
            Self::Free => "#4caf50",
            Self::Occupied => "#f44336",
            Self::Reserved => "#ffa726",
        }
    }
}

impl From<String> for TableState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ocupada" => Self::Occupied,
            "reservada" => Self::Reserved,
            _ => Self::Free,
        }
    }
}

impl From<TableState> for String {
    fn from(state: TableState) -> Self {
        state.as_str().to_string()
    }
}

/// Status of one dining table as pushed by the realtime feed
///
/// Floor terminals are not consistent about types: `numero` may arrive as a
/// string and `ultima_actualizacion` as epoch millis. Both are accepted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableStatus {
    #[serde(rename = "estado", default)]
    pub state: TableState,
    #[serde(rename = "numero", default, deserialize_with = "table_number")]
    pub number: u32,
    /// Free-form timestamp written by the floor system
    #[serde(rename = "ultima_actualizacion", default, deserialize_with = "scalar_text")]
    pub updated_at: String,
}

/// Table number from a non-negative integer or a numeric string
fn table_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let number = match Value::deserialize(deserializer)? {
        Value::Null => Some(0),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    number.ok_or_else(|| D::Error::custom("numero is not a table number"))
}

/// Any scalar rendered as text; `null` is empty
fn scalar_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(D::Error::custom("ultima_actualizacion is not a scalar")),
    }
}

impl TableStatus {
    pub fn new(state: TableState, number: u32, updated_at: impl Into<String>) -> Self {
        Self {
            state,
            number,
            updated_at: updated_at.into(),
        }
    }

    /// Title used on the floor plan, e.g. `Mesa 4`
    pub fn title(&self) -> String {
        format!("Mesa {}", self.number)
    }
}

/// Full table snapshot keyed by table id
pub type TableSnapshot = BTreeMap<String, TableStatus>;

/// Tables ordered by table number, ties broken by id
pub fn tables_by_number(snapshot: &TableSnapshot) -> Vec<(&str, &TableStatus)> {
    let mut tables: Vec<(&str, &TableStatus)> =
        snapshot.iter().map(|(id, t)| (id.as_str(), t)).collect();
    tables.sort_by(|a, b| a.1.number.cmp(&b.1.number).then_with(|| a.0.cmp(b.0)));
    tables
}

/// Count of tables per state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableSummary {
    pub free: usize,
    pub occupied: usize,
    pub reserved: usize,
}

impl TableSummary {
    pub fn from_snapshot<'a>(tables: impl IntoIterator<Item = &'a TableStatus>) -> Self {
        tables.into_iter().fold(Self::default(), |mut acc, table| {
            match table.state {
                TableState::Free => acc.free += 1,
                TableState::Occupied => acc.occupied += 1,
                TableState::Reserved => acc.reserved += 1,
            }
            acc
        })
    }

    /// Tables currently in service (occupied or reserved)
    pub fn active(&self) -> usize {
        self.occupied + self.reserved
    }

    pub fn total(&self) -> usize {
        self.free + self.occupied + self.reserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_state_wire_names() {
        let state: TableState = serde_json::from_value(json!("ocupada")).unwrap();
        assert_eq!(state, TableState::Occupied);
        let state: TableState = serde_json::from_value(json!("reservada")).unwrap();
        assert_eq!(state, TableState::Reserved);
        let state: TableState = serde_json::from_value(json!("libre")).unwrap();
        assert_eq!(state, TableState::Free);

        assert_eq!(serde_json::to_value(TableState::Reserved).unwrap(), json!("reservada"));
    }

    #[test]
    fn test_unknown_state_is_free() {
        let state: TableState = serde_json::from_value(json!("limpiando")).unwrap();
        assert_eq!(state, TableState::Free);
        assert_eq!(state.color(), "#4caf50");
    }

    #[test]
    fn test_table_status_from_feed_record() {
        let status: TableStatus = serde_json::from_value(json!({
            "estado": "ocupada",
            "numero": 4,
            "ultima_actualizacion": "2024-06-24 14:10"
        }))
        .unwrap();
        assert_eq!(status.state, TableState::Occupied);
        assert_eq!(status.number, 4);
        assert_eq!(status.title(), "Mesa 4");
        assert_eq!(status.state.label(), "Ocupada");
    }

    #[test]
    fn test_table_status_missing_fields_default() {
        let status: TableStatus = serde_json::from_value(json!({ "numero": 2 })).unwrap();
        assert_eq!(status.state, TableState::Free);
        assert_eq!(status.updated_at, "");
    }

    #[test]
    fn test_table_status_tolerates_loose_types() {
        let status: TableStatus = serde_json::from_value(json!({
            "estado": "ocupada",
            "numero": "12",
            "ultima_actualizacion": 1719238200000_i64
        }))
        .unwrap();
        assert_eq!(status.number, 12);
        assert_eq!(status.updated_at, "1719238200000");

        let status: TableStatus =
            serde_json::from_value(json!({ "numero": 3.0, "ultima_actualizacion": null })).unwrap();
        assert_eq!(status.number, 3);
        assert_eq!(status.updated_at, "");
    }

    #[test]
    fn test_table_status_rejects_non_numbers() {
        assert!(serde_json::from_value::<TableStatus>(json!({ "numero": "tres" })).is_err());
        assert!(serde_json::from_value::<TableStatus>(json!({ "numero": -1 })).is_err());
        assert!(
            serde_json::from_value::<TableStatus>(json!({ "numero": 1, "ultima_actualizacion": {} }))
                .is_err()
        );
    }

    #[test]
    fn test_tables_by_number() {
        let mut snapshot = TableSnapshot::new();
        snapshot.insert("mesa10".into(), TableStatus::new(TableState::Free, 10, ""));
        snapshot.insert("mesa2".into(), TableStatus::new(TableState::Occupied, 2, ""));
        snapshot.insert("mesa1".into(), TableStatus::new(TableState::Reserved, 1, ""));

        let numbers: Vec<u32> = tables_by_number(&snapshot)
            .into_iter()
            .map(|(_, t)| t.number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn test_table_summary() {
        let tables = [
            TableStatus::new(TableState::Free, 1, ""),
            TableStatus::new(TableState::Occupied, 2, ""),
            TableStatus::new(TableState::Occupied, 3, ""),
            TableStatus::new(TableState::Reserved, 4, ""),
        ];
        let summary = TableSummary::from_snapshot(tables.iter());
        assert_eq!(summary.free, 1);
        assert_eq!(summary.occupied, 2);
        assert_eq!(summary.active(), 3);
        assert_eq!(summary.total(), 4);
    }
}
