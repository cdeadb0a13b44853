//! Table records.

use serde::{Deserialize, Serialize};

/// Confidence attached to every table.
///
/// This is the published TableFormer baseline of the upstream backend, not a
/// per-table measurement.
pub const TABLE_CONFIDENCE: f64 = 0.979;

/// A flattened table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Header cells
    pub headers: Vec<String>,

    /// Body rows
    pub rows: Vec<Vec<String>>,

    /// Table caption, empty when the backend reported none
    pub caption: String,

    /// Always [`TABLE_CONFIDENCE`]
    pub confidence: f64,
}

impl TableRecord {
    /// Create an empty table record.
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            caption: String::new(),
            confidence: TABLE_CONFIDENCE,
        }
    }

    /// Set header cells.
    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = headers;
        self
    }

    /// Set body rows.
    pub fn with_rows(mut self, rows: Vec<Vec<String>>) -> Self {
        self.rows = rows;
        self
    }

    /// Set caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }
}

impl Default for TableRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = TableRecord::new();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
        assert_eq!(table.confidence, TABLE_CONFIDENCE);
    }

    #[test]
    fn test_table_with_data() {
        let table = TableRecord::new()
            .with_headers(vec!["Name".into(), "Age".into()])
            .with_rows(vec![
                vec!["Alice".into(), "30".into()],
                vec!["Bob".into(), "25".into()],
            ])
            .with_caption("People");

        assert_eq!(table.headers, vec!["Name", "Age"]);
        assert_eq!(table.rows[1], vec!["Bob", "25"]);
        assert_eq!(table.caption, "People");
    }

    #[test]
    fn test_table_json_keys() {
        let json = serde_json::to_value(TableRecord::new()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(json["confidence"], 0.979);
        assert_eq!(json["caption"], "");
    }
}
