//! Table flattening.

use crate::model::{RawTable, TableRecord};

/// Flatten every table, preserving order.
pub fn flatten_tables(tables: &[RawTable]) -> Vec<TableRecord> {
    tables.iter().map(flatten_table).collect()
}

/// Flatten one table; cells are stringified and confidence is the baseline.
pub fn flatten_table(table: &RawTable) -> TableRecord {
    TableRecord::new()
        .with_headers(table.header_texts())
        .with_rows(table.row_texts())
        .with_caption(table.caption_text())
}
