//! Figure records.

use serde::{Deserialize, Serialize};

/// Kind tag of a figure record. Only figures are emitted today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureKind {
    /// A figure or picture
    #[default]
    Figure,
}

/// A flattened figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureRecord {
    /// Caption, empty when the backend reported none
    pub caption: String,

    /// Always `"figure"`
    #[serde(rename = "type")]
    pub kind: FigureKind,

    /// PNG image as base64; `null` when missing or not encodable
    pub base64: Option<String>,
}

impl FigureRecord {
    /// Create a figure record with a caption.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            kind: FigureKind::Figure,
            base64: None,
        }
    }

    /// Attach a base64 PNG payload.
    pub fn with_base64(mut self, data: impl Into<String>) -> Self {
        self.base64 = Some(data.into());
        self
    }
}
