//! Raw backend output.
//!
//! The conversion backend returns a loosely shaped object: every section may
//! be missing and leaf values are not guaranteed to have a fixed JSON type.
//! These types capture that shape with optional fields and expose typed
//! accessors that fall back to defaults instead of failing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// A converted document as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Markdown rendering
    pub markdown: Option<String>,

    /// Plain text rendering
    pub text: Option<String>,

    /// Free-form metadata map (`title`, `author`, `page_count`, ...)
    pub metadata: Option<Map<String, Value>>,

    /// Detected tables
    pub tables: Option<Vec<RawTable>>,

    /// Detected figures
    pub figures: Option<Vec<RawFigure>>,

    /// Reading-order layout elements
    pub layout: Option<Vec<RawElement>>,
}

impl RawDocument {
    /// Create an empty raw document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse backend standard output.
    ///
    /// Valid JSON that is not an object yields an empty document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s.trim())
            .map_err(|e| Error::BackendOutput(format!("not valid JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Build a raw document from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            log::warn!(
                "Backend returned a non-document value ({}), using empty result",
                json_kind(&value)
            );
            return Ok(Self::default());
        }

        serde_json::from_value(value).map_err(|e| Error::BackendOutput(e.to_string()))
    }

    /// Markdown rendering, falling back to the text rendering.
    pub fn to_markdown(&self) -> &str {
        self.markdown
            .as_deref()
            .or(self.text.as_deref())
            .unwrap_or("")
    }

    /// Plain text rendering.
    pub fn to_text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Whether the backend supplied a metadata map.
    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    /// Document title; `None` when there is no metadata map at all.
    pub fn title(&self) -> Option<String> {
        self.metadata_string("title")
    }

    /// Document author; `None` when there is no metadata map at all.
    pub fn author(&self) -> Option<String> {
        self.metadata_string("author")
    }

    /// Page count from the metadata map, 0 when absent.
    pub fn page_count(&self) -> Result<u32> {
        let Some(value) = self.metadata.as_ref().and_then(|m| m.get("page_count")) else {
            return Ok(0);
        };
        match value {
            Value::Null => Ok(0),
            other => {
                let count = integer_field("page_count", other)?;
                u32::try_from(count).map_err(|_| Error::InvalidField {
                    field: "page_count",
                    value: other.to_string(),
                })
            }
        }
    }

    /// Tables, empty when absent.
    pub fn tables(&self) -> &[RawTable] {
        self.tables.as_deref().unwrap_or(&[])
    }

    /// Figures, empty when absent.
    pub fn figures(&self) -> &[RawFigure] {
        self.figures.as_deref().unwrap_or(&[])
    }

    /// Layout elements, empty when absent.
    pub fn layout(&self) -> &[RawElement] {
        self.layout.as_deref().unwrap_or(&[])
    }

    fn metadata_string(&self, key: &str) -> Option<String> {
        self.metadata
            .as_ref()
            .map(|m| m.get(key).map(cell_text).unwrap_or_default())
    }
}

/// A table as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Header cells
    pub header: Option<Vec<Value>>,

    /// Header cells under their plural key, read when `header` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<Value>>,

    /// Body rows
    pub rows: Option<Vec<Vec<Value>>>,

    /// Caption
    pub caption: Option<Value>,
}

impl RawTable {
    /// Header cells rendered as text.
    pub fn header_texts(&self) -> Vec<String> {
        self.header
            .as_deref()
            .or(self.headers.as_deref())
            .unwrap_or(&[])
            .iter()
            .map(cell_text)
            .collect()
    }

    /// Body rows rendered as text.
    pub fn row_texts(&self) -> Vec<Vec<String>> {
        self.rows
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect()
    }

    /// Caption text, empty when absent.
    pub fn caption_text(&self) -> String {
        self.caption.as_ref().map(cell_text).unwrap_or_default()
    }
}

/// A figure as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFigure {
    /// Caption
    pub caption: Option<Value>,

    /// Image payload
    pub image: Option<RawImage>,
}

impl RawFigure {
    /// Caption text, empty when absent.
    pub fn caption_text(&self) -> String {
        self.caption.as_ref().map(cell_text).unwrap_or_default()
    }
}

/// Image payload attached to a figure.
///
/// Either a bare base64 string (optionally a `data:` URI) or an object with
/// a `data` field. The actual format is sniffed from the decoded bytes, so
/// any declared MIME type is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawImage {
    /// Bare base64 or data URI
    Encoded(String),

    /// Object form
    Inline {
        /// Base64 payload
        data: String,
    },
}

impl RawImage {
    /// Base64 payload with any `data:` URI prefix removed.
    pub fn base64_data(&self) -> &str {
        let data = match self {
            RawImage::Encoded(data) => data,
            RawImage::Inline { data } => data,
        };
        strip_data_uri(data.trim())
    }
}

fn strip_data_uri(data: &str) -> &str {
    if data.starts_with("data:") {
        if let Some((_, payload)) = data.split_once(',') {
            return payload;
        }
    }
    data
}

/// A layout element as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    /// Backend-specific element type
    #[serde(rename = "type")]
    pub kind: Option<Value>,

    /// Native label of the element, read when `type` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Value>,

    /// Heading level
    pub level: Option<Value>,

    /// Element text
    pub text: Option<Value>,

    /// Alternate content field, used when `text` is absent
    pub content: Option<Value>,

    /// Bounding box
    pub bbox: Option<RawBBox>,

    /// Page number
    pub page: Option<Value>,
}

impl RawElement {
    /// Reported type string, if any. `type` wins over `label`.
    pub fn kind_text(&self) -> Option<String> {
        self.kind.as_ref().or(self.label.as_ref()).map(cell_text)
    }

    /// Text content, falling back to `content`, empty when both are absent.
    pub fn content_text(&self) -> String {
        self.text
            .as_ref()
            .or(self.content.as_ref())
            .map(cell_text)
            .unwrap_or_default()
    }

    /// Heading level, if present.
    pub fn level(&self) -> Result<Option<i64>> {
        self.level
            .as_ref()
            .map(|v| integer_field("level", v))
            .transpose()
    }

    /// Page number, if present.
    pub fn page(&self) -> Result<Option<i64>> {
        self.page
            .as_ref()
            .map(|v| integer_field("page", v))
            .transpose()
    }
}

/// Bounding box in backend page coordinates, kept as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBBox {
    /// Left edge
    pub x: Number,
    /// Top edge
    pub y: Number,
    /// Width
    pub width: Number,
    /// Height
    pub height: Number,
}

/// Render a loosely typed cell value as text.
///
/// Strings are kept verbatim, objects carrying a `text` key yield that text,
/// `null` yields an empty string, and anything else uses its compact JSON
/// rendering.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Object(map) => match map.get("text") {
            Some(text) => cell_text(text),
            None => value.to_string(),
        },
        other => other.to_string(),
    }
}

/// Interpret a present field as a non-negative integer.
///
/// Accepts integers, floats (truncated toward zero) and integer strings.
/// Negative values and floats outside the `i64` range are rejected.
pub fn integer_field(field: &'static str, value: &Value) -> Result<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .map(f64::trunc)
                .filter(|f| f.is_finite() && *f >= 0.0 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.filter(|n| *n >= 0).ok_or_else(|| Error::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
