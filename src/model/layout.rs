//! Layout element records.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use super::RawBBox;

/// Fixed set of layout element types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Body text (default)
    #[default]
    Paragraph,
    /// Heading or section header
    Header,
    /// Table
    Table,
    /// Figure or image
    Figure,
    /// List or list item
    List,
    /// Code block
    Code,
    /// Page footer
    Footer,
    /// Caption
    Caption,
}

/// Substring rules, checked in order; the first match wins.
const CLASSIFY_RULES: &[(&[&str], ElementType)] = &[
    (&["header", "heading"], ElementType::Header),
    (&["table"], ElementType::Table),
    (&["figure", "image"], ElementType::Figure),
    (&["list"], ElementType::List),
    (&["code"], ElementType::Code),
    (&["footer"], ElementType::Footer),
    (&["caption"], ElementType::Caption),
];

impl ElementType {
    /// Classify a backend type label by case-insensitive substring match.
    ///
    /// Labels matching nothing are paragraphs.
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();
        CLASSIFY_RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| label.contains(n)))
            .map(|(_, kind)| *kind)
            .unwrap_or_default()
    }

    /// Name used in emitted JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Paragraph => "paragraph",
            ElementType::Header => "header",
            ElementType::Table => "table",
            ElementType::Figure => "figure",
            ElementType::List => "list",
            ElementType::Code => "code",
            ElementType::Footer => "footer",
            ElementType::Caption => "caption",
        }
    }

    /// Check if this is a header element.
    pub fn is_header(&self) -> bool {
        matches!(self, ElementType::Header)
    }
}

/// Bounding box of a layout element.
///
/// Coordinates are passed through exactly as the backend reported them, so
/// integers stay integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: Number,
    /// Top edge
    pub y: Number,
    /// Width
    pub width: Number,
    /// Height
    pub height: Number,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(x: Number, y: Number, width: Number, height: Number) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<&RawBBox> for BoundingBox {
    fn from(bbox: &RawBBox) -> Self {
        Self::new(
            bbox.x.clone(),
            bbox.y.clone(),
            bbox.width.clone(),
            bbox.height.clone(),
        )
    }
}

/// Positional metadata of a layout element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementMetadata {
    /// Bounding box, when the backend reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,

    /// Page number, when the backend reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
}

/// A flattened layout element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutElement {
    /// Element type
    #[serde(rename = "type")]
    pub kind: ElementType,

    /// Element text
    pub content: String,

    /// Heading level; only ever set on header elements
    pub level: Option<i64>,

    /// Positional metadata
    pub metadata: ElementMetadata,
}

impl LayoutElement {
    /// Create a layout element.
    pub fn new(kind: ElementType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            level: None,
            metadata: ElementMetadata::default(),
        }
    }

    /// Create a header element, with its level when one was reported.
    pub fn header(content: impl Into<String>, level: Option<i64>) -> Self {
        Self {
            level,
            ..Self::new(ElementType::Header, content)
        }
    }

    /// Attach a bounding box.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.metadata.bbox = Some(bbox);
        self
    }

    /// Attach a page number.
    pub fn with_page(mut self, page: i64) -> Self {
        self.metadata.page = Some(page);
        self
    }
}
