//! Processing result emitted to the calling process.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::{FigureRecord, LayoutElement, TableRecord};
use crate::convert::OutputFormat;

/// File and document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Input file name (no directory)
    pub filename: String,

    /// Input file size in bytes
    pub file_size: u64,

    /// Page count reported by the backend, 0 when unknown
    pub pages: u32,

    /// Document title; present only when the backend returned metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Document author; present only when the backend returned metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl DocumentMetadata {
    /// Create metadata from file facts.
    pub fn new(filename: impl Into<String>, file_size: u64) -> Self {
        Self {
            filename: filename.into(),
            file_size,
            ..Default::default()
        }
    }
}

/// Flattened content of a successful conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// File and document metadata
    pub metadata: DocumentMetadata,

    /// Rendered document content (Markdown or plain text)
    pub content: String,

    /// Tables, empty unless table extraction was requested
    pub tables: Vec<TableRecord>,

    /// Figures, empty unless figure extraction was requested
    pub figures: Vec<FigureRecord>,

    /// Layout elements, empty unless layout preservation was requested
    pub layout: Vec<LayoutElement>,
}

impl Extraction {
    /// Create an extraction with only metadata filled in.
    pub fn new(metadata: DocumentMetadata) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }
}

/// Outcome of processing one document.
///
/// Serializes to `{success, format, metadata, content, tables, figures,
/// layout}` on success and `{success, error, format}` on failure; the two
/// key sets never mix.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireResult")]
pub enum ProcessingResult {
    /// Conversion and flattening succeeded.
    Success {
        /// Requested format
        format: OutputFormat,
        /// Flattened content
        extraction: Extraction,
    },

    /// Conversion or flattening failed.
    Failure {
        /// Requested format
        format: OutputFormat,
        /// Error message
        error: String,
    },
}

impl ProcessingResult {
    /// Create a success result.
    pub fn success(format: OutputFormat, extraction: Extraction) -> Self {
        ProcessingResult::Success { format, extraction }
    }

    /// Create a failure result.
    pub fn failure(format: OutputFormat, error: impl Into<String>) -> Self {
        ProcessingResult::Failure {
            format,
            error: error.into(),
        }
    }

    /// Whether processing succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingResult::Success { .. })
    }

    /// Requested output format.
    pub fn format(&self) -> OutputFormat {
        match self {
            ProcessingResult::Success { format, .. } | ProcessingResult::Failure { format, .. } => {
                *format
            }
        }
    }

    /// Rendered content; empty for failures.
    pub fn content(&self) -> &str {
        match self {
            ProcessingResult::Success { extraction, .. } => &extraction.content,
            ProcessingResult::Failure { .. } => "",
        }
    }

    /// Flattened content, if processing succeeded.
    pub fn extraction(&self) -> Option<&Extraction> {
        match self {
            ProcessingResult::Success { extraction, .. } => Some(extraction),
            ProcessingResult::Failure { .. } => None,
        }
    }

    /// Error message, if processing failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ProcessingResult::Success { .. } => None,
            ProcessingResult::Failure { error, .. } => Some(error),
        }
    }

    /// Process exit code: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

impl Serialize for ProcessingResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProcessingResult::Success { format, extraction } => {
                let mut map = serializer.serialize_map(Some(7))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("format", format)?;
                map.serialize_entry("metadata", &extraction.metadata)?;
                map.serialize_entry("content", &extraction.content)?;
                map.serialize_entry("tables", &extraction.tables)?;
                map.serialize_entry("figures", &extraction.figures)?;
                map.serialize_entry("layout", &extraction.layout)?;
                map.end()
            }
            ProcessingResult::Failure { format, error } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
                map.serialize_entry("format", format)?;
                map.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WireResult {
    success: bool,
    format: OutputFormat,
    error: Option<String>,
    metadata: Option<DocumentMetadata>,
    content: Option<String>,
    tables: Option<Vec<TableRecord>>,
    figures: Option<Vec<FigureRecord>>,
    layout: Option<Vec<LayoutElement>>,
}

impl TryFrom<WireResult> for ProcessingResult {
    type Error = String;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        let WireResult {
            success,
            format,
            error,
            metadata,
            content,
            tables,
            figures,
            layout,
        } = wire;

        if success {
            if error.is_some() {
                return Err("successful result must not carry 'error'".to_string());
            }
            match (metadata, content, tables, figures, layout) {
                (Some(metadata), Some(content), Some(tables), Some(figures), Some(layout)) => {
                    Ok(ProcessingResult::success(
                        format,
                        Extraction {
                            metadata,
                            content,
                            tables,
                            figures,
                            layout,
                        },
                    ))
                }
                _ => Err("successful result is missing extraction fields".to_string()),
            }
        } else {
            let has_extraction = metadata.is_some()
                || content.is_some()
                || tables.is_some()
                || figures.is_some()
                || layout.is_some();
            if has_extraction {
                return Err("failed result must not carry extraction fields".to_string());
            }
            let error = error.ok_or_else(|| "failed result is missing 'error'".to_string())?;
            Ok(ProcessingResult::failure(format, error))
        }
    }
}
