//! Flattening of raw backend output into the fixed output schema.
//!
//! Each section is gated by its option flag; disabled sections stay empty
//! even when the backend returned data for them.

mod figures;
mod layout;
mod tables;

pub use figures::{encode_png_base64, flatten_figures};
pub use layout::{flatten_element, flatten_layout};
pub use tables::{flatten_table, flatten_tables};

use std::fs;
use std::path::Path;

use crate::convert::{OutputFormat, ProcessOptions};
use crate::error::Result;
use crate::model::{DocumentMetadata, Extraction, RawDocument};

/// Flatten a raw document.
///
/// `input` is only stat-ed for its name and size.
pub fn flatten(raw: &RawDocument, input: &Path, options: &ProcessOptions) -> Result<Extraction> {
    let mut extraction = Extraction::new(file_metadata(input)?);

    extraction.content = render_content(raw, options.output_format).to_string();

    if raw.has_metadata() {
        extraction.metadata.title = raw.title();
        extraction.metadata.author = raw.author();
        extraction.metadata.pages = raw.page_count()?;
    }

    if options.extract_tables {
        extraction.tables = flatten_tables(raw.tables());
    }

    if options.extract_figures {
        extraction.figures = flatten_figures(raw.figures());
    }

    if options.preserve_layout {
        extraction.layout = flatten_layout(raw.layout())?;
    }

    Ok(extraction)
}

/// Select the content rendering for a format.
///
/// JSON output carries the plain text rendering; structure lives in the
/// tables, figures and layout sections.
pub fn render_content(raw: &RawDocument, format: OutputFormat) -> &str {
    match format {
        OutputFormat::Markdown => raw.to_markdown(),
        OutputFormat::Text | OutputFormat::Json => raw.to_text(),
    }
}

/// Filename and size of the input file.
pub fn file_metadata(input: &Path) -> Result<DocumentMetadata> {
    let size = fs::metadata(input)?.len();
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(DocumentMetadata::new(filename, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementType;
    use serde_json::json;
    use std::io::Write;

    fn sample_raw() -> RawDocument {
        RawDocument::from_value(json!({
            "markdown": "# Report\n\nBody",
            "text": "Report\n\nBody",
            "metadata": {"title": "Report", "page_count": 4},
            "tables": [{"header": ["a"], "rows": [["1"]]}],
            "figures": [{"caption": "Fig 1"}],
            "layout": [{"type": "title_heading", "level": 1, "text": "Report"}]
        }))
        .unwrap()
    }

    fn input_file(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_flatten_all_sections() {
        let file = input_file(b"%PDF-1.7 sample");
        let extraction = flatten(&sample_raw(), file.path(), &ProcessOptions::default()).unwrap();

        assert_eq!(extraction.metadata.file_size, 15);
        assert!(extraction.metadata.filename.ends_with(".pdf"));
        assert_eq!(extraction.metadata.pages, 4);
        assert_eq!(extraction.metadata.title.as_deref(), Some("Report"));
        assert_eq!(extraction.metadata.author.as_deref(), Some(""));
        assert_eq!(extraction.content, "Report\n\nBody");
        assert_eq!(extraction.tables.len(), 1);
        assert_eq!(extraction.figures.len(), 1);
        assert_eq!(extraction.layout.len(), 1);
        assert_eq!(extraction.layout[0].kind, ElementType::Header);
        assert_eq!(extraction.layout[0].level, Some(1));
    }

    #[test]
    fn test_flatten_respects_disabled_sections() {
        let file = input_file(b"x");
        let options = ProcessOptions::minimal().with_format(OutputFormat::Markdown);
        let extraction = flatten(&sample_raw(), file.path(), &options).unwrap();

        assert_eq!(extraction.content, "# Report\n\nBody");
        assert!(extraction.tables.is_empty());
        assert!(extraction.figures.is_empty());
        assert!(extraction.layout.is_empty());
    }

    #[test]
    fn test_flatten_without_metadata_map() {
        let file = input_file(b"x");
        let extraction = flatten(&RawDocument::new(), file.path(), &ProcessOptions::default())
            .unwrap();

        assert_eq!(extraction.metadata.pages, 0);
        assert!(extraction.metadata.title.is_none());
        assert!(extraction.metadata.author.is_none());
        assert_eq!(extraction.content, "");
    }

    #[test]
    fn test_flatten_missing_input_is_error() {
        let result = flatten(
            &RawDocument::new(),
            Path::new("/nonexistent/input.pdf"),
            &ProcessOptions::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_render_content_by_format() {
        let raw = sample_raw();
        assert_eq!(render_content(&raw, OutputFormat::Json), "Report\n\nBody");
        assert_eq!(render_content(&raw, OutputFormat::Text), "Report\n\nBody");
        assert_eq!(
            render_content(&raw, OutputFormat::Markdown),
            "# Report\n\nBody"
        );
    }
}
