//! Integration tests for conversion and flattening through the processor.

use std::cell::{Cell, RefCell};
use std::io::{Cursor, Write};
use std::path::Path;
use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{json, Value};

use docshape::convert::{DocumentConverter, OutputFormat, ProcessOptions};
use docshape::error::{Error, Result};
use docshape::model::{ElementType, ProcessingResult, RawDocument, TABLE_CONFIDENCE};
use docshape::{render, DocumentProcessor, JsonFormat};

/// Mock converter returning a fixed document, or failing.
struct MockConverter {
    response: Option<Value>,
    calls: Rc<Cell<usize>>,
}

impl MockConverter {
    fn new(response: Value) -> Self {
        Self {
            response: Some(response),
            calls: Rc::new(Cell::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            response: None,
            calls: Rc::new(Cell::new(0)),
        }
    }
}

impl DocumentConverter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    fn convert(&self, _path: &Path) -> Result<RawDocument> {
        self.calls.set(self.calls.get() + 1);
        match self.response {
            Some(ref value) => RawDocument::from_value(value.clone()),
            None => Err(Error::Backend {
                status: "exit status: 1".to_string(),
                message: "layout model crashed".to_string(),
            }),
        }
    }
}

fn processor_for(converter: MockConverter) -> DocumentProcessor {
    let slot = RefCell::new(Some(converter));
    DocumentProcessor::new(move |_| {
        let converter = slot
            .borrow_mut()
            .take()
            .ok_or_else(|| Error::Other("converter already built".to_string()))?;
        Ok(Box::new(converter) as Box<dyn DocumentConverter>)
    })
}

fn input_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("sample")
        .suffix(".docx")
        .tempfile()
        .unwrap();
    file.write_all(b"PK\x03\x04 fake docx").unwrap();
    file
}

fn png_base64() -> String {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 128, 255, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    BASE64.encode(bytes)
}

fn rich_document() -> Value {
    json!({
        "markdown": "## Results\n\n| a | b |",
        "text": "Results\n\na b",
        "metadata": {"title": "Results", "page_count": 1.0},
        "tables": [
            {"header": ["a", "b"], "rows": [["1", "2"], [null, {"text": "4"}]], "caption": null},
            {"rows": [["only body"]]}
        ],
        "figures": [
            {"caption": "Logo", "image": {"data": png_base64(), "mime_type": "image/png"}},
            {"caption": "Broken", "image": "%%%"}
        ],
        "layout": [
            {"type": "SectionHeader", "level": "2", "text": "Results"},
            {"type": "table", "content": "a b", "label": "caption"},
            {"label": "picture"},
            {"text": "untyped"}
        ]
    })
}

fn json_of(result: &ProcessingResult) -> Value {
    serde_json::from_str(&render::to_json(result, JsonFormat::Compact).unwrap()).unwrap()
}

#[test]
fn test_success_shape_and_values() {
    let file = input_file();
    let processor = processor_for(MockConverter::new(rich_document()));
    let result = processor.process_document(file.path(), &ProcessOptions::default());

    assert!(result.is_success());
    assert_eq!(result.exit_code(), 0);
    let extraction = result.extraction().unwrap();

    assert_eq!(extraction.metadata.file_size, 14);
    assert!(extraction.metadata.filename.starts_with("sample"));
    assert_eq!(extraction.metadata.pages, 1);
    assert_eq!(extraction.metadata.author.as_deref(), Some(""));
    assert_eq!(extraction.content, "Results\n\na b");

    assert_eq!(extraction.tables.len(), 2);
    assert_eq!(extraction.tables[0].rows[1], vec!["", "4"]);
    assert_eq!(extraction.tables[0].caption, "");
    assert!(extraction.tables[1].headers.is_empty());
    assert!(extraction
        .tables
        .iter()
        .all(|t| t.confidence == TABLE_CONFIDENCE));

    assert_eq!(extraction.figures.len(), 2);
    let png = BASE64
        .decode(extraction.figures[0].base64.as_ref().unwrap())
        .unwrap();
    assert!(png.starts_with(b"\x89PNG"));
    assert!(extraction.figures[1].base64.is_none());

    let kinds: Vec<_> = extraction.layout.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementType::Header,
            ElementType::Table,
            ElementType::Paragraph,
            ElementType::Paragraph
        ]
    );
    assert_eq!(extraction.layout[0].level, Some(2));
    assert_eq!(extraction.layout[3].content, "untyped");
}

#[test]
fn test_markdown_content() {
    let file = input_file();
    let processor = processor_for(MockConverter::new(rich_document()));
    let options = ProcessOptions::minimal().with_format(OutputFormat::Markdown);
    let result = processor.process_document(file.path(), &options);

    assert_eq!(result.content(), "## Results\n\n| a | b |");
    assert_eq!(json_of(&result)["format"], "markdown");
}

#[test]
fn test_flags_gate_sections() {
    let file = input_file();
    let cases = [
        (ProcessOptions::minimal(), [0, 0, 0]),
        (ProcessOptions::minimal().with_tables(true), [2, 0, 0]),
        (ProcessOptions::minimal().with_figures(true), [0, 2, 0]),
        (ProcessOptions::minimal().with_layout(true), [0, 0, 4]),
        (ProcessOptions::minimal().with_equations(true), [0, 0, 0]),
    ];

    for (options, [tables, figures, layout]) in cases {
        let processor = processor_for(MockConverter::new(rich_document()));
        let result = processor.process_document(file.path(), &options);
        let value = json_of(&result);

        assert_eq!(value["tables"].as_array().unwrap().len(), tables);
        assert_eq!(value["figures"].as_array().unwrap().len(), figures);
        assert_eq!(value["layout"].as_array().unwrap().len(), layout);
    }
}

#[test]
fn test_empty_backend_document_fills_defaults() {
    let file = input_file();
    let processor = processor_for(MockConverter::new(json!({})));
    let result = processor.process_document(file.path(), &ProcessOptions::default());
    let value = json_of(&result);

    assert_eq!(value["success"], true);
    assert_eq!(value["content"], "");
    assert_eq!(value["metadata"]["pages"], 0);
    assert!(value["metadata"].get("title").is_none());
    assert_eq!(value["tables"], json!([]));
    assert_eq!(value["figures"], json!([]));
    assert_eq!(value["layout"], json!([]));
}

#[test]
fn test_conversion_failure() {
    let file = input_file();
    let processor = processor_for(MockConverter::failing());
    let options = ProcessOptions::default().with_format(OutputFormat::Text);
    let result = processor.process_document(file.path(), &options);

    assert!(!result.is_success());
    assert_eq!(result.exit_code(), 1);

    let value = json_of(&result);
    let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["error", "format", "success"]);
    assert!(value["error"]
        .as_str()
        .unwrap()
        .contains("layout model crashed"));
    assert_eq!(value["format"], "text");
}

#[test]
fn test_flatten_failure_drops_partial_output() {
    let file = input_file();
    let response = json!({
        "tables": [{"header": ["ok"]}],
        "layout": [{"type": "heading", "level": {"depth": 1}}]
    });
    let processor = processor_for(MockConverter::new(response));
    let result = processor.process_document(file.path(), &ProcessOptions::default());

    assert!(!result.is_success());
    assert!(result.extraction().is_none());
    assert!(result.error().unwrap().contains("level"));
}

#[test]
fn test_converter_reused_across_documents() {
    let file = input_file();
    let converter = MockConverter::new(json!({"text": "x"}));
    let calls = converter.calls.clone();
    let processor = processor_for(converter);

    processor.process_document(file.path(), &ProcessOptions::default());
    processor.process_document(file.path(), &ProcessOptions::default());

    assert_eq!(calls.get(), 2);
}

#[test]
fn test_result_parses_back() {
    let file = input_file();
    let processor = processor_for(MockConverter::new(rich_document()));
    let result = processor.process_document(file.path(), &ProcessOptions::default());

    let pretty = render::to_json(&result, JsonFormat::Pretty).unwrap();
    let parsed: ProcessingResult = serde_json::from_str(&pretty).unwrap();
    assert_eq!(parsed, result);
}
