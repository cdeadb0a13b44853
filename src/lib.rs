//! # docshape
//!
//! Flatten the output of a document-understanding backend into a fixed
//! JSON schema.
//!
//! The backend does the actual document work (layout analysis, table
//! structure recognition, figure extraction). This crate configures it,
//! calls it once, and reshapes whatever it returns into a result where every
//! field is always present.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docshape::{render, BackendConfig, OutputFormat, ProcessOptions};
//!
//! fn main() -> docshape::Result<()> {
//!     let options = ProcessOptions::minimal()
//!         .with_format(OutputFormat::Json)
//!         .with_tables(true);
//!
//!     let result = docshape::process_file("report.pdf", &options, BackendConfig::default());
//!     render::write_stream(&result, options.output_format, &mut std::io::stdout())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Output schema
//!
//! - **Success**: `success`, `format`, `metadata`, `content`, `tables`,
//!   `figures`, `layout`
//! - **Failure**: `success`, `error`, `format`

pub mod convert;
pub mod error;
pub mod flatten;
pub mod model;
pub mod processor;
pub mod render;

// Re-export commonly used types
pub use convert::{
    BackendConfig, CommandConverter, DocumentConverter, OutputFormat, PipelineOptions,
    ProcessOptions,
};
pub use error::{Error, Result};
pub use flatten::flatten;
pub use model::{
    BoundingBox, DocumentMetadata, ElementType, Extraction, FigureRecord, LayoutElement,
    ProcessingResult, RawDocument, TableRecord, TABLE_CONFIDENCE,
};
pub use processor::{process_file, DocumentProcessor};
pub use render::JsonFormat;

use std::ffi::OsString;
use std::path::Path;

/// Builder for configuring and running one conversion.
///
/// # Example
///
/// ```no_run
/// use docshape::{Docshape, OutputFormat};
///
/// let result = Docshape::new()
///     .with_backend("docling-bridge")
///     .with_format(OutputFormat::Markdown)
///     .extract_tables()
///     .preserve_layout()
///     .process("document.pdf");
/// println!("{}", result.content());
/// ```
pub struct Docshape {
    options: ProcessOptions,
    backend: BackendConfig,
}

impl Docshape {
    /// Create a new builder with every optional extraction disabled.
    pub fn new() -> Self {
        Self {
            options: ProcessOptions::minimal(),
            backend: BackendConfig::default(),
        }
    }

    /// Set the backend program.
    pub fn with_backend(mut self, program: impl Into<OsString>) -> Self {
        self.backend.program = program.into();
        self
    }

    /// Add a leading backend argument.
    pub fn with_backend_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.backend = self.backend.with_arg(arg);
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.options = self.options.with_format(format);
        self
    }

    /// Emit tables.
    pub fn extract_tables(mut self) -> Self {
        self.options = self.options.with_tables(true);
        self
    }

    /// Emit figures.
    pub fn extract_figures(mut self) -> Self {
        self.options = self.options.with_figures(true);
        self
    }

    /// Ask the backend for equations.
    pub fn extract_equations(mut self) -> Self {
        self.options = self.options.with_equations(true);
        self
    }

    /// Emit layout elements.
    pub fn preserve_layout(mut self) -> Self {
        self.options = self.options.with_layout(true);
        self
    }

    /// Options built so far.
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Convert a document and flatten the result.
    pub fn process<P: AsRef<Path>>(self, path: P) -> ProcessingResult {
        process_file(path, &self.options, self.backend)
    }
}

impl Default for Docshape {
    fn default() -> Self {
        Self::new()
    }
}
