//! Document processor: convert once, flatten, and fold every error into a
//! failure result.

use std::cell::OnceCell;
use std::path::Path;

use crate::convert::{
    BackendConfig, CommandConverter, DocumentConverter, PipelineOptions, ProcessOptions,
};
use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::model::{Extraction, ProcessingResult};

type ConverterFactory = Box<dyn Fn(&PipelineOptions) -> Result<Box<dyn DocumentConverter>>>;

/// Runs a conversion backend and flattens its output.
///
/// The converter is built lazily from the pipeline options of the first
/// document processed and reused afterwards.
///
/// # Example
///
/// ```no_run
/// use docshape::{BackendConfig, DocumentProcessor, ProcessOptions};
/// use std::path::Path;
///
/// let processor = DocumentProcessor::with_backend(BackendConfig::default());
/// let result = processor.process_document(Path::new("report.pdf"), &ProcessOptions::new());
/// std::process::exit(result.exit_code());
/// ```
pub struct DocumentProcessor {
    factory: ConverterFactory,
    converter: OnceCell<Box<dyn DocumentConverter>>,
}

impl DocumentProcessor {
    /// Create a processor from a converter factory.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&PipelineOptions) -> Result<Box<dyn DocumentConverter>> + 'static,
    {
        Self {
            factory: Box::new(factory),
            converter: OnceCell::new(),
        }
    }

    /// Create a processor that launches an external backend program.
    pub fn with_backend(backend: BackendConfig) -> Self {
        Self::new(move |pipeline| {
            Ok(Box::new(CommandConverter::new(backend.clone(), *pipeline))
                as Box<dyn DocumentConverter>)
        })
    }

    /// Process a document. Never fails: errors become a failure result.
    pub fn process_document(&self, input: &Path, options: &ProcessOptions) -> ProcessingResult {
        match self.try_process(input, options) {
            Ok(extraction) => ProcessingResult::success(options.output_format, extraction),
            Err(e) => {
                log::error!("Error processing document: {}", e);
                ProcessingResult::failure(options.output_format, e.to_string())
            }
        }
    }

    /// Process a document, returning errors instead of a failure result.
    pub fn try_process(&self, input: &Path, options: &ProcessOptions) -> Result<Extraction> {
        if !input.exists() {
            return Err(Error::InputNotFound(input.to_path_buf()));
        }

        let converter = self.converter(options)?;

        log::info!("Processing document: {}", input.display());
        let raw = converter.convert(input)?;

        flatten(&raw, input, options)
    }

    fn converter(&self, options: &ProcessOptions) -> Result<&dyn DocumentConverter> {
        if let Some(converter) = self.converter.get() {
            return Ok(converter.as_ref());
        }

        let converter = (self.factory)(&options.pipeline())?;
        log::debug!("Initialized converter: {}", converter.name());
        Ok(self.converter.get_or_init(|| converter).as_ref())
    }
}

/// Process one file with an external backend program.
pub fn process_file<P: AsRef<Path>>(
    path: P,
    options: &ProcessOptions,
    backend: BackendConfig,
) -> ProcessingResult {
    DocumentProcessor::with_backend(backend).process_document(path.as_ref(), options)
}
