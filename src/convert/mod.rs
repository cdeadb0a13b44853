//! Conversion backends.
//!
//! A [`DocumentConverter`] turns an input path into a [`RawDocument`]. The
//! converter is built once from [`PipelineOptions`] and then asked to
//! convert; the heavy lifting (layout models, table structure recognition)
//! happens entirely behind this trait.
//!
//! # Example
//!
//! ```no_run
//! use docshape::convert::{BackendConfig, CommandConverter, DocumentConverter, ProcessOptions};
//! use std::path::Path;
//!
//! fn main() -> docshape::Result<()> {
//!     let options = ProcessOptions::new();
//!     let converter = CommandConverter::new(BackendConfig::default(), options.pipeline());
//!
//!     let raw = converter.convert(Path::new("report.pdf"))?;
//!     println!("{}", raw.to_text());
//!     Ok(())
//! }
//! ```

mod command;
mod options;

pub use command::{BackendConfig, CommandConverter, DEFAULT_BACKEND};
pub use options::{OutputFormat, PipelineOptions, ProcessOptions};

use crate::error::Result;
use crate::model::RawDocument;
use std::path::Path;

/// Trait for document conversion backends.
pub trait DocumentConverter {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert the document at `path`.
    fn convert(&self, path: &Path) -> Result<RawDocument>;
}

impl<C: DocumentConverter + ?Sized> DocumentConverter for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn convert(&self, path: &Path) -> Result<RawDocument> {
        (**self).convert(path)
    }
}
