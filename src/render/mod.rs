//! Rendering of processing results for the calling process.
//!
//! JSON output is the full result; text and Markdown output is only the
//! content string. Files get pretty JSON, streams get compact JSON followed
//! by a newline.

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::to_content;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::convert::OutputFormat;
use crate::error::Result;
use crate::model::ProcessingResult;

/// Render a result for an output format.
pub fn render(result: &ProcessingResult, format: OutputFormat, json: JsonFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(result, json),
        OutputFormat::Text | OutputFormat::Markdown => Ok(to_content(result).to_string()),
    }
}

/// Write a result to a file: pretty JSON, or the raw content.
pub fn write_file(result: &ProcessingResult, format: OutputFormat, path: &Path) -> Result<()> {
    let rendered = render(result, format, JsonFormat::Pretty)?;
    let mut file = File::create(path)?;
    file.write_all(rendered.as_bytes())?;
    file.flush()?;
    log::info!("Output written to: {}", path.display());
    Ok(())
}

/// Write a result to a stream: compact JSON, or the raw content, plus a
/// trailing newline.
pub fn write_stream<W: Write>(
    result: &ProcessingResult,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    let rendered = render(result, format, JsonFormat::Compact)?;
    writeln!(writer, "{}", rendered)?;
    writer.flush()?;
    Ok(())
}
