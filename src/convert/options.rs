//! Processing options and the backend pipeline options derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Output format requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text
    Text,

    /// Markdown
    Markdown,

    /// JSON structure (content rendered as plain text)
    #[default]
    Json,
}

impl OutputFormat {
    /// Name used on the command line and in emitted JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Other(format!(
                "Unknown output format '{}' (expected text, markdown, or json)",
                other
            ))),
        }
    }
}

/// Options controlling one document conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Requested output format
    pub output_format: OutputFormat,

    /// Emit layout elements
    pub preserve_layout: bool,

    /// Emit tables
    pub extract_tables: bool,

    /// Emit figures
    pub extract_figures: bool,

    /// Ask the backend for equations (no output field carries them)
    pub extract_equations: bool,
}

impl ProcessOptions {
    /// Create new process options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every optional extraction switched off.
    pub fn minimal() -> Self {
        Self {
            output_format: OutputFormat::Json,
            preserve_layout: false,
            extract_tables: false,
            extract_figures: false,
            extract_equations: false,
        }
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Enable or disable layout preservation.
    pub fn with_layout(mut self, preserve: bool) -> Self {
        self.preserve_layout = preserve;
        self
    }

    /// Enable or disable table extraction.
    pub fn with_tables(mut self, extract: bool) -> Self {
        self.extract_tables = extract;
        self
    }

    /// Enable or disable figure extraction.
    pub fn with_figures(mut self, extract: bool) -> Self {
        self.extract_figures = extract;
        self
    }

    /// Enable or disable equation extraction.
    pub fn with_equations(mut self, extract: bool) -> Self {
        self.extract_equations = extract;
        self
    }

    /// Backend pipeline options for these settings.
    pub fn pipeline(&self) -> PipelineOptions {
        PipelineOptions::from(self)
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Json,
            preserve_layout: true,
            extract_tables: true,
            extract_figures: true,
            extract_equations: false,
        }
    }
}

/// Feature switches handed to the conversion backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Detect tables
    pub table_extraction: bool,

    /// Recognize table cell structure
    pub table_structure_recognition: bool,

    /// Extract figures and their images
    pub figure_extraction: bool,

    /// Detect equations
    pub equation_extraction: bool,

    /// Keep reading-order layout elements
    pub layout_preservation: bool,
}

impl From<&ProcessOptions> for PipelineOptions {
    fn from(options: &ProcessOptions) -> Self {
        let mut pipeline = PipelineOptions::default();

        if options.extract_tables {
            pipeline.table_extraction = true;
            pipeline.table_structure_recognition = true;
        }

        if options.extract_figures {
            pipeline.figure_extraction = true;
        }

        if options.extract_equations {
            pipeline.equation_extraction = true;
        }

        if options.preserve_layout {
            pipeline.layout_preservation = true;
        }

        pipeline
    }
}
