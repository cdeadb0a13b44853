//! Error types for docshape.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docshape operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting and flattening a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The backend program could not be launched.
    #[error("Conversion backend unavailable: {program}: {reason}")]
    BackendUnavailable {
        /// Program that was looked up
        program: String,
        /// Launch failure reason
        reason: String,
    },

    /// The backend ran but reported a failure.
    #[error("Conversion backend failed ({status}): {message}")]
    Backend {
        /// Exit status description
        status: String,
        /// Captured standard error
        message: String,
    },

    /// The backend output could not be parsed.
    #[error("Invalid backend output: {0}")]
    BackendOutput(String),

    /// A field was present in the backend output but held an unusable value.
    #[error("Invalid value for field '{field}': {value}")]
    InvalidField {
        /// Field name
        field: &'static str,
        /// Offending value, rendered as JSON
        value: String,
    },

    /// Error decoding or encoding a figure image.
    #[error("Image error: {0}")]
    Image(String),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Image(format!("base64 decode failed: {}", err))
    }
}
