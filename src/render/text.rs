//! Plain content rendering for text and Markdown output.

use crate::model::ProcessingResult;

/// Content emitted for the text and Markdown formats.
///
/// Failures have no content and render as an empty string.
pub fn to_content(result: &ProcessingResult) -> &str {
    result.content()
}
