//! JSON-array extraction from model responses.
//!
//! The model is asked to reply with a JSON list only, but in practice
//! wraps it in prose. The extraction is a bracket scan: everything from
//! the first `[` to the last `]` inclusive. Known limitation: a stray
//! bracket inside a string value at the very start or end of the text
//! can fool the scan; the prompt's JSON-only instruction keeps this
//! rare, and a bad slice still fails parsing rather than passing junk
//! through.

use thiserror::Error;

use crate::models::ReviewComment;

/// Errors while extracting comments from a model response.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("missing or misaligned brackets in model response")]
    MissingBrackets,

    #[error("failed to parse comment JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Extract the JSON comment array from free-text `response`.
pub fn extract_comment_array(response: &str) -> Result<Vec<ReviewComment>, FormatError> {
    match (response.find('['), response.rfind(']')) {
        (Some(start), Some(end)) if start < end => {
            let json = &response[start..=end];
            Ok(serde_json::from_str(json)?)
        }
        _ => Err(FormatError::MissingBrackets),
    }
}
