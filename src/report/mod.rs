//! CSV report writer.
//!
//! The report is append-only and shared across runs: the header row is
//! written once when the file is created and never rewritten. Every row
//! follows the same fixed column order.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::ReviewComment;

/// The fixed report header. Column order is part of the file contract.
pub const REPORT_HEADERS: [&str; 7] = [
    "commit",
    "commit_message",
    "filename",
    "code_line",
    "comment_content",
    "label",
    "justification",
];

/// Errors while writing the report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to open report file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write report row: {0}")]
    Write(#[from] csv::Error),
}

/// Append one commit's comments to the report at `path`.
///
/// An empty comment list writes nothing and does not create the file.
/// Returns the number of rows written.
pub fn append_comments(
    path: &Path,
    commit: &str,
    commit_message: &str,
    comments: &[ReviewComment],
) -> Result<usize, ReportError> {
    if comments.is_empty() {
        return Ok(0);
    }

    let is_new = !path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ReportError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if is_new {
        writer.write_record(REPORT_HEADERS)?;
    }

    for comment in comments {
        let code_line = comment.code_line_field();
        writer.write_record([
            commit,
            commit_message,
            comment.filename.as_str(),
            code_line.as_str(),
            comment.comment.as_str(),
            comment.label.as_str(),
            comment.label_justification.as_str(),
        ])?;
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(comments.len())
}
