//! Per-commit review generation and the batch driver.
//!
//! One commit flows parse → annotate → prompt → complete → extract.
//! The batch driver applies the per-row error policy: unparseable diffs
//! and unextractable responses are logged and skipped, report-write
//! failures are logged and swallowed, API failures abort the batch.

pub mod parse;

use std::path::Path;

use colored::Colorize;
use thiserror::Error;

use crate::dataset::{self, DatasetError};
use crate::diff::{annotate_patches, parse_unified_diff, DiffError};
use crate::models::ReviewComment;
use crate::prompt::build_review_prompt;
use crate::providers::{ChatProvider, ProviderError};
use crate::report;

pub use parse::{extract_comment_array, FormatError};

/// Errors while reviewing a single commit.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors that abort the whole batch.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Counters for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Input rows seen.
    pub rows: usize,
    /// Rows whose comments reached the report.
    pub reviewed: usize,
    /// Rows with an empty diff (no request made).
    pub skipped: usize,
    /// Rows dropped by the per-row error policy.
    pub failed: usize,
    /// Total report rows written.
    pub comments: usize,
}

/// Generate review comments for one commit.
///
/// Returns `None` when the diff annotates to nothing (empty diff); no
/// request is made in that case.
pub async fn generate_comments(
    provider: &dyn ChatProvider,
    diff_text: &str,
    commit_message: &str,
) -> Result<Option<Vec<ReviewComment>>, ReviewError> {
    let patches = parse_unified_diff(diff_text)?;
    let annotated = annotate_patches(&patches);
    if annotated.is_empty() {
        return Ok(None);
    }

    let prompt = build_review_prompt(&annotated, commit_message);
    let response = provider.complete(&prompt).await?;
    let comments = extract_comment_array(&response)?;
    Ok(Some(comments))
}

/// Review every record in the dataset at `input`, appending comments to
/// the report at `report_path`.
///
/// Strictly sequential: one in-flight request at a time, rows in dataset
/// order.
pub async fn run_batch(
    provider: &dyn ChatProvider,
    input: &Path,
    report_path: &Path,
) -> Result<BatchSummary, BatchError> {
    let records = dataset::read_records(input)?;
    let mut summary = BatchSummary::default();

    for record in &records {
        summary.rows += 1;
        let short = short_hash(&record.commit);

        match generate_comments(provider, &record.diff, &record.message).await {
            Ok(Some(comments)) => {
                match report::append_comments(
                    report_path,
                    &record.commit,
                    &record.message,
                    &comments,
                ) {
                    Ok(written) => {
                        summary.reviewed += 1;
                        summary.comments += written;
                        println!(
                            "  {} {}  {} comment(s)",
                            "✔".green().bold(),
                            short.bold(),
                            written,
                        );
                    }
                    Err(e) => {
                        summary.failed += 1;
                        eprintln!("Warning: failed to write report for {short}: {e}");
                    }
                }
            }
            Ok(None) => {
                summary.skipped += 1;
                println!("  {} {}  nothing to review", "ℹ".dimmed(), short.dimmed());
            }
            Err(ReviewError::Provider(e)) => return Err(BatchError::Provider(e)),
            Err(e) => {
                summary.failed += 1;
                eprintln!("Warning: skipping {short}: {e}");
            }
        }
    }

    Ok(summary)
}

/// Abbreviated commit hash for status lines.
fn short_hash(commit: &str) -> String {
    commit.chars().take(10).collect()
}
