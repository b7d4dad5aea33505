//! Input dataset reader.
//!
//! The dataset is a CSV of bug-fix commits with two leading header rows.
//! Fields are addressed by fixed column position, not by header name:
//! commit hash, diff, and message sit at known offsets.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::{COL_COMMIT, COL_DIFF, COL_MESSAGE, HEADER_ROWS};
use crate::models::DiffRecord;

/// Errors while reading the input dataset.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("failed to read dataset row {row}: {source}")]
    Row { row: usize, source: csv::Error },

    #[error("dataset row {row} has no column {column}")]
    MissingColumn { row: usize, column: usize },
}

/// Read all commit records from the dataset at `path`.
///
/// The first [`HEADER_ROWS`] rows are skipped. Rows may be wider than the
/// columns this tool reads; they may not be narrower.
pub fn read_records(path: &Path) -> Result<Vec<DiffRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DatasetError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| DatasetError::Row { row, source: e })?;
        if row < HEADER_ROWS {
            continue;
        }

        let field = |column: usize| -> Result<String, DatasetError> {
            record
                .get(column)
                .map(str::to_string)
                .ok_or(DatasetError::MissingColumn { row, column })
        };

        records.push(DiffRecord {
            commit: field(COL_COMMIT)?,
            diff: field(COL_DIFF)?,
            message: field(COL_MESSAGE)?,
        });
    }

    Ok(records)
}
