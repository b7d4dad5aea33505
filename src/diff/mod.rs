//! Diff engine: unified diff parsing and annotated-text rendering.

pub mod format;
pub mod parser;

use thiserror::Error;

pub use format::annotate_patches;
pub use parser::parse_unified_diff;

/// Errors from the diff engine.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("diff parse error: {0}")]
    Parse(String),
}
