//! Parsed-diff types: file patches, hunks, and diff lines.

use serde::{Deserialize, Serialize};

/// The kind of a line in a diff hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Line exists only in the target version (added).
    Added,
    /// Line exists only in the source version (removed).
    Removed,
    /// Line is unchanged (context).
    Context,
}

/// A single line in a diff hunk.
///
/// Source-side and target-side numbering are tracked independently; the
/// side a line does not exist on is `None`. The annotated-text formatter
/// relies on this separation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffLine {
    /// The kind of change.
    pub kind: LineKind,
    /// The content of the line (without the leading +/-/space).
    pub content: String,
    /// Line number in the source file (None for added lines).
    pub source_line: Option<u32>,
    /// Line number in the target file (None for removed lines).
    pub target_line: Option<u32>,
}

/// A contiguous hunk within a file patch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hunk {
    /// Starting line in the source file.
    pub source_start: u32,
    /// Number of source-side lines the hunk covers.
    pub source_count: u32,
    /// Starting line in the target file.
    pub target_start: u32,
    /// Number of target-side lines the hunk covers.
    pub target_count: u32,
    /// Optional section text from the hunk header (e.g., function name).
    pub section: Option<String>,
    /// The lines in this hunk, in diff order.
    pub lines: Vec<DiffLine>,
}

/// A patch for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePatch {
    /// Path of the source file (may be `/dev/null` for new files).
    pub source_path: String,
    /// Path of the target file (may be `/dev/null` for deleted files).
    pub target_path: String,
    /// The hunks in this patch.
    pub hunks: Vec<Hunk>,
}

impl FilePatch {
    /// Returns the most relevant file path (target side unless the file
    /// was deleted).
    pub fn path(&self) -> &str {
        if self.target_path == "/dev/null" {
            &self.source_path
        } else {
            &self.target_path
        }
    }
}
