//! Annotated-text rendering of parsed patches.
//!
//! Produces the plain-text block sent to the model: every diff line
//! prefixed with its line number and change marker, so the model can
//! anchor comments to concrete lines.

use crate::models::{FilePatch, Hunk, LineKind};

/// Render parsed patches as one line-numbered, change-annotated block.
///
/// Each hunk is preceded by a `Filename:` marker line. Added and context
/// lines carry target-side numbers; removed lines carry source-side
/// numbers. Context lines get a three-space gap where the marker would
/// be. An empty patch list renders as an empty string, the signal that
/// there is nothing to review.
pub fn annotate_patches(patches: &[FilePatch]) -> String {
    let mut out = String::new();
    for patch in patches {
        for hunk in &patch.hunks {
            out.push_str(&format!("Filename: {}\n", patch.path()));
            out.push_str(&annotate_hunk(hunk));
            out.push('\n');
        }
    }
    out
}

fn annotate_hunk(hunk: &Hunk) -> String {
    let mut out = String::new();
    for line in &hunk.lines {
        match (line.kind, line.target_line, line.source_line) {
            (LineKind::Added, Some(n), _) => {
                out.push_str(&format!("{n} + {}\n", line.content));
            }
            (LineKind::Removed, _, Some(n)) => {
                out.push_str(&format!("{n} - {}\n", line.content));
            }
            (LineKind::Context, Some(n), _) => {
                out.push_str(&format!("{n}   {}\n", line.content));
            }
            // Unnumbered on its own side; the parser never produces this
            _ => {}
        }
    }
    out
}
