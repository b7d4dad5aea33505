//! Unified diff format parser.
//!
//! Parses `git diff` output as well as bare unified diffs that start at a
//! `---`/`+++` header pair. Hunk bodies are consumed count-driven against
//! the `@@` header ranges, so a truncated or internally inconsistent hunk
//! is a parse error rather than a silently shortened patch.

use std::iter::Peekable;
use std::str::Lines;

use crate::diff::DiffError;
use crate::models::{DiffLine, FilePatch, Hunk, LineKind};

/// Parse a unified diff string into a list of file patches.
///
/// Input with no recognizable file headers parses to an empty list; the
/// caller treats that as "nothing to review".
pub fn parse_unified_diff(input: &str) -> Result<Vec<FilePatch>, DiffError> {
    let mut patches = Vec::new();
    let mut lines = input.lines().peekable();

    while let Some(&line) = lines.peek() {
        if line.starts_with("diff --git ") {
            lines.next();
            patches.push(parse_git_patch(line, &mut lines)?);
        } else if line.starts_with("--- ") {
            patches.push(parse_bare_patch(&mut lines)?);
        } else {
            // Commit headers, prose, or other junk between patches
            lines.next();
        }
    }

    Ok(patches)
}

/// Parse one file patch introduced by a `diff --git a/... b/...` line.
///
/// Paths come from the header but are overridden by the `---`/`+++`
/// lines when present (the header split is ambiguous for paths with
/// spaces; the file lines are not).
fn parse_git_patch(
    header: &str,
    lines: &mut Peekable<Lines<'_>>,
) -> Result<FilePatch, DiffError> {
    let (mut source_path, mut target_path) = paths_from_git_header(header);
    let mut hunks = Vec::new();

    while let Some(&next) = lines.peek() {
        if next.starts_with("diff --git ") {
            break;
        } else if let Some(rest) = next.strip_prefix("--- ") {
            source_path = clean_path(rest);
            lines.next();
        } else if let Some(rest) = next.strip_prefix("+++ ") {
            target_path = clean_path(rest);
            lines.next();
        } else if next.starts_with("@@") {
            hunks.push(parse_hunk(lines)?);
        } else if is_extended_header(next) {
            lines.next();
        } else {
            break;
        }
    }

    Ok(FilePatch {
        source_path,
        target_path,
        hunks,
    })
}

/// Parse one file patch that starts directly at a `---`/`+++` pair.
fn parse_bare_patch(lines: &mut Peekable<Lines<'_>>) -> Result<FilePatch, DiffError> {
    let source_line = lines.next().unwrap_or_default();
    let source_path = source_line
        .strip_prefix("--- ")
        .map(clean_path)
        .unwrap_or_default();

    let target_path = match lines.next() {
        Some(line) => match line.strip_prefix("+++ ") {
            Some(rest) => clean_path(rest),
            None => {
                return Err(DiffError::Parse(format!(
                    "expected '+++' target header after '{source_line}', got '{line}'"
                )));
            }
        },
        None => {
            return Err(DiffError::Parse(format!(
                "diff ends after source header '{source_line}'"
            )));
        }
    };

    let mut hunks = Vec::new();
    while lines.peek().is_some_and(|l| l.starts_with("@@")) {
        hunks.push(parse_hunk(lines)?);
    }

    Ok(FilePatch {
        source_path,
        target_path,
        hunks,
    })
}

/// Parse a single hunk starting at its `@@` header line.
///
/// Consumes exactly the number of source- and target-side lines the
/// header declares, assigning line numbers from the hunk anchors.
fn parse_hunk(lines: &mut Peekable<Lines<'_>>) -> Result<Hunk, DiffError> {
    let header_line = lines.next().unwrap_or_default();
    let (source_start, source_count, target_start, target_count, section) =
        parse_hunk_header(header_line).ok_or_else(|| {
            DiffError::Parse(format!("malformed hunk header: '{header_line}'"))
        })?;

    let mut hunk_lines = Vec::new();
    let mut source_line = source_start;
    let mut target_line = target_start;
    let mut source_seen = 0u32;
    let mut target_seen = 0u32;

    while source_seen < source_count || target_seen < target_count {
        let Some(line) = lines.next() else {
            return Err(DiffError::Parse(format!(
                "truncated hunk: expected {source_count} source and {target_count} target \
                 line(s), got {source_seen} and {target_seen}"
            )));
        };

        if let Some(content) = line.strip_prefix('+') {
            hunk_lines.push(DiffLine {
                kind: LineKind::Added,
                content: content.to_string(),
                source_line: None,
                target_line: Some(target_line),
            });
            target_line += 1;
            target_seen += 1;
        } else if let Some(content) = line.strip_prefix('-') {
            hunk_lines.push(DiffLine {
                kind: LineKind::Removed,
                content: content.to_string(),
                source_line: Some(source_line),
                target_line: None,
            });
            source_line += 1;
            source_seen += 1;
        } else if line.starts_with(' ') || line.is_empty() {
            // Some tools emit context lines with the leading space trimmed
            let content = line.strip_prefix(' ').unwrap_or(line);
            hunk_lines.push(DiffLine {
                kind: LineKind::Context,
                content: content.to_string(),
                source_line: Some(source_line),
                target_line: Some(target_line),
            });
            source_line += 1;
            target_line += 1;
            source_seen += 1;
            target_seen += 1;
        } else if line.starts_with('\\') {
            // "\ No newline at end of file" carries no content
            continue;
        } else {
            return Err(DiffError::Parse(format!(
                "unexpected line inside hunk: '{line}'"
            )));
        }
    }

    if source_seen != source_count || target_seen != target_count {
        return Err(DiffError::Parse(format!(
            "hunk body disagrees with header '{header_line}': \
             counted {source_seen} source and {target_seen} target line(s)"
        )));
    }

    Ok(Hunk {
        source_start,
        source_count,
        target_start,
        target_count,
        section,
        lines: hunk_lines,
    })
}

/// Parse a `@@ -start,count +start,count @@ section` line.
fn parse_hunk_header(line: &str) -> Option<(u32, u32, u32, u32, Option<String>)> {
    let line = line.strip_prefix("@@ ")?;
    let end = line.find(" @@")?;
    let range_part = &line[..end];
    let section = {
        let rest = &line[end + 3..];
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest.trim().to_string())
        }
    };

    let (source, target) = range_part.split_once(' ')?;
    let (source_start, source_count) = parse_range(source.strip_prefix('-')?)?;
    let (target_start, target_count) = parse_range(target.strip_prefix('+')?)?;

    Some((source_start, source_count, target_start, target_count, section))
}

/// Parse "start,count" or "start" (count defaults to 1).
fn parse_range(s: &str) -> Option<(u32, u32)> {
    match s.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((s.parse().ok()?, 1)),
    }
}

/// Best-effort path pair from a `diff --git a/x b/x` header.
fn paths_from_git_header(header: &str) -> (String, String) {
    let rest = header.strip_prefix("diff --git ").unwrap_or(header);
    match rest.split_once(' ') {
        Some((a, b)) => (clean_path(a), clean_path(b)),
        None => (clean_path(rest), clean_path(rest)),
    }
}

/// Normalize a path label from a header line: drop a trailing tab-separated
/// timestamp and the single-letter git prefix (`a/`, `b/`, and the
/// `diff.mnemonicPrefix` variants).
fn clean_path(label: &str) -> String {
    let path = label.split('\t').next().unwrap_or(label).trim();
    if path == "/dev/null" {
        return path.to_string();
    }
    match path.split_once('/') {
        Some((prefix, rest)) if matches!(prefix, "a" | "b" | "c" | "i" | "o" | "w") => {
            rest.to_string()
        }
        _ => path.to_string(),
    }
}

/// Extended git headers between the `diff --git` line and the first hunk.
fn is_extended_header(line: &str) -> bool {
    const PREFIXES: [&str; 12] = [
        "index ",
        "mode ",
        "old mode",
        "new mode",
        "new file mode",
        "deleted file mode",
        "similarity index",
        "dissimilarity index",
        "rename ",
        "copy ",
        "Binary files",
        "GIT binary patch",
    ];
    PREFIXES.iter().any(|p| line.starts_with(p))
}
