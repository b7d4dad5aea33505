//! Integration test using a mock chat provider.
//!
//! Validates the batch pipeline end-to-end, from dataset CSV to report
//! CSV, without making real API calls by using mock implementations of
//! ChatProvider.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use hindsight::providers::{ChatProvider, ProviderError};
use hindsight::review::{self, BatchError};

/// A unified diff exercising context, removal, and addition.
const SAMPLE_DIFF: &str = "diff --git a/src/lib.rs b/src/lib.rs\n\
index 1111111..2222222 100644\n\
--- a/src/lib.rs\n\
+++ b/src/lib.rs\n\
@@ -1,3 +1,3 @@\n\
 fn main() {\n\
-    let x = divide(a, 0);\n\
+    let x = divide(a, b);\n\
 }\n";

/// A canned model reply: prose-wrapped JSON array with one comment.
const SAMPLE_RESPONSE: &str = "Here are the review comments:\n\
[{\"filename\": \"src/lib.rs\", \"code_line\": 2, \"comment\": \"Validate that b is non-zero before dividing.\", \"label\": \"Defect\", \"label_justification\": \"Functional - Validation\"}]\n\
Done.";

/// A mock provider that returns the same canned response for every call
/// and counts how often it is called.
struct MockProvider {
    response: String,
    calls: AtomicUsize,
}

impl MockProvider {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// A mock provider that replays a fixed sequence of responses.
struct SequencedProvider {
    responses: Mutex<Vec<String>>,
}

impl SequencedProvider {
    fn new(responses: &[&str]) -> Self {
        let mut responses: Vec<String> = responses.iter().map(|s| s.to_string()).collect();
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
        }
    }
}

#[async_trait]
impl ChatProvider for SequencedProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.responses
            .lock()
            .expect("responses lock")
            .pop()
            .ok_or_else(|| ProviderError::ApiError("out of canned responses".to_string()))
    }
}

/// A mock provider that always fails the call.
struct FailingProvider;

#[async_trait]
impl ChatProvider for FailingProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::ApiError("mock API failure".to_string()))
    }
}

/// Write a dataset file with two header rows and the given data rows.
fn write_dataset(dir: &Path, rows: &[(&str, &str, &str)]) -> std::path::PathBuf {
    let path = dir.join("bug_fix_pairs.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "bug fix pairs,,,,,,,,").unwrap();
    writeln!(file, "commit,a,b,diff,c,d,e,f,message").unwrap();
    for (commit, diff, message) in rows {
        writeln!(
            file,
            "{commit},f1,f2,\"{}\",f4,f5,f6,f7,\"{}\"",
            diff.replace('"', "\"\""),
            message.replace('"', "\"\""),
        )
        .unwrap();
    }
    path
}

fn read_report(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn batch_writes_parsed_comments_to_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), &[("abc123", SAMPLE_DIFF, "Fix division by zero")]);
    let report = dir.path().join("review_comments.csv");

    let provider = MockProvider::new(SAMPLE_RESPONSE);
    let summary = review::run_batch(&provider, &input, &report)
        .await
        .expect("batch should succeed");

    assert_eq!(summary.rows, 1);
    assert_eq!(summary.reviewed, 1);
    assert_eq!(summary.comments, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(provider.call_count(), 1);

    let lines = read_report(&report);
    assert_eq!(
        lines[0],
        "commit,commit_message,filename,code_line,comment_content,label,justification"
    );
    assert!(lines[1].starts_with("abc123,Fix division by zero,src/lib.rs,2,"));
    assert!(lines[1].ends_with(",Defect,Functional - Validation"));
}

#[tokio::test]
async fn empty_diff_rows_never_reach_the_provider() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(
        dir.path(),
        &[
            ("aaa111", "", "No patch recorded"),
            ("bbb222", SAMPLE_DIFF, "Fix it"),
        ],
    );
    let report = dir.path().join("review_comments.csv");

    let provider = MockProvider::new(SAMPLE_RESPONSE);
    let summary = review::run_batch(&provider, &input, &report)
        .await
        .expect("batch should succeed");

    // Only the row with a real diff produced a request
    assert_eq!(provider.call_count(), 1);
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.reviewed, 1);
}

#[tokio::test]
async fn unextractable_response_fails_the_row_not_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(
        dir.path(),
        &[
            ("aaa111", SAMPLE_DIFF, "First fix"),
            ("bbb222", SAMPLE_DIFF, "Second fix"),
        ],
    );
    let report = dir.path().join("review_comments.csv");

    // First reply has no JSON array; second is fine
    let provider = SequencedProvider::new(&["I could not find any issues.", SAMPLE_RESPONSE]);
    let summary = review::run_batch(&provider, &input, &report)
        .await
        .expect("batch should continue past a format error");

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reviewed, 1);

    // Only the second commit made it into the report
    let lines = read_report(&report);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("bbb222,"));
}

#[tokio::test]
async fn unparseable_diff_fails_the_row_not_the_batch() {
    let truncated = "--- a/f.rs\n+++ b/f.rs\n@@ -1,5 +1,5 @@\n one context line\n";
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(
        dir.path(),
        &[
            ("aaa111", truncated, "Broken diff"),
            ("bbb222", SAMPLE_DIFF, "Good diff"),
        ],
    );
    let report = dir.path().join("review_comments.csv");

    let provider = MockProvider::new(SAMPLE_RESPONSE);
    let summary = review::run_batch(&provider, &input, &report)
        .await
        .expect("batch should continue past a parse error");

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.reviewed, 1);
    // The malformed diff never produced a request
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn provider_failure_aborts_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_dataset(dir.path(), &[("abc123", SAMPLE_DIFF, "Fix it")]);
    let report = dir.path().join("review_comments.csv");

    let result = review::run_batch(&FailingProvider, &input, &report).await;
    match result {
        Err(BatchError::Provider(e)) => assert!(e.to_string().contains("mock API failure")),
        Err(e) => panic!("expected a provider error, got {e}"),
        Ok(_) => panic!("expected the batch to abort"),
    }
    assert!(!report.exists());
}

#[tokio::test]
async fn successive_batches_append_under_one_header() {
    let dir = tempfile::tempdir().unwrap();
    let input1 = write_dataset(dir.path(), &[("run1commit", SAMPLE_DIFF, "First run")]);
    let report = dir.path().join("review_comments.csv");

    let provider = MockProvider::new(SAMPLE_RESPONSE);
    review::run_batch(&provider, &input1, &report).await.unwrap();
    review::run_batch(&provider, &input1, &report).await.unwrap();

    let lines = read_report(&report);
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines
            .iter()
            .filter(|l| l.starts_with("commit,commit_message,"))
            .count(),
        1
    );
    assert!(lines[1].starts_with("run1commit,"));
    assert!(lines[2].starts_with("run1commit,"));
}

#[tokio::test]
async fn missing_dataset_is_a_dataset_error() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("review_comments.csv");

    let provider = MockProvider::new(SAMPLE_RESPONSE);
    let result =
        review::run_batch(&provider, &dir.path().join("absent.csv"), &report).await;
    assert!(matches!(result, Err(BatchError::Dataset(_))));
}
