//! hindsight — LLM-generated code review comments for bug-fix commit datasets.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use colored::Colorize;

use hindsight::constants::{APP_NAME, ENV_API_KEY, INPUT_FILE, OPENAI_MODEL, REPORT_FILENAME};
use hindsight::env::Env;
use hindsight::providers::openai::OpenAiProvider;
use hindsight::review;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let env = Env::real();
    let provider = OpenAiProvider::from_env(&env)
        .with_context(|| format!("set {ENV_API_KEY} to run {APP_NAME}"))?;

    println!(
        "  {} reviewing {} with {}",
        APP_NAME.bold(),
        INPUT_FILE,
        OPENAI_MODEL.dimmed(),
    );

    let summary = review::run_batch(
        &provider,
        Path::new(INPUT_FILE),
        Path::new(REPORT_FILENAME),
    )
    .await
    .context("review batch failed")?;

    println!(
        "\n  {} {} row(s): {} reviewed, {} skipped, {} failed. {} comment(s) appended to {}.",
        "Done.".green().bold(),
        summary.rows,
        summary.reviewed,
        summary.skipped,
        summary.failed,
        summary.comments,
        REPORT_FILENAME,
    );

    Ok(())
}
