//! clarifai-score: score one requirement from the command line.
//!
//! Usage:
//!   clarifai-score [path/to/requirement.json]   (reads stdin when no path is given)
//!
//! Input JSON: `{"title", "business_goal", "data_scope"?, "expected_output"?, "priority"?, "files"?}`.
//! `priority` is free-form ("high", "LOW", ...); anything unrecognized counts as Medium.
//! `files` are rendered into the upload summary line before scoring.
//! Prints the scored payload as pretty JSON on stdout.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clarifai_scorer::upload::append_upload_summary;
use clarifai_scorer::{Priority, ScoringInput};

#[derive(Debug, Deserialize)]
struct CliRequirement {
    title: String,
    business_goal: String,
    #[serde(default)]
    data_scope: String,
    #[serde(default)]
    expected_output: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    files: Vec<String>,
}

impl CliRequirement {
    fn into_input(self) -> ScoringInput {
        let mut input = ScoringInput::new(self.title, self.business_goal)
            .with_data_scope(append_upload_summary(&self.data_scope, &self.files))
            .with_priority(
                self.priority
                    .as_deref()
                    .map(Priority::parse_lenient)
                    .unwrap_or_default(),
            );
        input.expected_output = self.expected_output;
        input
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn read_input(path: Option<String>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(&p).with_context(|| format!("reading {p}")),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading requirement from stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let raw = read_input(std::env::args().nth(1))?;
    let req: CliRequirement =
        serde_json::from_str(&raw).context("parsing requirement JSON")?;

    let result = clarifai_scorer::service().evaluate(&req.into_input());

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
