//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is `{"message": "..."}`. Output lines are either:
//! - An Output (category, index, normalized tokens)
//! - An ErrorOutput (when the line is not valid JSON or classification fails)
//!
//! The artifact path is the first argument, else `SHERLOCK_CLASSIFIER_PATH`,
//! else `commit_msg_classifier.json`.

use commit_classifier::{run, ErrorOutput, Input, NaiveBayesModel, DEFAULT_ARTIFACT_PATH};
use std::io::{self, BufRead, Write};

fn main() {
  tracing_init();

  let path = std::env::args()
    .nth(1)
    .or_else(|| std::env::var("SHERLOCK_CLASSIFIER_PATH").ok())
    .unwrap_or_else(|| DEFAULT_ARTIFACT_PATH.to_string());

  let model = match NaiveBayesModel::load(&path) {
    Ok(m) => m,
    Err(e) => {
      let _ = writeln!(io::stderr(), "commit-classifier: {}", e);
      std::process::exit(1);
    }
  };

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        let _ = writeln!(io::stderr(), "commit-classifier: read error: {}", e);
        std::process::exit(1);
      }
    };

    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let input: Input = match serde_json::from_str(trimmed) {
      Ok(v) => v,
      Err(e) => {
        let err = ErrorOutput::new("json", format!("json parse: {}", e));
        let _ = serde_json::to_writer(&mut out, &err);
        let _ = writeln!(out);
        continue;
      }
    };

    match run(&model, &input) {
      Ok(output) => {
        let _ = serde_json::to_writer(&mut out, &output);
      }
      Err(e) => {
        let _ = serde_json::to_writer(&mut out, &ErrorOutput::new(e.kind(), e.to_string()));
      }
    }
    let _ = writeln!(out);
  }

  let _ = out.flush();
}

/// Logs go to stderr so stdout stays a clean JSON-lines stream.
fn tracing_init() {
  let filter = tracing_subscriber::EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(io::stderr)
    .try_init()
    .ok();
}
