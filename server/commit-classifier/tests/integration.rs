//! Integration tests against the shipped classifier artifact.

use std::io::Write;
use std::path::PathBuf;

use commit_classifier::{
  categorize, count_categories, run, ArtifactError, Category, Input, NaiveBayesModel,
};

fn shipped_artifact() -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("../..")
    .join(commit_classifier::DEFAULT_ARTIFACT_PATH)
}

fn model() -> NaiveBayesModel {
  NaiveBayesModel::load(shipped_artifact()).unwrap()
}

#[test]
fn shipped_artifact_loads_with_all_four_labels() {
  let model = model();
  let mut labels: Vec<&str> = model.labels().collect();
  labels.sort();
  assert_eq!(labels, vec!["Fix", "New Feature", "Refactor", "Unknown"]);
}

#[test]
fn shipped_artifact_classifies_typical_messages() {
  let model = model();
  let cases = [
    ("Fix, the bug from yesterday", Category::Fix),
    ("Add support for custom key bindings", Category::NewFeature),
    ("Implement new export command", Category::NewFeature),
    ("Refactor parser for better error messages", Category::Refactor),
    ("Rename config module and move helpers", Category::Refactor),
    ("Merge pull request #12 from owner/branch", Category::Unknown),
    ("Update README", Category::Unknown),
  ];
  for (message, expected) in cases {
    assert_eq!(
      categorize(&model, message).unwrap(),
      expected,
      "message: {:?}",
      message
    );
  }
}

#[test]
fn every_message_lands_in_exactly_one_category() {
  let model = model();
  let messages = [
    "Fix crash when config is missing",
    "Added webhook endpoint",
    "cleanup unused imports",
    "",
    "\n\n",
    "v2.0.0",
    "Revert \"Add thing\"",
  ];
  let count = count_categories(&model, messages).unwrap();
  assert_eq!(count.total() as usize, messages.len());
}

#[test]
fn run_reports_tokens_and_index() {
  let model = model();
  let out = run(
    &model,
    &Input {
      message: "Fix, the bug from yesterday".into(),
    },
  )
  .unwrap();
  assert_eq!(out.index, 3);
  assert_eq!(out.tokens, vec!["Fix", "bug", "yesterday"]);
  let json = serde_json::to_string(&out).unwrap();
  assert!(json.contains("\"category\":\"fix\""));
}

#[test]
fn corrupt_artifact_fails_to_load() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  file.write_all(b"{\"labels\": [").unwrap();
  let err = NaiveBayesModel::load(file.path()).unwrap_err();
  assert!(matches!(err, ArtifactError::Json(_)));
}

#[test]
fn artifact_with_foreign_label_fails_to_load() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  file
    .write_all(
      br#"{"labels": [{"name": "Chore", "log_prior": -1.0, "unseen_log_likelihood": -5.0}]}"#,
    )
    .unwrap();
  let err = NaiveBayesModel::load(file.path()).unwrap_err();
  assert!(matches!(err, ArtifactError::Invalid(_)));
}
