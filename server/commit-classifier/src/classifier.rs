//! Classifier interface and the Naive Bayes artifact behind it.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{ArtifactError, ClassifyError};
use crate::types::Category;

/// Maps a token sequence to a raw category label.
///
/// Implementations are immutable once built and shared across requests.
pub trait Classifier: Send + Sync {
  fn classify(&self, tokens: &[String]) -> Result<&str, ClassifyError>;
}

// ---------------------------------------------------------------------------
// Artifact format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct ArtifactFile {
  labels: Vec<LabelModel>,
}

/// Per-label parameters. Token keys are lowercase.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelModel {
  pub name: String,
  pub log_prior: f64,
  pub unseen_log_likelihood: f64,
  #[serde(default)]
  pub token_log_likelihoods: HashMap<String, f64>,
}

/// Pre-trained multinomial Naive Bayes model.
#[derive(Debug, Clone)]
pub struct NaiveBayesModel {
  labels: Vec<LabelModel>,
  digest: String,
}

impl NaiveBayesModel {
  /// Load and validate a JSON artifact from disk.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
    let path = path.as_ref();
    let raw = std::fs::read(path).map_err(|source| ArtifactError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let model = Self::from_slice(&raw)?;
    tracing::info!(
      path = %path.display(),
      digest = %model.digest,
      labels = model.labels.len(),
      "classifier artifact loaded"
    );
    Ok(model)
  }

  /// Parse and validate an artifact already in memory.
  pub fn from_slice(raw: &[u8]) -> Result<Self, ArtifactError> {
    let file: ArtifactFile = serde_json::from_slice(raw)?;
    validate(&file.labels)?;

    // First 8 bytes (16 hex chars) of blake3 identify the artifact in logs.
    let hex = blake3::hash(raw).to_hex();
    Ok(Self {
      labels: file.labels,
      digest: hex[..16].to_string(),
    })
  }

  /// Short content digest of the artifact bytes.
  pub fn digest(&self) -> &str {
    &self.digest
  }

  pub fn labels(&self) -> impl Iterator<Item = &str> {
    self.labels.iter().map(|l| l.name.as_str())
  }

  fn score(label: &LabelModel, tokens: &[String]) -> f64 {
    tokens.iter().fold(label.log_prior, |acc, token| {
      let key = token.to_lowercase();
      acc
        + label
          .token_log_likelihoods
          .get(&key)
          .copied()
          .unwrap_or(label.unseen_log_likelihood)
    })
  }
}

impl Classifier for NaiveBayesModel {
  fn classify(&self, tokens: &[String]) -> Result<&str, ClassifyError> {
    if tokens.is_empty() {
      return Err(ClassifyError::EmptyInput);
    }

    // Strict `>` keeps the first-listed label on ties.
    let mut best: Option<(&LabelModel, f64)> = None;
    for label in &self.labels {
      let s = Self::score(label, tokens);
      if best.map_or(true, |(_, top)| s > top) {
        best = Some((label, s));
      }
    }

    best
      .map(|(label, _)| label.name.as_str())
      .ok_or(ClassifyError::EmptyInput)
  }
}

fn validate(labels: &[LabelModel]) -> Result<(), ArtifactError> {
  if labels.is_empty() {
    return Err(ArtifactError::invalid("no labels"));
  }
  let mut seen = HashSet::new();
  for label in labels {
    if Category::from_label(&label.name).is_none() {
      return Err(ArtifactError::invalid(format!(
        "label {:?} is not one of Unknown|New Feature|Refactor|Fix",
        label.name
      )));
    }
    if !seen.insert(label.name.as_str()) {
      return Err(ArtifactError::invalid(format!(
        "duplicate label {:?}",
        label.name
      )));
    }
    let finite = label.log_prior.is_finite()
      && label.unseen_log_likelihood.is_finite()
      && label.token_log_likelihoods.values().all(|v| v.is_finite());
    if !finite {
      return Err(ArtifactError::invalid(format!(
        "label {:?} has non-finite scores",
        label.name
      )));
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  const ARTIFACT: &str = r#"{
    "labels": [
      {"name": "Unknown", "log_prior": -1.0, "unseen_log_likelihood": -6.0,
       "token_log_likelihoods": {"wip": -1.0}},
      {"name": "New Feature", "log_prior": -1.5, "unseen_log_likelihood": -7.0,
       "token_log_likelihoods": {"add": -1.0, "support": -1.5}},
      {"name": "Refactor", "log_prior": -1.5, "unseen_log_likelihood": -7.0,
       "token_log_likelihoods": {"refactor": -1.0, "cleanup": -1.5}},
      {"name": "Fix", "log_prior": -1.5, "unseen_log_likelihood": -7.0,
       "token_log_likelihoods": {"fix": -1.0, "bug": -1.5}}
    ]
  }"#;

  fn tokens(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
  }

  #[test]
  fn picks_highest_scoring_label() {
    let model = NaiveBayesModel::from_slice(ARTIFACT.as_bytes()).unwrap();
    assert_eq!(model.classify(&tokens(&["Fix", "bug"])).unwrap(), "Fix");
    assert_eq!(
      model.classify(&tokens(&["Add", "support"])).unwrap(),
      "New Feature"
    );
    assert_eq!(model.classify(&tokens(&["refactor"])).unwrap(), "Refactor");
  }

  #[test]
  fn out_of_vocabulary_falls_back_to_unseen() {
    let model = NaiveBayesModel::from_slice(ARTIFACT.as_bytes()).unwrap();
    // Unknown has the best prior and the mildest unseen penalty.
    assert_eq!(model.classify(&tokens(&["zzz", "qqq"])).unwrap(), "Unknown");
  }

  #[test]
  fn ties_go_to_first_label() {
    let raw = r#"{"labels": [
      {"name": "Refactor", "log_prior": -1.0, "unseen_log_likelihood": -5.0},
      {"name": "Fix", "log_prior": -1.0, "unseen_log_likelihood": -5.0}
    ]}"#;
    let model = NaiveBayesModel::from_slice(raw.as_bytes()).unwrap();
    assert_eq!(model.classify(&tokens(&["x"])).unwrap(), "Refactor");
  }

  #[test]
  fn empty_tokens_are_an_error() {
    let model = NaiveBayesModel::from_slice(ARTIFACT.as_bytes()).unwrap();
    let err = model.classify(&[]).unwrap_err();
    assert!(matches!(err, ClassifyError::EmptyInput));
  }

  #[test]
  fn rejects_foreign_label() {
    let raw = r#"{"labels": [
      {"name": "Docs", "log_prior": -1.0, "unseen_log_likelihood": -5.0}
    ]}"#;
    let err = NaiveBayesModel::from_slice(raw.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("Docs"));
  }

  #[test]
  fn rejects_duplicate_and_empty_labels() {
    let dup = r#"{"labels": [
      {"name": "Fix", "log_prior": -1.0, "unseen_log_likelihood": -5.0},
      {"name": "Fix", "log_prior": -2.0, "unseen_log_likelihood": -5.0}
    ]}"#;
    assert!(NaiveBayesModel::from_slice(dup.as_bytes()).is_err());
    assert!(NaiveBayesModel::from_slice(br#"{"labels": []}"#).is_err());
  }

  #[test]
  fn rejects_malformed_json() {
    let err = NaiveBayesModel::from_slice(b"not json").unwrap_err();
    assert!(matches!(err, ArtifactError::Json(_)));
  }

  #[test]
  fn digest_is_stable_hex() {
    let a = NaiveBayesModel::from_slice(ARTIFACT.as_bytes()).unwrap();
    let b = NaiveBayesModel::from_slice(ARTIFACT.as_bytes()).unwrap();
    assert_eq!(a.digest(), b.digest());
    assert_eq!(a.digest().len(), 16);
    assert!(a.digest().chars().all(|c| c.is_ascii_hexdigit()));
  }

  #[test]
  fn load_missing_file_is_io_error() {
    let err = NaiveBayesModel::load("/nonexistent/commit_msg_classifier.json").unwrap_err();
    assert!(matches!(err, ArtifactError::Io { .. }));
  }
}
