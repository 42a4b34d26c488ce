//! Structured error types for the classifier.

use std::path::PathBuf;
use thiserror::Error;

/// Per-message classification failures.
#[derive(Debug, Error)]
pub enum ClassifyError {
  /// Nothing left to classify after normalization.
  #[error("empty token sequence")]
  EmptyInput,

  /// The classifier answered with a label outside the four categories.
  #[error("classifier returned unknown label {label:?}")]
  UnknownLabel { label: String },
}

impl ClassifyError {
  pub fn unknown_label(label: &str) -> Self {
    Self::UnknownLabel {
      label: label.to_string(),
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Self::EmptyInput => "empty_input",
      Self::UnknownLabel { .. } => "unknown_label",
    }
  }
}

/// Failures loading the serialized classifier. Fatal at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
  #[error("artifact {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("artifact json: {0}")]
  Json(#[from] serde_json::Error),

  #[error("artifact invalid: {0}")]
  Invalid(String),
}

impl ArtifactError {
  pub fn invalid(msg: impl Into<String>) -> Self {
    Self::Invalid(msg.into())
  }
}
