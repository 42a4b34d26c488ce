//! Stub classifiers (testing only)
//!
//! Satisfy the [`Classifier`] contract without a trained artifact.

use crate::classifier::Classifier;
use crate::error::ClassifyError;

/// Always answers with the same label, whatever the tokens.
#[derive(Debug, Clone)]
pub struct ConstantClassifier {
  label: String,
}

impl ConstantClassifier {
  pub fn new(label: impl Into<String>) -> Self {
    Self {
      label: label.into(),
    }
  }
}

impl Classifier for ConstantClassifier {
  fn classify(&self, tokens: &[String]) -> Result<&str, ClassifyError> {
    if tokens.is_empty() {
      return Err(ClassifyError::EmptyInput);
    }
    Ok(&self.label)
  }
}

/// Keyword rules: `fix` → Fix, `add` → New Feature, `refactor` → Refactor,
/// anything else → Unknown. First match in token order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl Classifier for KeywordClassifier {
  fn classify(&self, tokens: &[String]) -> Result<&str, ClassifyError> {
    if tokens.is_empty() {
      return Err(ClassifyError::EmptyInput);
    }
    for token in tokens {
      match token.to_lowercase().as_str() {
        "fix" | "fixes" | "fixed" => return Ok("Fix"),
        "add" | "adds" | "added" => return Ok("New Feature"),
        "refactor" | "refactors" => return Ok("Refactor"),
        _ => {}
      }
    }
    Ok("Unknown")
  }
}
