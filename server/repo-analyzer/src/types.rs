//! Request/response types for the analyzer.

use commit_classifier::CategoryCount;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::reference::RepositoryReference;

/// `POST /analyze` form body. The field is optional so a missing value
/// reaches the handler instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeForm {
  #[serde(rename = "repoUrl", default)]
  pub repo_url: Option<String>,
}

/// Category counts for one analyzed tree entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCategories {
  pub path: String,
  pub counts: CategoryCount,
}

/// Outcome of one analysis, files in tree order.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
  /// The URL exactly as submitted.
  pub repo_url: String,
  pub repository: RepositoryReference,
  pub git_ref: String,
  pub files: Vec<FileCategories>,
}

impl AnalysisResult {
  pub fn get(&self, path: &str) -> Option<&CategoryCount> {
    self.files.iter().find(|f| f.path == path).map(|f| &f.counts)
  }
}

/// JSON shape: `{ "<path>": [u, n, r, f], ..., "repo_base_url": "<url>" }`.
impl Serialize for AnalysisResult {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(self.files.len() + 1))?;
    for file in &self.files {
      map.serialize_entry(&file.path, &file.counts)?;
    }
    map.serialize_entry("repo_base_url", &self.repo_url)?;
    map.end()
  }
}

/// Structured error body for failed requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub kind: String,
  pub message: String,
}

impl ErrorOutput {
  pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      error: true,
      kind: kind.into(),
      message: message.into(),
    }
  }
}
