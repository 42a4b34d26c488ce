//! Remote repository host abstraction.
//!
//! `GitHubClient` is the production implementation; `fakes::MemoryHost`
//! serves canned trees and commits for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;
use crate::reference::RepositoryReference;

/// One entry of a recursive tree listing, in API order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
  pub path: String,
  /// `blob`, `tree` or `commit` (submodule).
  #[serde(rename = "type")]
  pub kind: String,
}

impl TreeEntry {
  pub fn new(path: impl Into<String>, kind: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      kind: kind.into(),
    }
  }

  pub fn blob(path: impl Into<String>) -> Self {
    Self::new(path, "blob")
  }
}

#[async_trait]
pub trait RepositoryHost: Send + Sync {
  /// Confirm the repository exists and is visible with our credentials.
  async fn resolve(&self, repo: &RepositoryReference) -> Result<(), AnalyzeError>;

  /// Full recursive tree at `git_ref`.
  async fn tree(
    &self,
    repo: &RepositoryReference,
    git_ref: &str,
  ) -> Result<Vec<TreeEntry>, AnalyzeError>;

  /// Messages of every commit touching `path`, newest first.
  async fn commit_messages(
    &self,
    repo: &RepositoryReference,
    path: &str,
  ) -> Result<Vec<String>, AnalyzeError>;
}
