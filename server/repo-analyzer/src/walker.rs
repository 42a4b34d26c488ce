//! Repository walker: capped tree selection plus per-path aggregation.

use commit_classifier::{count_categories, Classifier};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::AnalyzeError;
use crate::host::RepositoryHost;
use crate::reference::RepositoryReference;
use crate::types::FileCategories;

/// Default number of tree entries analyzed per repository.
pub const DEFAULT_TREE_CAP: usize = 5;
pub const DEFAULT_TREE_REF: &str = "master";

pub struct Walker {
  host: Arc<dyn RepositoryHost>,
  tree_cap: usize,
  git_ref: String,
}

impl Walker {
  pub fn new(host: Arc<dyn RepositoryHost>, tree_cap: usize, git_ref: impl Into<String>) -> Self {
    Self {
      host,
      tree_cap,
      git_ref: git_ref.into(),
    }
  }

  pub fn with_defaults(host: Arc<dyn RepositoryHost>) -> Self {
    Self::new(host, DEFAULT_TREE_CAP, DEFAULT_TREE_REF)
  }

  pub fn git_ref(&self) -> &str {
    &self.git_ref
  }

  /// Walk the first `tree_cap` tree entries, in API order, and count the
  /// categories of each entry's commit history.
  ///
  /// Remote calls are issued one at a time.
  pub async fn walk(
    &self,
    repo: &RepositoryReference,
    classifier: &dyn Classifier,
  ) -> Result<Vec<FileCategories>, AnalyzeError> {
    self.host.resolve(repo).await?;

    let tree = self.host.tree(repo, &self.git_ref).await?;
    let total = tree.len();
    let selected: Vec<_> = tree.into_iter().take(self.tree_cap).collect();
    info!(%repo, git_ref = %self.git_ref, total, cap = self.tree_cap, selected = selected.len(), "walking tree");

    let mut files = Vec::with_capacity(selected.len());
    for entry in selected {
      let messages = self.host.commit_messages(repo, &entry.path).await?;
      let counts = count_categories(classifier, &messages)?;
      debug!(path = %entry.path, kind = %entry.kind, commits = messages.len(), ?counts, "classified");
      files.push(FileCategories {
        path: entry.path,
        counts,
      });
    }
    Ok(files)
  }
}
