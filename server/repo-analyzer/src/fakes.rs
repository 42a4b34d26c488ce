//! In-memory repository host (testing only)
//!
//! `MemoryHost` serves one repository with a single `master` tree and canned
//! commit messages per path, and counts commit lookups so tests can assert
//! how many remote calls a walk would have made.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::AnalyzeError;
use crate::host::{RepositoryHost, TreeEntry};
use crate::reference::RepositoryReference;

#[derive(Debug)]
pub struct MemoryHost {
  repo: String,
  git_ref: String,
  entries: Vec<(TreeEntry, Vec<String>)>,
  failure: Option<fn() -> AnalyzeError>,
  commit_requests: AtomicUsize,
}

impl MemoryHost {
  /// Host serving `repo` (`owner/name`) at ref `master`.
  pub fn new(repo: &str) -> Self {
    Self {
      repo: repo.to_string(),
      git_ref: "master".to_string(),
      entries: Vec::new(),
      failure: None,
      commit_requests: AtomicUsize::new(0),
    }
  }

  /// Append a blob with its commit messages (newest first).
  pub fn with_file<I, S>(self, path: impl Into<String>, messages: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.with_entry(TreeEntry::blob(path), messages)
  }

  pub fn with_entry<I, S>(mut self, entry: TreeEntry, messages: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .entries
      .push((entry, messages.into_iter().map(Into::into).collect()));
    self
  }

  /// Make every call fail with the given error, e.g. a rate limit.
  pub fn failing_with(mut self, failure: fn() -> AnalyzeError) -> Self {
    self.failure = Some(failure);
    self
  }

  /// Number of commit history lookups served so far.
  pub fn commit_requests(&self) -> usize {
    self.commit_requests.load(Ordering::SeqCst)
  }

  fn check(&self, repo: &RepositoryReference) -> Result<(), AnalyzeError> {
    if let Some(failure) = self.failure {
      return Err(failure());
    }
    if repo.to_string() != self.repo {
      return Err(AnalyzeError::RepositoryNotFound {
        repo: repo.to_string(),
      });
    }
    Ok(())
  }
}

#[async_trait]
impl RepositoryHost for MemoryHost {
  async fn resolve(&self, repo: &RepositoryReference) -> Result<(), AnalyzeError> {
    self.check(repo)
  }

  async fn tree(
    &self,
    repo: &RepositoryReference,
    git_ref: &str,
  ) -> Result<Vec<TreeEntry>, AnalyzeError> {
    self.check(repo)?;
    if git_ref != self.git_ref {
      return Err(AnalyzeError::BranchNotFound {
        repo: repo.to_string(),
        git_ref: git_ref.to_string(),
      });
    }
    Ok(self.entries.iter().map(|(e, _)| e.clone()).collect())
  }

  async fn commit_messages(
    &self,
    repo: &RepositoryReference,
    path: &str,
  ) -> Result<Vec<String>, AnalyzeError> {
    self.check(repo)?;
    self.commit_requests.fetch_add(1, Ordering::SeqCst);
    Ok(
      self
        .entries
        .iter()
        .find(|(e, _)| e.path == path)
        .map(|(_, messages)| messages.clone())
        .unwrap_or_default(),
    )
  }
}
