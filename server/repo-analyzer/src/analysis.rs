//! Analysis orchestrator: reference parsing + walk, shaped for display.

use commit_classifier::Classifier;
use std::sync::Arc;
use tracing::info;

use crate::error::AnalyzeError;
use crate::reference::RepositoryReference;
use crate::types::AnalysisResult;
use crate::walker::Walker;

/// Holds the shared, read-only classifier and the walker for all requests.
pub struct Analyzer {
  walker: Walker,
  classifier: Arc<dyn Classifier>,
}

impl Analyzer {
  pub fn new(walker: Walker, classifier: Arc<dyn Classifier>) -> Self {
    Self { walker, classifier }
  }

  pub async fn analyze(&self, repo_url: &str) -> Result<AnalysisResult, AnalyzeError> {
    let repository = RepositoryReference::parse(repo_url)?;
    let files = self.walker.walk(&repository, self.classifier.as_ref()).await?;
    info!(%repository, files = files.len(), "analysis complete");

    Ok(AnalysisResult {
      repo_url: repo_url.to_string(),
      repository,
      git_ref: self.walker.git_ref().to_string(),
      files,
    })
  }
}
