//! Binary entrypoint for the repo analyzer.

use std::net::SocketAddr;
use std::sync::Arc;

use commit_classifier::NaiveBayesModel;
use repo_analyzer::{telemetry, Analyzer, AppState, Config, GitHubClient, Walker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let config = Config::from_env()?;
  telemetry::init_tracing(config.log_json);

  // No model, no server.
  let classifier = Arc::new(NaiveBayesModel::load(&config.classifier_path)?);

  let host = Arc::new(GitHubClient::new(config.github.clone())?);
  let walker = Walker::new(host, config.tree_cap, config.tree_ref.clone());
  let state = Arc::new(AppState {
    analyzer: Analyzer::new(walker, classifier),
  });

  let app = repo_analyzer::router(state);

  let addr = SocketAddr::new(config.bind, config.port);
  tracing::info!(%addr, tree_cap = config.tree_cap, tree_ref = %config.tree_ref, "repo-analyzer listening");

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
