//! Sherlock Repo Analyzer
//!
//! HTTP service that classifies the commit history of the first few entries of
//! a GitHub repository's tree and reports per-path category counts.

pub mod analysis;
pub mod config;
pub mod error;
pub mod fakes;
pub mod github;
mod handlers;
pub mod host;
pub mod reference;
pub mod render;
mod state;
pub mod telemetry;
pub mod types;
pub mod walker;

pub use analysis::Analyzer;
pub use config::Config;
pub use error::{AnalyzeError, ConfigError};
pub use github::{GitHubClient, GitHubConfig};
pub use handlers::{analyze, health, index, status_for};
pub use host::{RepositoryHost, TreeEntry};
pub use reference::RepositoryReference;
pub use state::AppState;
pub use types::{AnalysisResult, FileCategories};
pub use walker::Walker;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Routes: `GET /`, `POST /analyze`, `GET /health`.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/analyze", post(analyze))
    .route("/health", get(health))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}
