//! Structured error types for repository analysis and startup.

use chrono::{DateTime, Utc};
use commit_classifier::ClassifyError;
use thiserror::Error;

/// Request-level analysis failures. Caught at the HTTP boundary.
#[derive(Debug, Error)]
pub enum AnalyzeError {
  #[error("invalid repository reference {input:?}: {reason}")]
  InvalidReference { input: String, reason: String },

  #[error("repository {repo} not found")]
  RepositoryNotFound { repo: String },

  #[error("reference {git_ref:?} not found in {repo}")]
  BranchNotFound { repo: String, git_ref: String },

  #[error("remote API rejected credentials")]
  Unauthorized,

  #[error("remote API rate limit exhausted{}", reset_suffix(.reset))]
  RateLimited { reset: Option<DateTime<Utc>> },

  #[error("remote API error {status}: {message}")]
  Api { status: u16, message: String },

  #[error("network: {0}")]
  Network(String),

  #[error("classification: {0}")]
  Classification(#[from] ClassifyError),
}

fn reset_suffix(reset: &Option<DateTime<Utc>>) -> String {
  match reset {
    Some(t) => format!(" (resets at {})", t.to_rfc3339()),
    None => String::new(),
  }
}

impl AnalyzeError {
  pub fn invalid_reference(input: &str, reason: &str) -> Self {
    Self::InvalidReference {
      input: input.to_string(),
      reason: reason.to_string(),
    }
  }

  /// Stable machine-readable name, used in error bodies and logs.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::InvalidReference { .. } => "invalid_reference",
      Self::RepositoryNotFound { .. } => "repository_not_found",
      Self::BranchNotFound { .. } => "branch_not_found",
      Self::Unauthorized => "unauthorized",
      Self::RateLimited { .. } => "rate_limited",
      Self::Api { .. } => "api",
      Self::Network(_) => "network",
      Self::Classification(_) => "classification",
    }
  }

  /// Resolution failures: the input does not name a reachable repository/ref.
  pub fn is_resolution(&self) -> bool {
    matches!(
      self,
      Self::InvalidReference { .. } | Self::RepositoryNotFound { .. } | Self::BranchNotFound { .. }
    )
  }

  /// Failures talking to the remote API itself.
  pub fn is_remote(&self) -> bool {
    matches!(
      self,
      Self::Unauthorized | Self::RateLimited { .. } | Self::Api { .. } | Self::Network(_)
    )
  }
}

impl From<reqwest::Error> for AnalyzeError {
  fn from(err: reqwest::Error) -> Self {
    AnalyzeError::Network(err.to_string())
  }
}

/// Startup configuration failures. Fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{var} must be set")]
  Missing { var: &'static str },

  #[error("{var} is still the placeholder value; set real credentials")]
  Placeholder { var: &'static str },

  #[error("{var}: invalid value {value:?}: {reason}")]
  Invalid {
    var: &'static str,
    value: String,
    reason: String,
  },
}

impl ConfigError {
  pub fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
    Self::Invalid {
      var,
      value: value.to_string(),
      reason: reason.into(),
    }
  }
}
