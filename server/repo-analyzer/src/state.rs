//! Shared application state.

use crate::analysis::Analyzer;

/// Built once at startup; read-only afterwards.
pub struct AppState {
  pub analyzer: Analyzer,
}
