//! HTTP handlers for the analyzer.

use axum::{
  extract::{rejection::FormRejection, State},
  http::{header, HeaderMap, StatusCode},
  response::{Html, IntoResponse, Response},
  Form, Json,
};
use std::sync::Arc;
use tracing::{error, warn};

use crate::error::AnalyzeError;
use crate::render;
use crate::state::AppState;
use crate::types::{AnalyzeForm, ErrorOutput};

pub async fn health() -> &'static str {
  "ok"
}

pub async fn index() -> Html<String> {
  Html(render::landing_page())
}

/// Analyze the submitted repository. Answers JSON when the client accepts
/// `application/json`, an HTML page otherwise; failures use the same format,
/// including bodies that are not a decodable form.
pub async fn analyze(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  form: Result<Form<AnalyzeForm>, FormRejection>,
) -> Response {
  let json = wants_json(&headers);

  let form = match form {
    Ok(Form(form)) => form,
    Err(rejection) => {
      warn!(status = %rejection.status(), "analyze: unreadable form: {}", rejection.body_text());
      return failure(
        StatusCode::BAD_REQUEST,
        ErrorOutput::new("invalid_form", rejection.body_text()),
        json,
      );
    }
  };

  let repo_url = match form.repo_url.as_deref().map(str::trim) {
    Some(url) if !url.is_empty() => url.to_string(),
    _ => {
      warn!("analyze: missing repoUrl");
      return failure(
        StatusCode::BAD_REQUEST,
        ErrorOutput::new("missing_field", "form field repoUrl is required"),
        json,
      );
    }
  };

  match state.analyzer.analyze(&repo_url).await {
    Ok(result) if json => Json(result).into_response(),
    Ok(result) => Html(render::results_page(&result)).into_response(),
    Err(e) => {
      let status = status_for(&e);
      if status.is_server_error() {
        error!(repo_url = %repo_url, kind = e.kind(), "analyze failed: {}", e);
      } else {
        warn!(repo_url = %repo_url, kind = e.kind(), "analyze failed: {}", e);
      }
      failure(status, ErrorOutput::new(e.kind(), e.to_string()), json)
    }
  }
}

/// HTTP status for a request-level failure.
pub fn status_for(err: &AnalyzeError) -> StatusCode {
  match err {
    AnalyzeError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
    AnalyzeError::RepositoryNotFound { .. } | AnalyzeError::BranchNotFound { .. } => {
      StatusCode::NOT_FOUND
    }
    AnalyzeError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
    AnalyzeError::Unauthorized | AnalyzeError::Api { .. } | AnalyzeError::Network(_) => {
      StatusCode::BAD_GATEWAY
    }
    AnalyzeError::Classification(_) => StatusCode::INTERNAL_SERVER_ERROR,
  }
}

fn wants_json(headers: &HeaderMap) -> bool {
  headers
    .get(header::ACCEPT)
    .and_then(|v| v.to_str().ok())
    .map(|v| v.contains("application/json"))
    .unwrap_or(false)
}

fn failure(status: StatusCode, body: ErrorOutput, json: bool) -> Response {
  if json {
    (status, Json(body)).into_response()
  } else {
    (status, Html(render::error_page(&body.message))).into_response()
  }
}
