//! GitHub REST v3 client implementing [`RepositoryHost`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::AnalyzeError;
use crate::host::{RepositoryHost, TreeEntry};
use crate::reference::RepositoryReference;

const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("sherlock-repo-analyzer/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the GitHub API.
#[derive(Debug, Clone)]
pub struct GitHubConfig {
  /// API root, e.g. `https://api.github.com`.
  pub api_url: String,
  pub username: String,
  pub password: String,
  pub request_timeout: Duration,
  /// Stop paging commit history after this many pages (None = all).
  pub max_commit_pages: Option<usize>,
}

pub struct GitHubClient {
  config: GitHubConfig,
  http: reqwest::Client,
}

/// What a request was looking up; decides how a 404 is reported.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'a> {
  Repository(&'a RepositoryReference),
  Tree(&'a RepositoryReference, &'a str),
  Commits(&'a RepositoryReference),
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
  tree: Vec<TreeEntry>,
  #[serde(default)]
  truncated: bool,
}

#[derive(Debug, Deserialize)]
struct CommitItem {
  commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
  message: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
  message: String,
}

impl GitHubClient {
  pub fn new(config: GitHubConfig) -> Result<Self, AnalyzeError> {
    let http = reqwest::Client::builder()
      .user_agent(USER_AGENT)
      .timeout(config.request_timeout)
      .build()?;
    Ok(Self { config, http })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
  }

  fn get(&self, url: &str) -> reqwest::RequestBuilder {
    self
      .http
      .get(url)
      .basic_auth(&self.config.username, Some(&self.config.password))
      .header(ACCEPT, "application/vnd.github+json")
      .header("X-GitHub-Api-Version", "2022-11-28")
  }
}

#[async_trait]
impl RepositoryHost for GitHubClient {
  async fn resolve(&self, repo: &RepositoryReference) -> Result<(), AnalyzeError> {
    let url = self.url(&format!("/repos/{}/{}", repo.owner(), repo.name()));
    let resp = self.get(&url).send().await?;
    check(resp, Lookup::Repository(repo)).await?;
    Ok(())
  }

  async fn tree(
    &self,
    repo: &RepositoryReference,
    git_ref: &str,
  ) -> Result<Vec<TreeEntry>, AnalyzeError> {
    let url = self.url(&format!(
      "/repos/{}/{}/git/trees/{}",
      repo.owner(),
      repo.name(),
      git_ref
    ));
    let resp = self.get(&url).query(&[("recursive", "1")]).send().await?;
    let body: TreeResponse = check(resp, Lookup::Tree(repo, git_ref)).await?.json().await?;
    if body.truncated {
      warn!(%repo, git_ref, entries = body.tree.len(), "tree listing truncated by the API");
    }
    Ok(body.tree)
  }

  async fn commit_messages(
    &self,
    repo: &RepositoryReference,
    path: &str,
  ) -> Result<Vec<String>, AnalyzeError> {
    let url = self.url(&format!("/repos/{}/{}/commits", repo.owner(), repo.name()));
    let per_page = PER_PAGE.to_string();
    let mut messages = Vec::new();
    let mut page = 1usize;

    loop {
      if let Some(max) = self.config.max_commit_pages {
        if page > max {
          warn!(%repo, path, pages = max, "commit history cut at page limit");
          break;
        }
      }

      let page_str = page.to_string();
      let resp = self
        .get(&url)
        .query(&[
          ("path", path),
          ("per_page", per_page.as_str()),
          ("page", page_str.as_str()),
        ])
        .send()
        .await?;

      // Empty repositories answer 409 on the commits endpoint.
      if resp.status() == StatusCode::CONFLICT {
        break;
      }

      let batch: Vec<CommitItem> = check(resp, Lookup::Commits(repo)).await?.json().await?;
      let n = batch.len();
      messages.extend(batch.into_iter().map(|c| c.commit.message));
      debug!(%repo, path, page, n, "fetched commit page");

      if n < PER_PAGE {
        break;
      }
      page += 1;
    }

    Ok(messages)
  }
}

async fn check(resp: Response, lookup: Lookup<'_>) -> Result<Response, AnalyzeError> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let headers = resp.headers().clone();
  let body = resp.text().await.unwrap_or_default();
  Err(error_for_status(status, &headers, &body, lookup))
}

/// Map a non-success response to the matching error variant.
pub fn error_for_status(
  status: StatusCode,
  headers: &HeaderMap,
  body: &str,
  lookup: Lookup<'_>,
) -> AnalyzeError {
  let remaining = headers
    .get("x-ratelimit-remaining")
    .and_then(|v| v.to_str().ok())
    .map(str::trim);
  let exhausted = remaining == Some("0");

  if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted) {
    return AnalyzeError::RateLimited {
      reset: rate_limit_reset(headers),
    };
  }

  match (status.as_u16(), lookup) {
    (401, _) => AnalyzeError::Unauthorized,
    (404, Lookup::Repository(repo) | Lookup::Commits(repo)) => AnalyzeError::RepositoryNotFound {
      repo: repo.to_string(),
    },
    (404 | 409 | 422, Lookup::Tree(repo, git_ref)) => AnalyzeError::BranchNotFound {
      repo: repo.to_string(),
      git_ref: git_ref.to_string(),
    },
    (code, _) => AnalyzeError::Api {
      status: code,
      message: api_message(status, body),
    },
  }
}

fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
  let secs: i64 = headers
    .get("x-ratelimit-reset")?
    .to_str()
    .ok()?
    .trim()
    .parse()
    .ok()?;
  DateTime::from_timestamp(secs, 0)
}

fn api_message(status: StatusCode, body: &str) -> String {
  match serde_json::from_str::<ApiMessage>(body) {
    Ok(m) => m.message,
    Err(_) => status
      .canonical_reason()
      .unwrap_or("unexpected status")
      .to_string(),
  }
}
