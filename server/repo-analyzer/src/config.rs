//! Process configuration from environment variables.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::github::GitHubConfig;
use crate::walker::{DEFAULT_TREE_CAP, DEFAULT_TREE_REF};

const USERNAME_VAR: &str = "SHERLOCK_GITHUB_USERNAME";
const PASSWORD_VAR: &str = "SHERLOCK_GITHUB_PASSWORD";

#[derive(Debug, Clone)]
pub struct Config {
  pub bind: IpAddr,
  pub port: u16,
  pub github: GitHubConfig,
  /// Tree entries analyzed per repository (rate-limit guard).
  pub tree_cap: usize,
  /// Git reference whose tree is listed.
  pub tree_ref: String,
  pub classifier_path: PathBuf,
  /// Newline-delimited JSON logs instead of the human format.
  pub log_json: bool,
}

impl Config {
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build from any key lookup; `from_env` passes the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let port = parse_or("PORT", get("PORT"), 5000u16)?;
    let bind = parse_or("SHERLOCK_BIND", get("SHERLOCK_BIND"), IpAddr::from([0, 0, 0, 0]))?;

    let username = credential(USERNAME_VAR, get(USERNAME_VAR), "username")?;
    let password = credential(PASSWORD_VAR, get(PASSWORD_VAR), "password")?;

    let tree_cap = parse_or("SHERLOCK_TREE_CAP", get("SHERLOCK_TREE_CAP"), DEFAULT_TREE_CAP)?;
    if tree_cap == 0 {
      return Err(ConfigError::invalid("SHERLOCK_TREE_CAP", "0", "must be at least 1"));
    }

    let max_commit_pages = match get("SHERLOCK_MAX_COMMIT_PAGES") {
      Some(v) => match parse_or::<usize>("SHERLOCK_MAX_COMMIT_PAGES", Some(v), 0)? {
        0 => {
          return Err(ConfigError::invalid(
            "SHERLOCK_MAX_COMMIT_PAGES",
            "0",
            "must be at least 1; unset it for no limit",
          ))
        }
        n => Some(n),
      },
      None => None,
    };
    let timeout_secs = parse_or(
      "SHERLOCK_REQUEST_TIMEOUT_SECS",
      get("SHERLOCK_REQUEST_TIMEOUT_SECS"),
      30u64,
    )?;

    Ok(Self {
      bind,
      port,
      github: GitHubConfig {
        api_url: get("SHERLOCK_GITHUB_API_URL")
          .unwrap_or_else(|| "https://api.github.com".to_string()),
        username,
        password,
        request_timeout: Duration::from_secs(timeout_secs),
        max_commit_pages,
      },
      tree_cap,
      tree_ref: get("SHERLOCK_TREE_REF").unwrap_or_else(|| DEFAULT_TREE_REF.to_string()),
      classifier_path: get("SHERLOCK_CLASSIFIER_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(commit_classifier::DEFAULT_ARTIFACT_PATH)),
      log_json: matches!(
        get("SHERLOCK_LOG_JSON").as_deref().map(str::trim),
        Some("1") | Some("true")
      ),
    })
  }
}

fn parse_or<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  match value {
    Some(v) => v
      .trim()
      .parse()
      .map_err(|e: T::Err| ConfigError::invalid(var, &v, e.to_string())),
    None => Ok(default),
  }
}

/// Credentials have no usable default; the old placeholder values are refused.
fn credential(
  var: &'static str,
  value: Option<String>,
  placeholder: &str,
) -> Result<String, ConfigError> {
  match value {
    None => Err(ConfigError::Missing { var }),
    Some(v) if v == placeholder => Err(ConfigError::Placeholder { var }),
    Some(v) => Ok(v),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let env: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    Config::from_lookup(|k| env.get(k).cloned())
  }

  const CREDS: [(&str, &str); 2] = [
    ("SHERLOCK_GITHUB_USERNAME", "octocat"),
    ("SHERLOCK_GITHUB_PASSWORD", "s3cret"),
  ];

  #[test]
  fn defaults() {
    let c = config(&CREDS).unwrap();
    assert_eq!(c.port, 5000);
    assert_eq!(c.bind.to_string(), "0.0.0.0");
    assert_eq!(c.tree_cap, 5);
    assert_eq!(c.tree_ref, "master");
    assert_eq!(c.github.api_url, "https://api.github.com");
    assert_eq!(c.github.max_commit_pages, None);
    assert_eq!(c.github.request_timeout, Duration::from_secs(30));
    assert_eq!(c.classifier_path, PathBuf::from("commit_msg_classifier.json"));
    assert!(!c.log_json);
  }

  #[test]
  fn overrides() {
    let mut pairs = CREDS.to_vec();
    pairs.extend([
      ("PORT", "8080"),
      ("SHERLOCK_BIND", "127.0.0.1"),
      ("SHERLOCK_TREE_CAP", "12"),
      ("SHERLOCK_TREE_REF", "main"),
      ("SHERLOCK_MAX_COMMIT_PAGES", "3"),
      ("SHERLOCK_LOG_JSON", "1"),
    ]);
    let c = config(&pairs).unwrap();
    assert_eq!(c.port, 8080);
    assert_eq!(c.bind.to_string(), "127.0.0.1");
    assert_eq!(c.tree_cap, 12);
    assert_eq!(c.tree_ref, "main");
    assert_eq!(c.github.max_commit_pages, Some(3));
    assert!(c.log_json);
  }

  #[test]
  fn missing_credentials_fail_loudly() {
    let err = config(&[("SHERLOCK_GITHUB_PASSWORD", "s3cret")]).unwrap_err();
    assert!(matches!(err, ConfigError::Missing { var: "SHERLOCK_GITHUB_USERNAME" }));

    let err = config(&[("SHERLOCK_GITHUB_USERNAME", "octocat")]).unwrap_err();
    assert!(matches!(err, ConfigError::Missing { var: "SHERLOCK_GITHUB_PASSWORD" }));
  }

  #[test]
  fn placeholder_credentials_are_refused() {
    let err = config(&[
      ("SHERLOCK_GITHUB_USERNAME", "username"),
      ("SHERLOCK_GITHUB_PASSWORD", "password"),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::Placeholder { .. }));
  }

  #[test]
  fn invalid_numbers_are_rejected() {
    let mut pairs = CREDS.to_vec();
    pairs.push(("PORT", "seventy"));
    assert!(config(&pairs).unwrap_err().to_string().contains("PORT"));

    let mut pairs = CREDS.to_vec();
    pairs.push(("SHERLOCK_TREE_CAP", "0"));
    assert!(config(&pairs).is_err());

    // A zero page limit would report every path as commit-free.
    let mut pairs = CREDS.to_vec();
    pairs.push(("SHERLOCK_MAX_COMMIT_PAGES", "0"));
    let err = config(&pairs).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "SHERLOCK_MAX_COMMIT_PAGES", .. }));
  }
}
