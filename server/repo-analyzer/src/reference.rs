//! Repository reference parsing: raw URL or `owner/name` shorthand.

use serde::Serialize;
use std::fmt;

use crate::error::AnalyzeError;

const HOST_PREFIX: &str = "github.com/";

/// Normalized `owner/name` identifier of a remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryReference {
  owner: String,
  name: String,
}

impl RepositoryReference {
  /// Parse a repository URL or shorthand.
  ///
  /// Everything up to and including `github.com/` is stripped when present.
  /// Only the first two path segments are kept, a trailing `.git` is dropped.
  pub fn parse(input: &str) -> Result<Self, AnalyzeError> {
    let trimmed = input.trim();
    let rest = match trimmed.find(HOST_PREFIX) {
      Some(i) => &trimmed[i + HOST_PREFIX.len()..],
      None => trimmed,
    };

    let mut segments = rest.split('/');
    let owner = segments.next().unwrap_or_default();
    let name = segments.next().unwrap_or_default();
    let name = name.strip_suffix(".git").unwrap_or(name);

    if owner.is_empty() {
      return Err(AnalyzeError::invalid_reference(input, "missing owner"));
    }
    if name.is_empty() {
      return Err(AnalyzeError::invalid_reference(input, "missing repository name"));
    }
    if owner.contains(char::is_whitespace) || name.contains(char::is_whitespace) {
      return Err(AnalyzeError::invalid_reference(input, "contains whitespace"));
    }

    Ok(Self {
      owner: owner.to_string(),
      name: name.to_string(),
    })
  }

  pub fn owner(&self) -> &str {
    &self.owner
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

impl fmt::Display for RepositoryReference {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.name)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parsed(input: &str) -> String {
    RepositoryReference::parse(input).unwrap().to_string()
  }

  #[test]
  fn url_and_shorthand_agree() {
    assert_eq!(parsed("https://github.com/owner/repo"), "owner/repo");
    assert_eq!(parsed("owner/repo"), "owner/repo");
    assert_eq!(
      RepositoryReference::parse("https://github.com/owner/repo").unwrap(),
      RepositoryReference::parse("owner/repo").unwrap()
    );
  }

  #[test]
  fn parse_is_idempotent() {
    let once = parsed("http://www.github.com/go-pg/pg");
    assert_eq!(once, "go-pg/pg");
    assert_eq!(parsed(&once), once);
  }

  #[test]
  fn tolerates_common_url_shapes() {
    assert_eq!(parsed("github.com/owner/repo"), "owner/repo");
    assert_eq!(parsed("  https://github.com/owner/repo/  "), "owner/repo");
    assert_eq!(parsed("https://github.com/owner/repo.git"), "owner/repo");
    assert_eq!(parsed("https://github.com/owner/repo/tree/main/src"), "owner/repo");
  }

  #[test]
  fn rejects_incomplete_references() {
    for input in ["", "   ", "owner", "owner/", "https://github.com/", "https://github.com/owner", "/repo"] {
      let err = RepositoryReference::parse(input).unwrap_err();
      assert_eq!(err.kind(), "invalid_reference", "input {:?}", input);
    }
  }
}
