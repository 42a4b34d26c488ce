//! Category types plus the JSON contract of the offline classification CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Commit category. The discriminant is the index into a [`CategoryCount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Unknown = 0,
  NewFeature = 1,
  Refactor = 2,
  Fix = 3,
}

impl Category {
  pub const ALL: [Category; 4] = [
    Category::Unknown,
    Category::NewFeature,
    Category::Refactor,
    Category::Fix,
  ];

  /// Map a raw classifier label. Only the four artifact labels are accepted.
  pub fn from_label(label: &str) -> Option<Self> {
    match label {
      "Unknown" => Some(Self::Unknown),
      "New Feature" => Some(Self::NewFeature),
      "Refactor" => Some(Self::Refactor),
      "Fix" => Some(Self::Fix),
      _ => None,
    }
  }

  /// The label this category carries inside a classifier artifact.
  pub fn label(self) -> &'static str {
    match self {
      Self::Unknown => "Unknown",
      Self::NewFeature => "New Feature",
      Self::Refactor => "Refactor",
      Self::Fix => "Fix",
    }
  }

  pub fn index(self) -> usize {
    self as usize
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

// ---------------------------------------------------------------------------
// CategoryCount
// ---------------------------------------------------------------------------

/// Per-file commit counts: `[unknown, new_feature, refactor, fix]`.
///
/// Serialized as a plain 4-element JSON array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryCount([u32; 4]);

impl CategoryCount {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record(&mut self, category: Category) {
    self.0[category.index()] += 1;
  }

  pub fn get(&self, category: Category) -> u32 {
    self.0[category.index()]
  }

  /// Number of classified commits.
  pub fn total(&self) -> u32 {
    self.0.iter().sum()
  }

  pub fn as_array(&self) -> [u32; 4] {
    self.0
  }
}

impl From<[u32; 4]> for CategoryCount {
  fn from(counts: [u32; 4]) -> Self {
    Self(counts)
  }
}

// ---------------------------------------------------------------------------
// CLI stream contract
// ---------------------------------------------------------------------------

/// One inbound line for the CLI. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Input {
  pub message: String,
}

/// One classified line written to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct Output {
  pub category: Category,
  pub index: usize,
  pub tokens: Vec<String>,
}

/// Structured error output for lines that could not be classified.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub kind: String,
  pub message: String,
}

impl ErrorOutput {
  pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
    Self {
      error: true,
      kind: kind.into(),
      message: message.into(),
    }
  }
}
