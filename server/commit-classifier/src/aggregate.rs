//! Per-message categorization and per-file aggregation.

use crate::classifier::Classifier;
use crate::error::ClassifyError;
use crate::normalize::normalize;
use crate::types::{Category, CategoryCount};

/// Normalize, classify and map one commit message to its category.
///
/// A message with nothing left after normalization counts as `Unknown`.
/// A label outside the four categories is an error.
pub fn categorize(classifier: &dyn Classifier, message: &str) -> Result<Category, ClassifyError> {
  let tokens = normalize(message);
  if tokens.is_empty() {
    tracing::debug!("empty commit message after normalization; counting as unknown");
    return Ok(Category::Unknown);
  }

  let label = match classifier.classify(&tokens) {
    Ok(label) => label,
    Err(ClassifyError::EmptyInput) => {
      tracing::debug!(?tokens, "classifier rejected tokens as empty; counting as unknown");
      return Ok(Category::Unknown);
    }
    Err(e) => return Err(e),
  };

  Category::from_label(label).ok_or_else(|| ClassifyError::unknown_label(label))
}

/// Count categories over a file's commit messages, in input order.
pub fn count_categories<I, S>(
  classifier: &dyn Classifier,
  messages: I,
) -> Result<CategoryCount, ClassifyError>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut count = CategoryCount::new();
  for message in messages {
    count.record(categorize(classifier, message.as_ref())?);
  }
  Ok(count)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fakes::{ConstantClassifier, KeywordClassifier};

  #[test]
  fn constant_fix_counts_every_commit_as_fix() {
    let classifier = ConstantClassifier::new("Fix");
    let count = count_categories(&classifier, ["a", "b", "c"]).unwrap();
    assert_eq!(count.as_array(), [0, 0, 0, 3]);
  }

  #[test]
  fn sum_equals_number_of_messages() {
    let classifier = KeywordClassifier;
    let messages = [
      "Fix crash on startup",
      "Add dark mode",
      "refactor the loader",
      "bump version",
      "",
      "  ",
      "Fix, the bug from yesterday",
    ];
    let count = count_categories(&classifier, messages).unwrap();
    assert_eq!(count.total() as usize, messages.len());
    assert_eq!(count.as_array(), [3, 1, 1, 2]);
  }

  #[test]
  fn no_messages_is_all_zero() {
    let classifier = ConstantClassifier::new("Fix");
    let count = count_categories(&classifier, Vec::<String>::new()).unwrap();
    assert_eq!(count.as_array(), [0, 0, 0, 0]);
  }

  #[test]
  fn empty_message_defaults_to_unknown() {
    let classifier = ConstantClassifier::new("Fix");
    assert_eq!(categorize(&classifier, "\n").unwrap(), Category::Unknown);
  }

  #[test]
  fn unknown_label_is_a_distinct_error() {
    let classifier = ConstantClassifier::new("Chore");
    let err = categorize(&classifier, "chore: bump deps").unwrap_err();
    assert!(matches!(err, ClassifyError::UnknownLabel { ref label } if label == "Chore"));

    let err = count_categories(&classifier, ["x"]).unwrap_err();
    assert_eq!(err.kind(), "unknown_label");
  }
}
