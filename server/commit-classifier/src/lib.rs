//! Sherlock Commit Classifier: commit message normalization, Naive Bayes
//! classification, and per-file category aggregation.
//! Used by the repo analyzer as a library and by the binary for stdin/stdout.

pub mod aggregate;
pub mod classifier;
pub mod error;
pub mod fakes;
pub mod normalize;
pub mod types;

pub use aggregate::{categorize, count_categories};
pub use classifier::{Classifier, NaiveBayesModel};
pub use error::{ArtifactError, ClassifyError};
pub use normalize::normalize;
pub use types::{Category, CategoryCount, ErrorOutput, Input, Output};

/// Default artifact location, relative to the working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "commit_msg_classifier.json";

/// Classify one CLI input line (no I/O).
pub fn run(classifier: &dyn Classifier, input: &Input) -> Result<Output, ClassifyError> {
  let category = categorize(classifier, &input.message)?;
  Ok(Output {
    category,
    index: category.index(),
    tokens: normalize(&input.message),
  })
}
