//! Commit message normalization into classifier tokens.

/// Substring rewrites, applied in order. Order matters where patterns overlap.
const REWRITES: [(&str, &str); 6] = [
  ("\n", ""),
  (",", " "),
  ("- ", ""),
  ("the ", " "),
  (" and", " "),
  (" from", " "),
];

/// Normalize a raw commit message into a token sequence.
///
/// Stopword removal is substring-based and case-sensitive, so `"the "` is also
/// removed from the tail of words such as `"bathe "`. Empty tokens left behind
/// by consecutive spaces are dropped.
pub fn normalize(message: &str) -> Vec<String> {
  let mut s = message.to_string();
  for (pattern, replacement) in REWRITES {
    s = s.replace(pattern, replacement);
  }
  s.split(' ')
    .filter(|t| !t.is_empty())
    .map(str::to_string)
    .collect()
}
