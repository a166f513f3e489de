//! Glob expansion over a known set of names.
//!
//! A pattern is a comma-separated list of globs. The word `all` selects every
//! name. The result is always a subset of the universe it was expanded
//! against.
//!
//! # Example
//!
//! ```
//! use depmap_lib::pattern::expand;
//!
//! let hosts = ["debian-10", "debian-sid", "fedora-35"];
//! let selected = expand("debian-*,fedora-35", hosts).unwrap();
//! assert_eq!(selected.len(), 3);
//! ```

use std::collections::BTreeSet;

use glob::Pattern;
use thiserror::Error;

/// Keyword selecting the whole universe.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
  #[error("invalid pattern '{pattern}': {message}")]
  InvalidGlob { pattern: String, message: String },

  #[error("pattern '{0}' does not match anything")]
  NoMatch(String),
}

/// Expand `pattern` against `universe`.
///
/// # Errors
///
/// Returns [`PatternError::InvalidGlob`] for a malformed glob and
/// [`PatternError::NoMatch`] when the pattern selects nothing.
pub fn expand<'a>(
  pattern: &str,
  universe: impl IntoIterator<Item = &'a str>,
) -> Result<BTreeSet<String>, PatternError> {
  let globs = compile(pattern)?;
  let selected: BTreeSet<String> = universe
    .into_iter()
    .filter(|name| globs.iter().any(|glob| glob.matches(name)))
    .map(str::to_string)
    .collect();

  if selected.is_empty() {
    return Err(PatternError::NoMatch(pattern.to_string()));
  }
  Ok(selected)
}

fn compile(pattern: &str) -> Result<Vec<Pattern>, PatternError> {
  pattern
    .split(',')
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .map(|part| {
      let glob = if part == ALL { "*" } else { part };
      Pattern::new(glob).map_err(|e| PatternError::InvalidGlob {
        pattern: part.to_string(),
        message: e.to_string(),
      })
    })
    .collect()
}
