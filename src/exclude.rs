//! # Exclude Module
//!
//! Decides which paths are left alone during a run, based on the `Exclude`
//! list from the configuration.
//!
//! Each entry is matched two ways:
//! - as a glob against the whole path (`*` and `?` stay within one path
//!   component, a `**` component spans directories)
//! - as a directory prefix, when the entry contains `**` or ends in `/`
//!
//! Entries that are not valid globs never match through the glob rule; they
//! are not an error.

use std::borrow::Cow;
use std::path::Path;

use glob::{MatchOptions, Pattern};
use tracing::debug;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
struct ExcludePattern {
  raw: String,
  glob: Option<Pattern>,
  /// Directory form (always ending in `/`) for `**` and trailing-slash
  /// entries.
  directory: Option<String>,
}

impl ExcludePattern {
  fn new(raw: &str) -> Self {
    let normalized = raw.replace('\\', "/");

    let glob = match Pattern::new(&normalized) {
      Ok(pattern) => Some(pattern),
      Err(e) => {
        debug!("Ignoring invalid exclude pattern '{}': {}", raw, e);
        None
      }
    };

    let directory = if normalized.contains("**") || normalized.ends_with('/') {
      directory_form(&normalized)
    } else {
      None
    };

    Self {
      raw: raw.to_string(),
      glob,
      directory,
    }
  }

  fn matches(&self, normalized_path: &str, path_as_dir: &str) -> bool {
    if self
      .glob
      .as_ref()
      .is_some_and(|glob| glob.matches_with(normalized_path, MATCH_OPTIONS))
    {
      return true;
    }

    self
      .directory
      .as_deref()
      .is_some_and(|directory| path_as_dir.starts_with(directory))
  }
}

/// Strips trailing `**` and `/` components, e.g. `vendor/**` -> `vendor/`.
fn directory_form(pattern: &str) -> Option<String> {
  let mut directory = pattern;
  loop {
    let trimmed = directory.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix("**").unwrap_or(trimmed);
    if trimmed.len() == directory.len() {
      break;
    }
    directory = trimmed;
  }

  if directory.is_empty() {
    None
  } else {
    Some(format!("{directory}/"))
  }
}

/// Normalizes a path to forward slashes without a leading `./`.
fn normalize_path(path: &Path) -> Cow<'_, str> {
  let lossy = path.to_string_lossy();
  let needs_rewrite = lossy.contains('\\') || lossy.starts_with("./");
  if !needs_rewrite {
    return lossy;
  }

  let mut normalized = lossy.replace('\\', "/");
  while let Some(rest) = normalized.strip_prefix("./") {
    normalized = rest.to_string();
  }
  Cow::Owned(normalized)
}

/// Matcher for the configured exclusion list.
///
/// The list is compiled once and never changes afterwards, so a shared
/// reference can be used from any number of threads.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
///
/// use copygen::exclude::ExcludeMatcher;
///
/// let matcher = ExcludeMatcher::new(&["vendor/**".to_string(), "*_test.go".to_string()]);
///
/// assert!(matcher.is_excluded(Path::new("vendor/lib/file.go")));
/// assert!(matcher.is_excluded(Path::new("main_test.go")));
/// assert!(!matcher.is_excluded(Path::new("src/vendor_utils.go")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExcludeMatcher {
  patterns: Vec<ExcludePattern>,
}

impl ExcludeMatcher {
  /// Compiles the exclusion list, preserving its order.
  pub fn new(patterns: &[String]) -> Self {
    Self {
      patterns: patterns.iter().map(|pattern| ExcludePattern::new(pattern)).collect(),
    }
  }

  /// Checks whether `path` matches any exclusion entry.
  ///
  /// Stops at the first entry that matches.
  pub fn is_excluded(&self, path: &Path) -> bool {
    if self.patterns.is_empty() {
      return false;
    }

    let normalized = normalize_path(path);
    let as_dir = format!("{normalized}/");

    match self
      .patterns
      .iter()
      .find(|pattern| pattern.matches(&normalized, &as_dir))
    {
      Some(pattern) => {
        debug!("{} excluded by '{}'", normalized, pattern.raw);
        true
      }
      None => false,
    }
  }

  /// Number of configured entries, valid or not.
  pub fn len(&self) -> usize {
    self.patterns.len()
  }

  /// Whether the exclusion list is empty.
  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }
}
