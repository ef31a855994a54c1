//! # Header Cache Module
//!
//! Memoizes built headers per comment prefix. Many files share a handful of
//! prefixes, so each distinct prefix is formatted once and shared afterwards.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::trace;

use crate::templates::HeaderFormatter;

/// Templates shorter than this are built for every known prefix up front.
///
/// Building a small header is cheap, and warming avoids taking the write
/// lock in the middle of a walk. Larger templates are built lazily, once per
/// prefix actually encountered.
pub const WARM_TEMPLATE_THRESHOLD: usize = 4 * 1024;

/// Built header lines, shared between callers.
pub type BuiltHeader = Arc<[String]>;

/// Thread-safe cache of built headers keyed by comment prefix.
///
/// Lookups take a shared read lock. A miss takes the write lock, checks
/// again, and only then runs the formatter, so concurrent misses for the same
/// prefix build it exactly once.
pub struct HeaderCache {
  formatter: Box<dyn HeaderFormatter>,
  headers: RwLock<HashMap<String, BuiltHeader>>,
}

impl std::fmt::Debug for HeaderCache {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HeaderCache")
      .field("formatter", &"<formatter>")
      .field("cached", &self.len())
      .finish()
  }
}

impl HeaderCache {
  /// Creates an empty cache around `formatter`.
  pub fn new(formatter: Box<dyn HeaderFormatter>) -> Self {
    Self {
      formatter,
      headers: RwLock::new(HashMap::new()),
    }
  }

  /// The raw template the formatter builds from.
  pub fn template(&self) -> &str {
    self.formatter.template()
  }

  /// Whether the template is small enough for [`warm`](Self::warm) to pay
  /// off.
  pub fn should_warm(&self) -> bool {
    self.template().len() < WARM_TEMPLATE_THRESHOLD
  }

  /// Returns the header for `prefix`, building and storing it on first use.
  pub fn get(&self, prefix: &str) -> BuiltHeader {
    {
      let headers = self.headers.read().unwrap_or_else(PoisonError::into_inner);
      if let Some(header) = headers.get(prefix) {
        return Arc::clone(header);
      }
    }

    let mut headers = self.headers.write().unwrap_or_else(PoisonError::into_inner);

    // Another thread may have built it while we waited for the write lock
    if let Some(header) = headers.get(prefix) {
      return Arc::clone(header);
    }

    trace!("Building header for prefix '{}'", prefix);
    let header: BuiltHeader = self.formatter.build(prefix).into();
    headers.insert(prefix.to_string(), Arc::clone(&header));
    header
  }

  /// Builds the header for every prefix in `prefixes` that is not cached
  /// yet, under a single write lock.
  pub fn warm<'a>(&self, prefixes: impl IntoIterator<Item = &'a str>) {
    let mut headers = self.headers.write().unwrap_or_else(PoisonError::into_inner);
    for prefix in prefixes {
      if !headers.contains_key(prefix) {
        trace!("Warming header for prefix '{}'", prefix);
        headers.insert(prefix.to_string(), self.formatter.build(prefix).into());
      }
    }
  }

  /// Number of prefixes with a cached header.
  pub fn len(&self) -> usize {
    self.headers.read().unwrap_or_else(PoisonError::into_inner).len()
  }

  /// Whether nothing has been cached yet.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
