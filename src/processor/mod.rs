//! # Processor Module
//!
//! This module contains the header-processing engine: it walks a directory
//! tree, decides per file whether the configured header is already present,
//! and inserts it where it is missing.
//!
//! The module is organized into several submodules:
//! - [`header_cache`] - Memoized header lines per comment prefix
//! - [`detector`] - Comparison of a file's leading lines with the header
//! - [`file_io`] - Atomic header insertion
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules together with the [`ExcludeMatcher`] and the [`Reporter`].

mod detector;
mod file_io;
mod header_cache;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use detector::HeaderDetector;
pub use file_io::{FileMutator, HeaderWriter, render_header};
pub use header_cache::{BuiltHeader, HeaderCache, WARM_TEMPLATE_THRESHOLD};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::exclude::ExcludeMatcher;
use crate::report::{Reporter, ViewType, stdout_reporter};
use crate::templates::{CommentPrefixes, HeaderBuilder, HeaderFormatter};

/// Error type for a processing run.
///
/// Every variant aborts the run; the first failure is the one returned.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
  /// An entry under the root could not be read.
  #[error("walk {}: {source}", root.display())]
  Walk { root: PathBuf, source: walkdir::Error },

  /// A candidate file could not be opened or read.
  #[error("check header: {}: {source}", path.display())]
  CheckHeader { path: PathBuf, source: io::Error },

  /// Inserting the header failed. The file itself is unchanged.
  #[error("add header: {}: {source}", path.display())]
  AddHeader { path: PathBuf, source: io::Error },

  /// A notification could not be written and strict reporting is enabled.
  #[error("report {}: {source}", path.display())]
  Report { path: PathBuf, source: io::Error },
}

/// Counts of what happened during a run.
///
/// Files with no comment prefix or matching an exclusion are not counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
  /// Files with a known comment prefix that were not excluded.
  pub checked: usize,
  /// Checked files that already carried the header.
  pub already_present: usize,
  /// Files that received a header (or would have, in dry-run mode).
  pub changed: usize,
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  /// Raw header template, without comment markers.
  pub header: String,
  /// Directory (or single file) to process.
  pub root: PathBuf,
  /// Exclusion patterns, matched against each walked path (`root` joined
  /// with the path below it).
  pub exclude: Vec<String>,
  /// Extension to comment-prefix table.
  pub comment_prefixes: CommentPrefixes,

  // Behavior flags
  pub dry_run: bool,
  pub strict_reporting: bool,

  // Optional components
  pub reporter: Option<Box<dyn Reporter>>,
  pub formatter: Option<Box<dyn HeaderFormatter>>,
  pub writer: Option<Box<dyn HeaderWriter>>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(header, root)
  /// }
  /// ```
  pub fn new(header: impl Into<String>, root: impl Into<PathBuf>) -> Self {
    Self {
      header: header.into(),
      root: root.into(),
      exclude: vec![],
      comment_prefixes: CommentPrefixes::builtin(),
      dry_run: false,
      strict_reporting: false,
      reporter: None,
      formatter: None,
      writer: None,
    }
  }
}

/// Processor for adding headers to the files of a directory tree.
///
/// The `Processor` is responsible for:
/// - Walking the tree under the root, one file at a time
/// - Skipping files with no comment prefix or matching an exclusion
/// - Checking each remaining file for the header
/// - Inserting missing headers, or reporting them in dry-run mode
pub struct Processor {
  /// Directory (or file) the run starts from
  root: PathBuf,

  /// Whether to only report missing headers without modifying files
  dry_run: bool,

  /// Whether a failed notification aborts the run
  strict_reporting: bool,

  /// Extension to comment-prefix table
  comment_prefixes: CommentPrefixes,

  /// Compiled exclusion patterns
  exclude: ExcludeMatcher,

  /// Built headers per comment prefix, shared with the detector
  cache: Arc<HeaderCache>,

  /// Header presence check
  detector: HeaderDetector,

  /// Sink for "added" / "would add" notifications
  reporter: Box<dyn Reporter>,

  /// Header insertion, atomic replacement unless overridden
  writer: Box<dyn HeaderWriter>,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// Without an explicit reporter, notifications are written to stdout by a
  /// [`HumanReporter`](crate::report::HumanReporter). Without an explicit
  /// formatter, headers are built from `config.header`. Without an explicit
  /// writer, files are replaced atomically by [`FileMutator`].
  pub fn new(config: ProcessorConfig) -> Self {
    let formatter = config
      .formatter
      .unwrap_or_else(|| Box::new(HeaderBuilder::new(config.header)));
    let cache = Arc::new(HeaderCache::new(formatter));

    let reporter = config
      .reporter
      .unwrap_or_else(|| stdout_reporter(ViewType::Human));
    let writer = config.writer.unwrap_or_else(|| Box::new(FileMutator));

    Self {
      root: config.root,
      dry_run: config.dry_run,
      strict_reporting: config.strict_reporting,
      comment_prefixes: config.comment_prefixes,
      exclude: ExcludeMatcher::new(&config.exclude),
      detector: HeaderDetector::new(Arc::clone(&cache)),
      cache,
      reporter,
      writer,
    }
  }

  /// The directory (or file) this processor walks.
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// The header cache used by this processor.
  pub fn cache(&self) -> &HeaderCache {
    &self.cache
  }

  /// Walks the tree under the root and adds missing headers.
  ///
  /// Files are visited one at a time in file-name order. Directories and
  /// symlinks are never candidates.
  ///
  /// # Returns
  ///
  /// A [`ProcessSummary`] describing what was checked and changed.
  ///
  /// # Errors
  ///
  /// Returns the first error encountered; the walk stops there. Files
  /// handled before the failure keep their new headers.
  pub fn process(&self) -> Result<ProcessSummary, ProcessError> {
    if self.cache.should_warm() {
      let prefixes = self.comment_prefixes.distinct_prefixes();
      debug!("Warming header cache for {} comment prefixes", prefixes.len());
      self.cache.warm(prefixes);
    }

    let mut summary = ProcessSummary::default();
    let start = std::time::Instant::now();

    for entry in WalkDir::new(&self.root).sort_by_file_name() {
      let entry = entry.map_err(|source| ProcessError::Walk {
        root: self.root.clone(),
        source,
      })?;

      if !entry.file_type().is_file() {
        if entry.file_type().is_symlink() {
          trace!("Skipping: {} (symlink)", entry.path().display());
        }
        continue;
      }

      self.process_file(entry.path(), &mut summary)?;
    }

    debug!(
      "Checked {} files ({} changed) in {}ms",
      summary.checked,
      summary.changed,
      start.elapsed().as_millis()
    );

    Ok(summary)
  }

  fn process_file(&self, path: &Path, summary: &mut ProcessSummary) -> Result<(), ProcessError> {
    let Some(prefix) = self.comment_prefixes.prefix_for_path(path) else {
      trace!("Skipping: {} (no comment prefix for extension)", path.display());
      return Ok(());
    };

    if self.is_excluded(path) {
      trace!("Skipping: {} (excluded)", path.display());
      return Ok(());
    }

    summary.checked += 1;

    let has_header = self.has_header(path, prefix).map_err(|source| ProcessError::CheckHeader {
      path: path.to_path_buf(),
      source,
    })?;

    if has_header {
      trace!("Header present: {}", path.display());
      summary.already_present += 1;
      return Ok(());
    }

    if self.dry_run {
      self.notify(path, &format!("would add header to {}", path.display()))?;
    } else {
      self.add_header(path, prefix)?;
    }

    summary.changed += 1;
    Ok(())
  }

  /// Checks whether `path` matches an exclusion pattern.
  ///
  /// `path` is matched as walked, so a relative root yields relative paths
  /// (`copygen src` matches `src/vendor/**`, `copygen .` matches
  /// `./src/vendor/**` with the leading `./` dropped).
  pub fn is_excluded(&self, path: &Path) -> bool {
    self.exclude.is_excluded(path)
  }

  /// Checks whether `path` already starts with the header for `prefix`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be opened or read.
  pub fn has_header(&self, path: &Path, prefix: &str) -> io::Result<bool> {
    self.detector.has_header(path, prefix)
  }

  /// Inserts the header for `prefix` at the top of `path` and reports it.
  ///
  /// # Errors
  ///
  /// Returns [`ProcessError::AddHeader`] if the file could not be replaced,
  /// in which case it is unchanged. With strict reporting, a failed
  /// notification is returned as [`ProcessError::Report`].
  pub fn add_header(&self, path: &Path, prefix: &str) -> Result<(), ProcessError> {
    let header = render_header(&self.cache.get(prefix));

    self.writer.write_header(path, header.as_bytes()).map_err(|source| ProcessError::AddHeader {
      path: path.to_path_buf(),
      source,
    })?;

    self.notify(path, &format!("added header to {}", path.display()))
  }

  fn notify(&self, path: &Path, message: &str) -> Result<(), ProcessError> {
    match self.reporter.report(message) {
      Ok(()) => Ok(()),
      Err(source) if self.strict_reporting => Err(ProcessError::Report {
        path: path.to_path_buf(),
        source,
      }),
      Err(e) => {
        warn!("Failed to report {}: {}", path.display(), e);
        Ok(())
      }
    }
  }
}
