//! # Header Detection
//!
//! Checks whether a file already starts with the expected header, reading no
//! further than the first mismatching line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use super::header_cache::HeaderCache;

/// Compares the leading lines of files with the built header.
#[derive(Debug, Clone)]
pub struct HeaderDetector {
  cache: Arc<HeaderCache>,
}

impl HeaderDetector {
  pub const fn new(cache: Arc<HeaderCache>) -> Self {
    Self { cache }
  }

  /// Returns `Ok(true)` when the first lines of `path` equal the header built
  /// for `prefix`, line for line.
  ///
  /// An empty template (or one that builds to no lines) counts as present
  /// for every file. A file that ends before the last header line, or whose
  /// lines differ, does not have the header. Lines are compared as bytes with
  /// the line terminator (`\n` or `\r\n`) removed.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be opened or read.
  pub fn has_header(&self, path: &Path, prefix: &str) -> io::Result<bool> {
    if self.cache.template().is_empty() {
      return Ok(true);
    }

    let expected = self.cache.get(prefix);
    if expected.is_empty() {
      return Ok(true);
    }

    starts_with_header(&mut BufReader::new(File::open(path)?), &expected)
  }
}

/// Compares the leading lines of `reader` with `expected`.
///
/// Each read is capped at the header line plus a `\r\n` terminator, so a
/// long first line (minified sources, binaries) is never buffered whole.
fn starts_with_header<R: BufRead>(reader: &mut R, expected: &[String]) -> io::Result<bool> {
  let mut line = Vec::new();

  for header_line in expected {
    line.clear();
    let limit = header_line.len() as u64 + 2;
    if reader.by_ref().take(limit).read_until(b'\n', &mut line)? == 0 {
      return Ok(false);
    }
    if trim_line_ending(&line) != header_line.as_bytes() {
      return Ok(false);
    }
  }

  Ok(true)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
  let line = line.strip_suffix(b"\n").unwrap_or(line);
  line.strip_suffix(b"\r").unwrap_or(line)
}
