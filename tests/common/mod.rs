#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use copygen::processor::{Processor, ProcessorConfig};
use copygen::report::Reporter;

/// Header template used by most tests.
pub const HEADER: &str = "Copyright (c) Copygen. Licensed under the Apache License, Version 2.0.\nSee LICENSE for details.";

/// The header as it appears at the top of a Go file, separator included.
pub const GO_HEADER: &str =
  "// Copyright (c) Copygen. Licensed under the Apache License, Version 2.0.\n// See LICENSE for details.\n\n";

/// Reporter that records every message for later inspection.
#[derive(Clone, Default)]
pub struct RecordingReporter {
  messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingReporter {
  pub fn messages(&self) -> Vec<String> {
    self.messages.lock().expect("reporter lock").clone()
  }
}

impl Reporter for RecordingReporter {
  fn report(&self, message: &str) -> io::Result<()> {
    self.messages.lock().expect("reporter lock").push(message.to_string());
    Ok(())
  }
}

/// Reporter whose writes always fail.
pub struct FailingReporter;

impl Reporter for FailingReporter {
  fn report(&self, _message: &str) -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::BrokenPipe, "reporter closed"))
  }
}

/// Creates a processor for `root` that records its reports.
pub fn create_processor(root: &Path, header: &str, exclude: &[&str], dry_run: bool) -> (Processor, RecordingReporter) {
  let reporter = RecordingReporter::default();
  let processor = Processor::new(ProcessorConfig {
    exclude: exclude.iter().map(|p| p.to_string()).collect(),
    dry_run,
    reporter: Some(Box::new(reporter.clone())),
    ..ProcessorConfig::new(header, root)
  });
  (processor, reporter)
}

/// Exclusion pattern for `pattern` below `root`.
///
/// Exclusions match walked paths, which start with the root, so tests that
/// walk a temporary directory anchor their patterns there.
pub fn pattern_under(root: &Path, pattern: &str) -> String {
  let root = glob::Pattern::escape(&root.to_string_lossy().replace('\\', "/"));
  format!("{root}/{pattern}")
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
  Ok(path)
}

/// Reads every regular file under `root` as (relative path, bytes), sorted.
pub fn snapshot(root: &Path) -> Result<Vec<(String, Vec<u8>)>> {
  let mut files = Vec::new();
  for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
    let entry = entry?;
    if entry.file_type().is_file() {
      let relative = entry.path().strip_prefix(root)?.to_string_lossy().replace('\\', "/");
      files.push((relative, fs::read(entry.path())?));
    }
  }
  Ok(files)
}
