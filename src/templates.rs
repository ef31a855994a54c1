//! # Templates Module
//!
//! This module turns the raw header template from the configuration into the
//! commented lines that are expected at the top of each source file.
//!
//! The module includes:
//! - [`CommentPrefixes`] for mapping file extensions to line-comment tokens
//! - [`HeaderFormatter`], the seam used by the header cache to build headers
//! - [`HeaderBuilder`], the default formatter backed by a template string
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use copygen::templates::{CommentPrefixes, HeaderBuilder, HeaderFormatter};
//!
//! let prefixes = CommentPrefixes::builtin();
//! let prefix = prefixes.prefix_for_path(Path::new("main.go")).expect("go is builtin");
//!
//! let builder = HeaderBuilder::new("Copyright (c) Copygen\n\nLicensed under Apache-2.0\n");
//! assert_eq!(
//!   builder.build(prefix),
//!   vec!["// Copyright (c) Copygen", "//", "// Licensed under Apache-2.0"]
//! );
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Mapping from file extension to the line-comment token used for headers.
///
/// Keys are stored lowercase and without the leading dot. The table is
/// built once at startup and never changes during a run; the processor
/// receives it by value so tests can run against arbitrary file-type sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPrefixes {
  prefixes: HashMap<String, String>,
}

impl CommentPrefixes {
  /// Creates an empty table. Every file is skipped until prefixes are
  /// registered with [`insert`](Self::insert).
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates the builtin table of line-comment languages.
  ///
  /// Only languages with a single-line comment token are listed; block-only
  /// languages (HTML, XML, CSS) are not supported. Languages whose files
  /// commonly need a specific first line (a `#!` interpreter line, `<?php`,
  /// an Emacs `-*-` cookie) are left out as well, since the header always
  /// becomes the first line. Shell, Python, Ruby, Perl, PHP and Lua can be
  /// enabled through [`with_overrides`](Self::with_overrides).
  pub fn builtin() -> Self {
    const BUILTIN: &[(&str, &[&str])] = &[
      (
        "//",
        &[
          "c", "cc", "cpp", "cs", "go", "h", "hcl", "hh", "hpp", "java", "jsx", "kt", "m", "mm", "proto", "rs",
          "scala", "sv", "ts", "tsx", "v",
        ],
      ),
      ("#", &["bzl", "tf", "toml", "yaml", "yml"]),
      ("--", &["sdl", "sql"]),
      ("%", &["erl"]),
    ];

    let mut table = Self::new();
    for (prefix, extensions) in BUILTIN {
      for extension in *extensions {
        table.insert(extension, prefix);
      }
    }
    table
  }

  /// Registers (or replaces) the prefix for an extension.
  ///
  /// A leading dot on `extension` is accepted and dropped.
  pub fn insert(&mut self, extension: &str, prefix: &str) {
    let extension = extension.strip_prefix('.').unwrap_or(extension).to_lowercase();
    self.prefixes.insert(extension, prefix.to_string());
  }

  /// Returns a copy of this table with `overrides` applied on top.
  pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
    for (extension, prefix) in overrides {
      self.insert(extension, prefix);
    }
    self
  }

  /// Looks up the prefix for an extension (with or without the leading dot).
  pub fn prefix_for_extension(&self, extension: &str) -> Option<&str> {
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    self.prefixes.get(&extension.to_lowercase()).map(String::as_str)
  }

  /// Looks up the prefix for a path based on its extension.
  ///
  /// Files without an extension never have a prefix.
  pub fn prefix_for_path(&self, path: &Path) -> Option<&str> {
    let extension = path.extension()?.to_str()?;
    self.prefix_for_extension(extension)
  }

  /// Every distinct prefix in the table, sorted.
  ///
  /// Several extensions usually share one prefix, so this is much shorter
  /// than the table itself.
  pub fn distinct_prefixes(&self) -> Vec<&str> {
    self
      .prefixes
      .values()
      .map(String::as_str)
      .collect::<BTreeSet<_>>()
      .into_iter()
      .collect()
  }

  /// Number of registered extensions.
  pub fn len(&self) -> usize {
    self.prefixes.len()
  }

  /// Whether no extension is registered.
  pub fn is_empty(&self) -> bool {
    self.prefixes.is_empty()
  }
}

/// Trait for building the expected header lines for a comment prefix.
///
/// The header cache only talks to this trait, which keeps the cache
/// independent of where the template comes from.
pub trait HeaderFormatter: Send + Sync {
  /// The raw template the header lines are built from.
  fn template(&self) -> &str;

  /// Builds the commented header lines for `prefix`.
  ///
  /// Must be deterministic: the same prefix always yields the same lines.
  fn build(&self, prefix: &str) -> Vec<String>;
}

/// Default [`HeaderFormatter`] backed by the configured template text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBuilder {
  template: String,
}

impl HeaderBuilder {
  /// Creates a builder for the given raw template (no comment markers).
  pub fn new(template: impl Into<String>) -> Self {
    Self {
      template: template.into(),
    }
  }
}

impl HeaderFormatter for HeaderBuilder {
  fn template(&self) -> &str {
    &self.template
  }

  fn build(&self, prefix: &str) -> Vec<String> {
    let mut header: Vec<String> = self
      .template
      .split('\n')
      .map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
          prefix.to_string()
        } else {
          format!("{prefix} {line}")
        }
      })
      .collect();

    // Blank template lines at the end would leave dangling comment markers
    while header.last().is_some_and(|line| line == prefix) {
      header.pop();
    }

    header
  }
}
