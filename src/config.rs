//! # Configuration Module
//!
//! This module provides configuration support for copygen: the header
//! template, the exclusion list, and optional comment-prefix overrides.
//!
//! Configuration is read from `.copygen.yaml` (or `.copygen.yml` /
//! `.copygen.toml`) in the current directory, from the file named by the
//! `COPYGEN_CONFIG` environment variable, or from an explicit `--config`
//! path. YAML and TOML are told apart by file extension.
//!
//! ```yaml
//! Header: |
//!   Copyright (c) Copygen. Licensed under the Apache License, Version 2.0.
//!   See LICENSE for details.
//! Exclude:
//!   - "vendor/**"
//!   - "*_generated.go"
//! comment-prefixes:
//!   zig: "//"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::verbose_log;

/// Config file names looked up in the working directory, in order.
pub const DEFAULT_CONFIG_FILENAMES: &[&str] = &[".copygen.yaml", ".copygen.yml", ".copygen.toml"];

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "COPYGEN_CONFIG";

/// Main configuration struct for copygen.
///
/// Keys use the capitalized spelling (`Header`, `Exclude`); lowercase
/// spellings are accepted as well.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
  /// Raw header text, one template line per line, without comment markers.
  #[serde(default, rename = "Header", alias = "header")]
  pub header: String,

  /// Glob and directory patterns for paths that are never touched.
  #[serde(default, rename = "Exclude", alias = "exclude")]
  pub exclude: Vec<String>,

  /// Extra or replacement comment prefixes.
  /// Keys are file extensions without the leading dot (e.g., "zig").
  #[serde(default, rename = "comment-prefixes", alias = "CommentPrefixes")]
  pub comment_prefixes: HashMap<String, String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// No config file was given and none was found.
  #[error("No config file found at '{}'", path.display())]
  NotFound { path: PathBuf },

  /// The config file could not be read.
  #[error("Failed to read config file '{}': {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid YAML.
  #[error("Failed to parse config file '{}': {source}", path.display())]
  ParseYaml { path: PathBuf, source: serde_yaml::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{}': {source}", path.display())]
  ParseToml { path: PathBuf, source: toml::de::Error },

  /// The config file extension is neither YAML nor TOML.
  #[error("Unsupported config format '{}' (expected .yaml, .yml or .toml)", path.display())]
  UnsupportedFormat { path: PathBuf },

  /// A comment-prefix override is invalid.
  #[error("Invalid comment prefix for '{extension}': {message}")]
  InvalidCommentPrefix { extension: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
  Yaml,
  Toml,
}

impl ConfigFormat {
  fn from_path(path: &Path) -> Option<Self> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    match extension.as_str() {
      "yaml" | "yml" => Some(Self::Yaml),
      "toml" => Some(Self::Toml),
      _ => None,
    }
  }
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read or
  /// parsed.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
      path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config = Self::parse(&content, format, path)?;
    config.validate()?;

    verbose_log!(
      "Loaded {} header lines and {} exclude patterns",
      config.header.lines().count(),
      config.exclude.len()
    );

    Ok(config)
  }

  fn parse(content: &str, format: ConfigFormat, path: &Path) -> Result<Self, ConfigError> {
    match format {
      // An empty YAML document is null rather than an empty mapping
      ConfigFormat::Yaml if content.trim().is_empty() => Ok(Self::default()),
      ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
        path: path.to_path_buf(),
        source: e,
      }),
      ConfigFormat::Toml => toml::from_str(content).map_err(|e| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source: e,
      }),
    }
  }

  /// Validate the configuration.
  ///
  /// Checks that comment-prefix keys have no leading dot and that prefixes
  /// are non-empty.
  fn validate(&self) -> Result<(), ConfigError> {
    for (extension, prefix) in &self.comment_prefixes {
      if extension.starts_with('.') {
        return Err(ConfigError::InvalidCommentPrefix {
          extension: extension.clone(),
          message: "extension should not include leading dot".to_string(),
        });
      }

      if prefix.trim().is_empty() {
        return Err(ConfigError::InvalidCommentPrefix {
          extension: extension.clone(),
          message: "prefix cannot be empty".to_string(),
        });
      }
    }

    Ok(())
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `COPYGEN_CONFIG` environment variable
/// 3. `.copygen.yaml`, `.copygen.yml` or `.copygen.toml` in `dir`
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, dir: &Path) -> Option<PathBuf> {
  // 1. Explicit path from CLI takes highest priority
  if let Some(path) = explicit_path {
    if path.exists() {
      verbose_log!("Using explicit config path: {}", path.display());
      return Some(path.to_path_buf());
    }
    verbose_log!("Explicit config path does not exist: {}", path.display());
    return None;
  }

  // 2. Check environment variable
  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  // 3. Check the working directory
  let found = DEFAULT_CONFIG_FILENAMES
    .iter()
    .map(|name| dir.join(name))
    .find(|path| path.exists());

  match &found {
    Some(path) => verbose_log!("Using config: {}", path.display()),
    None => verbose_log!("No config file found"),
  }
  found
}

/// Discover and load the configuration.
///
/// # Returns
///
/// The path the configuration was loaded from, together with the
/// configuration itself.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no configuration file exists, or the
/// error from [`Config::load`].
pub fn load_config(explicit_path: Option<&Path>, dir: &Path) -> Result<(PathBuf, Config), ConfigError> {
  let path = discover_config_path(explicit_path, dir).ok_or_else(|| ConfigError::NotFound {
    path: explicit_path
      .map(Path::to_path_buf)
      .unwrap_or_else(|| dir.join(DEFAULT_CONFIG_FILENAMES[0])),
  })?;

  let config = Config::load(&path)?;
  Ok((path, config))
}
