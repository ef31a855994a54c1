//! # Report Module
//!
//! The reporting sink used by the processor. The processor hands over one
//! plain message per changed (or would-be-changed) file; the reporters here
//! decide how that message is presented.
//!
//! - [`HumanReporter`] writes the message as a line of text, colored only
//!   when built for a terminal stream with [`HumanReporter::for_stream`]
//! - [`JsonReporter`] writes one JSON object per message
//! - [`SilentReporter`] discards everything
//!
//! Use [`new_reporter`] to construct the reporter for a [`ViewType`] over any
//! writer, or [`stdout_reporter`] for the process's stdout; parse
//! a view name with [`str::parse`], which fails with
//! [`ReportError::UnknownView`] for names it does not know.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

/// Error type for reporter construction.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReportError {
  /// The requested view is not one of the known view types.
  #[error("unknown view type '{0}' (expected one of: none, human, json)")]
  UnknownView(String),
}

/// Which reporter renders processor notifications.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
  /// Discard notifications
  None,
  /// Plain text lines, colored on terminals
  #[default]
  Human,
  /// One JSON object per line
  Json,
}

impl fmt::Display for ViewType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ViewType::None => "none",
      ViewType::Human => "human",
      ViewType::Json => "json",
    };
    f.write_str(name)
  }
}

impl FromStr for ViewType {
  type Err = ReportError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "none" => Ok(ViewType::None),
      "human" => Ok(ViewType::Human),
      "json" => Ok(ViewType::Json),
      _ => Err(ReportError::UnknownView(s.to_string())),
    }
  }
}

/// Sink for processor notifications.
///
/// Implementations must be usable from several threads at once.
pub trait Reporter: Send + Sync {
  /// Reports a single message, e.g. `added header to src/main.go`.
  ///
  /// # Errors
  ///
  /// Returns an error if the underlying writer fails.
  fn report(&self, message: &str) -> io::Result<()>;
}

type SharedWriter = Mutex<Box<dyn Write + Send>>;

fn lock_writer(writer: &SharedWriter) -> std::sync::MutexGuard<'_, Box<dyn Write + Send>> {
  writer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes each message as a line of text.
pub struct HumanReporter {
  writer: SharedWriter,
  /// Stream whose color support decides styling; `None` writes plain text.
  color_stream: Option<Stream>,
}

impl HumanReporter {
  /// Creates a reporter that writes plain, uncolored lines.
  pub fn new(writer: Box<dyn Write + Send>) -> Self {
    Self {
      writer: Mutex::new(writer),
      color_stream: None,
    }
  }

  /// Creates a reporter whose lines are blue when `stream` supports color.
  ///
  /// `writer` is expected to write to `stream`; the writer itself is never
  /// inspected.
  pub fn for_stream(writer: Box<dyn Write + Send>, stream: Stream) -> Self {
    Self {
      writer: Mutex::new(writer),
      color_stream: Some(stream),
    }
  }
}

impl Reporter for HumanReporter {
  fn report(&self, message: &str) -> io::Result<()> {
    let mut writer = lock_writer(&self.writer);
    match self.color_stream {
      Some(stream) => writeln!(writer, "{}", message.if_supports_color(stream, |m| m.blue()))?,
      None => writeln!(writer, "{message}")?,
    }
    writer.flush()
  }
}

#[derive(Serialize)]
struct JsonMessage<'a> {
  message: &'a str,
}

/// Writes each message as a single-line JSON object: `{"message":"..."}`.
pub struct JsonReporter {
  writer: SharedWriter,
}

impl JsonReporter {
  pub fn new(writer: Box<dyn Write + Send>) -> Self {
    Self {
      writer: Mutex::new(writer),
    }
  }
}

impl Reporter for JsonReporter {
  fn report(&self, message: &str) -> io::Result<()> {
    let mut writer = lock_writer(&self.writer);
    serde_json::to_writer(&mut *writer, &JsonMessage { message })?;
    writer.write_all(b"\n")?;
    writer.flush()
  }
}

/// Discards every message.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
  fn report(&self, _message: &str) -> io::Result<()> {
    Ok(())
  }
}

/// Creates the reporter for `view`, writing to `writer`.
///
/// The human view writes plain text here; see [`stdout_reporter`] for
/// colored terminal output.
pub fn new_reporter(view: ViewType, writer: Box<dyn Write + Send>) -> Box<dyn Reporter> {
  match view {
    ViewType::None => Box::new(SilentReporter),
    ViewType::Human => Box::new(HumanReporter::new(writer)),
    ViewType::Json => Box::new(JsonReporter::new(writer)),
  }
}

/// Creates the reporter for `view`, writing to stdout.
///
/// The human view is colored when stdout supports it (see
/// [`ColorMode`](crate::logging::ColorMode) for overriding that).
pub fn stdout_reporter(view: ViewType) -> Box<dyn Reporter> {
  match view {
    ViewType::Human => Box::new(HumanReporter::for_stream(Box::new(io::stdout()), Stream::Stdout)),
    _ => new_reporter(view, Box::new(io::stdout())),
  }
}
