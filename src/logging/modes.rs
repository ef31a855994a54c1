use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Global output mode (normal, quiet or verbose).
///
/// This is initialized to `Normal` until changed via [`set_verbose`] or
/// [`set_quiet`].
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  /// Convert from u8 to OutputMode
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => OutputMode::Quiet,
      2 => OutputMode::Verbose,
      _ => OutputMode::Normal,
    }
  }

  fn current() -> Self {
    Self::from_u8(OUTPUT_MODE.load(Ordering::SeqCst))
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies this mode to every `owo-colors` call in the process.
  ///
  /// `Auto` clears any override so that each stream's TTY support decides.
  pub fn apply(self) {
    match self {
      ColorMode::Auto => owo_colors::unset_override(),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Always => owo_colors::set_override(true),
    }
  }
}

/// Sets the global output mode to verbose.
///
/// When verbose logging is enabled, the [`verbose_log!`](crate::verbose_log)
/// macro will output messages to stderr.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

/// Sets the global output mode to quiet.
pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Checks if verbose logging is currently enabled.
pub fn is_verbose() -> bool {
  OutputMode::current() == OutputMode::Verbose
}

/// Checks if quiet mode is currently enabled.
pub fn is_quiet() -> bool {
  OutputMode::current() == OutputMode::Quiet
}

/// Default tracing directive for the given flags, used when `RUST_LOG` is
/// not set.
pub const fn default_directive(quiet: bool, verbose: u8) -> &'static str {
  if quiet {
    return "error";
  }
  match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Installs the global `tracing` subscriber.
///
/// Diagnostics go to stderr so that stdout only carries reports. `RUST_LOG`
/// takes precedence over the verbosity flags. Calling this more than once
/// is harmless; later calls keep the first subscriber.
pub fn init_tracing(quiet: bool, verbose: u8) {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose)));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .try_init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_directive() {
    assert_eq!(default_directive(true, 3), "error");
    assert_eq!(default_directive(false, 0), "warn");
    assert_eq!(default_directive(false, 1), "info");
    assert_eq!(default_directive(false, 2), "debug");
    assert_eq!(default_directive(false, 9), "trace");
  }

  #[test]
  fn test_output_mode_from_u8() {
    assert_eq!(OutputMode::from_u8(0), OutputMode::Normal);
    assert_eq!(OutputMode::from_u8(1), OutputMode::Quiet);
    assert_eq!(OutputMode::from_u8(2), OutputMode::Verbose);
    assert_eq!(OutputMode::from_u8(42), OutputMode::Normal);
  }
}
