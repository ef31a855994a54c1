//! # Logging Module
//!
//! This module provides logging utilities for the copygen tool, including:
//! - Global quiet / verbose output modes
//! - Color mode handling for terminal output
//! - Initialisation of the `tracing` subscriber used for diagnostics
//!
//! Diagnostics (`tracing` events and [`verbose_log!`](crate::verbose_log))
//! go to stderr; reports go to stdout for better pipeline integration.
//!
//! ## Example
//!
//! ```rust
//! use copygen::logging::{ColorMode, set_verbose};
//! use copygen::verbose_log;
//!
//! // Enable verbose logging
//! set_verbose();
//!
//! // Let owo-colors decide based on TTY detection
//! ColorMode::Auto.apply();
//!
//! // Log a verbose message (goes to stderr)
//! verbose_log!("Processing file: {}", "main.go");
//! ```

mod modes;

pub use modes::{ColorMode, default_directive, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// This macro is used for detailed logging that is only shown when verbose mode
/// is enabled via [`set_verbose`]. It uses the same format string syntax as
/// the standard [`eprintln!`] macro.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a status message to stdout unless quiet mode is enabled.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Internal function to print info log messages with formatting.
///
/// This function is used by the [`info_log!`](crate::info_log) macro to
/// print messages in blue when colors are enabled.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.blue()));
}
