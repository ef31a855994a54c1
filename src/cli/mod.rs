//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing; the actual work happens in
//! [`run`](run::run).

mod run;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use run::{RunArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Version string with the git commit the binary was built from.
const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("COPYGEN_GIT_HASH"), ")");

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "copygen",
  version,
  long_version = LONG_VERSION,
  about = "copygen - Automate copyright headers",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add the header from .copygen.yaml to every file under src/
  copygen src/

  # Show which files would change without touching them
  copygen --dry-run .

  # Use a specific config file and machine-readable output
  copygen --config headers.toml --view json .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub args: RunArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
