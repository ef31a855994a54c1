//! # Run Command
//!
//! Loads the configuration, builds a [`Processor`] and walks the given path.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use copygen::config::load_config;
use copygen::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use copygen::processor::{Processor, ProcessorConfig};
use copygen::report::{ViewType, stdout_reporter};
use copygen::templates::CommentPrefixes;
use copygen::{info_log, verbose_log};
use tracing::debug;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
  /// File or directory to process. Directories are processed recursively.
  pub path: PathBuf,

  /// Dry run mode: report files missing the header without modifying them
  #[arg(long)]
  pub dry_run: bool,

  /// Path to config file (default: .copygen.yaml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// How to report changed files (human, json, none)
  #[arg(long, value_name = "VIEW", default_value_t = ViewType::Human)]
  pub view: ViewType,

  /// Treat failures to write a report line as fatal
  #[arg(long)]
  pub strict_reporting: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except reports and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run copygen with the given arguments
pub fn run(args: RunArgs) -> Result<()> {
  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set the output mode used by info_log! and verbose_log!
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  if !args.path.exists() {
    bail!("path {} does not exist", args.path.display());
  }

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;
  let (config_path, config) = load_config(args.config.as_deref(), &current_dir)?;

  // Status lines would corrupt machine-readable output
  if args.view == ViewType::Human {
    info_log!("Using \"{}\"", config_path.display());
    info_log!("Processing \"{}\"", args.path.display());
  }

  if config.header.is_empty() {
    debug!("Header template is empty, no file will be changed");
  }

  let comment_prefixes = CommentPrefixes::builtin().with_overrides(&config.comment_prefixes);
  debug!("{} file extensions have a comment prefix", comment_prefixes.len());

  let processor = Processor::new(ProcessorConfig {
    exclude: config.exclude,
    comment_prefixes,
    dry_run: args.dry_run,
    strict_reporting: args.strict_reporting,
    reporter: Some(stdout_reporter(args.view)),
    ..ProcessorConfig::new(config.header, args.path.clone())
  });

  let summary = processor.process()?;

  verbose_log!(
    "{} files checked, {} already had the header, {} {}",
    summary.checked,
    summary.already_present,
    summary.changed,
    if args.dry_run { "would change" } else { "changed" }
  );

  Ok(())
}
