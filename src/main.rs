//! # copygen
//!
//! A tool that adds a configured copyright header to source files.

mod cli;

use std::process::ExitCode;

use crate::cli::{Cli, run};

fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run(cli.args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      eprintln!("ERROR: {e:#}");
      ExitCode::FAILURE
    }
  }
}
