//! # copygen
//!
//! A tool that adds a configured copyright header to every source file in a
//! directory tree that does not already carry it.
//!
//! `copygen` modifies source files in place and never touches a file that
//! already starts with the expected header. Files are rewritten through a
//! temporary file and a rename, so a failed run never leaves a file half
//! written.
//!
//! ## Features
//!
//! * Recursively scan a directory and add the header to source files
//! * Per-extension comment prefixes (`//`, `#`, `--`, ...), extensible from
//!   the config file
//! * Exclusion list with glob and directory patterns
//! * Dry-run mode that only reports which files would change
//! * Human, JSON or silent reporting
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use copygen::processor::{Processor, ProcessorConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let processor = Processor::new(ProcessorConfig {
//!         exclude: vec!["vendor/**".to_string()],
//!         dry_run: true,
//!         ..ProcessorConfig::new("Copyright (c) Copygen", "src")
//!     });
//!
//!     let summary = processor.process()?;
//!     println!("{} files would change", summary.changed);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Tree walking, header detection and insertion
//! * [`templates`] - Comment prefixes and header formatting
//! * [`exclude`] - Exclusion pattern matching
//! * [`report`] - Reporting of changed files
//! * [`config`] - Configuration file loading
//! * [`logging`] - Output modes and diagnostics
//!
//! [`processor`]: crate::processor
//! [`templates`]: crate::templates
//! [`exclude`]: crate::exclude
//! [`report`]: crate::report
//! [`config`]: crate::config
//! [`logging`]: crate::logging

pub mod config;
pub mod exclude;
pub mod logging;
pub mod processor;
pub mod report;
pub mod templates;
