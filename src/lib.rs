//! Splice - CLI tool for splicing pre-authored blocks into markup source files.
//!
//! This library provides the core functionality for splice, including:
//! - Region matching by regex or by balanced element structure
//! - Literal first-match (or all-match) substitution
//! - Rule sequences with per-rule outcomes and an all-or-nothing mode
//! - Rules file parsing and discovery
//! - Atomic target file replacement
//!
//! # Example
//!
//! ```no_run
//! use splice_cli::file::rewrite_file;
//! use splice_cli::rules::builtin_rules;
//! use std::path::Path;
//!
//! let result = rewrite_file(Path::new("src/App.tsx"), &builtin_rules(), false, true).unwrap();
//!
//! for outcome in result.report.skipped() {
//!     println!("Skipped rule: {}", outcome.name);
//! }
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod markup;
pub mod rules;

pub use error::{Result, SpliceError};
