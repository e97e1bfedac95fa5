//! Target file handling for splice.
//!
//! This module handles:
//! - Loading the target file in full
//! - Atomic replacement of the target (temp file in the same directory, then rename)
//! - The load, rewrite, persist sequence

use crate::error::{Result, SpliceError};
use crate::rules::{RewriteReport, RewriteRule, apply_rules};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read the whole target file.
pub fn load_text(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).map_err(|source| SpliceError::TargetReadError {
		path: path.to_path_buf(),
		source,
	})
}

/// Replace the target file's contents atomically.
///
/// Symlinks are followed so the linked file is rewritten and the link kept.
/// The target must be writable by the caller; a read-only target is an error
/// even when its directory is writable. The text is written to a temporary
/// file next to the resolved path, flushed, and renamed over it. Existing
/// permissions are carried over.
pub fn store_text(path: &Path, contents: &str) -> Result<()> {
	let write_error = |source: std::io::Error| SpliceError::TargetWriteError {
		path: path.to_path_buf(),
		source,
	};

	let resolved = match std::fs::canonicalize(path) {
		Ok(resolved) => {
			OpenOptions::new()
				.write(true)
				.open(&resolved)
				.map_err(write_error)?;
			resolved
		}
		Err(e) if e.kind() == ErrorKind::NotFound => path.to_path_buf(),
		Err(e) => return Err(write_error(e)),
	};

	let dir = match resolved.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
	temp.write_all(contents.as_bytes()).map_err(write_error)?;
	temp.as_file().sync_all().map_err(write_error)?;

	if let Ok(metadata) = std::fs::metadata(&resolved) {
		temp.as_file()
			.set_permissions(metadata.permissions())
			.map_err(write_error)?;
	}

	temp.persist(&resolved).map_err(|e| write_error(e.error))?;
	Ok(())
}

/// Outcome of rewriting one file.
#[derive(Debug)]
pub struct FileRewrite {
	pub report: RewriteReport,

	/// Whether the final buffer differs from what was loaded.
	pub changed: bool,

	/// Whether the file on disk was replaced.
	pub written: bool,
}

/// Load `path`, run every rule in memory, then persist once.
///
/// With `strict`, any rule that matched nothing aborts before writing;
/// otherwise only `required` rules do. An unchanged buffer is never written.
/// With `write` false the file is left alone (dry run).
pub fn rewrite_file(
	path: &Path,
	rules: &[RewriteRule],
	strict: bool,
	write: bool,
) -> Result<FileRewrite> {
	let original = load_text(path)?;
	tracing::debug!(path = %path.display(), bytes = original.len(), rules = rules.len(), "loaded target");

	let report = apply_rules(&original, rules);
	report.ensure_complete(strict)?;

	let changed = report.buffer != original;
	let written = write && changed;
	if written {
		store_text(path, &report.buffer)?;
		tracing::info!(path = %path.display(), bytes = report.buffer.len(), "wrote target");
	} else if !changed {
		tracing::info!(path = %path.display(), "target unchanged, not written");
	}

	Ok(FileRewrite {
		report,
		changed,
		written,
	})
}
