use crate::config::parser::parse_rules_file;
use crate::config::types::LoadedConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// File name looked up by [`discover_rules_file`].
pub const RULES_FILE_NAME: &str = ".splice.toml";

/// Walk up from `start_dir` looking for a `.splice.toml`.
///
/// Returns the nearest one; files further up the tree are not merged.
pub fn discover_rules_file(start_dir: &Path) -> Option<PathBuf> {
	start_dir
		.ancestors()
		.map(|dir| dir.join(RULES_FILE_NAME))
		.find(|candidate| candidate.is_file())
}

/// Load rules from an explicit path, or from the nearest discovered file.
///
/// Returns `None` when no path was given and nothing was discovered, in which
/// case callers fall back to the built-in rules.
pub fn load_rules(explicit: Option<&Path>, start_dir: &Path) -> Result<Option<LoadedConfig>> {
	let path = match explicit {
		Some(path) => path.to_path_buf(),
		None => match discover_rules_file(start_dir) {
			Some(path) => path,
			None => return Ok(None),
		},
	};

	tracing::debug!(path = %path.display(), "loading rules file");
	let config = parse_rules_file(&path)?;
	Ok(Some(LoadedConfig { config, path }))
}
