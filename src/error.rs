use std::path::PathBuf;

/// Library-level structured errors for splice.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum SpliceError {
	#[error("Failed to read target file: {path}")]
	TargetReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write target file: {path}")]
	TargetWriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to read rules file: {path}")]
	RulesReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse rules file: {path}")]
	RulesParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to read replacement file: {path}")]
	ReplacementReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Mutually exclusive options in rule '{rule}': {option1} and {option2}")]
	MutuallyExclusive {
		rule: String,
		option1: String,
		option2: String,
	},

	#[error("Rule '{rule}' is missing one of: {options}")]
	MissingField { rule: String, options: String },

	#[error("Rule '{rule}' has an element selector with an empty tag name")]
	EmptySelector { rule: String },

	#[error("Rule '{rule}' uses inner scope but selects {count} elements (inner scope needs exactly one)")]
	InnerScopeRequiresSingleElement { rule: String, count: usize },

	#[error("Required rule '{rule}' did not match anything")]
	RequiredRuleNotFound { rule: String },

	#[error("No target file given on the command line or in the rules file")]
	NoTarget,
}

/// Result type alias using SpliceError.
pub type Result<T> = std::result::Result<T, SpliceError>;
