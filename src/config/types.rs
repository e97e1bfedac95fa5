use crate::error::SpliceError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Top-level configuration from a `.splice.toml` rules file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// File to rewrite, relative to the rules file's directory.
	#[serde(default)]
	pub target: Option<PathBuf>,

	/// If true, any rule that does not match aborts the run before writing.
	#[serde(default)]
	pub strict: bool,

	/// Rewrite rules, applied in order. Each sees the previous rule's output.
	#[serde(default)]
	pub rules: Vec<Rule>,
}

/// A rewrite rule: how to find the region, and what to put in its place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Rule {
	/// Name shown in reports. Defaults to `rule-N`.
	pub name: Option<String>,

	/// Regex locating the region (mutually exclusive with elements).
	/// `.` matches line breaks.
	pub pattern: Option<String>,

	/// Adjacent sibling elements locating the region (mutually exclusive with pattern).
	#[serde(default)]
	pub elements: Vec<ElementSelector>,

	/// Whether element matches cover whole elements or only their children.
	#[serde(default)]
	pub scope: Scope,

	/// Replace the first match only, or every match.
	#[serde(default)]
	pub occurrences: Occurrences,

	/// Literal replacement text (mutually exclusive with replacement_file).
	pub replacement: Option<String>,

	/// File holding the replacement text, relative to the rules file's directory.
	pub replacement_file: Option<PathBuf>,

	/// If true, this rule not matching aborts the run before writing.
	#[serde(default)]
	pub required: bool,
}

/// Identifies an element by tag name and exact attribute values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ElementSelector {
	pub tag: String,

	/// Attributes that must be present as quoted strings with exactly these values.
	#[serde(default)]
	pub attributes: BTreeMap<String, String>,
}

impl ElementSelector {
	pub fn new(tag: &str) -> Self {
		ElementSelector {
			tag: tag.to_string(),
			attributes: BTreeMap::new(),
		}
	}

	pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
		self.attributes.insert(name.to_string(), value.to_string());
		self
	}
}

/// Which part of a matched element gets replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
	/// Opening tag through closing tag.
	#[default]
	Outer,

	/// Children only; the element's own tags are kept.
	Inner,
}

/// How many matches a rule replaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occurrences {
	#[default]
	First,
	All,
}

/// A loaded rules file with its source path for display and relative paths.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

impl LoadedConfig {
	/// Directory that relative `target` and `replacement-file` paths resolve against.
	pub fn base_dir(&self) -> &Path {
		self.path.parent().unwrap_or_else(|| Path::new("."))
	}

	/// The configured target, resolved against the rules file's directory.
	pub fn target(&self) -> Option<PathBuf> {
		self.config
			.target
			.as_ref()
			.map(|target| self.base_dir().join(target))
	}
}

impl Rule {
	/// Display name for the rule at `index` in its file.
	pub fn label(&self, index: usize) -> String {
		self.name
			.clone()
			.unwrap_or_else(|| format!("rule-{}", index + 1))
	}

	/// Validate field combinations.
	pub fn validate(&self, index: usize) -> Result<(), SpliceError> {
		let rule = self.label(index);

		match (self.pattern.is_some(), !self.elements.is_empty()) {
			(true, true) => {
				return Err(SpliceError::MutuallyExclusive {
					rule,
					option1: "pattern".to_string(),
					option2: "elements".to_string(),
				});
			}
			(false, false) => {
				return Err(SpliceError::MissingField {
					rule,
					options: "pattern, elements".to_string(),
				});
			}
			_ => {}
		}

		match (self.replacement.is_some(), self.replacement_file.is_some()) {
			(true, true) => {
				return Err(SpliceError::MutuallyExclusive {
					rule,
					option1: "replacement".to_string(),
					option2: "replacement-file".to_string(),
				});
			}
			(false, false) => {
				return Err(SpliceError::MissingField {
					rule,
					options: "replacement, replacement-file".to_string(),
				});
			}
			_ => {}
		}

		if self.elements.iter().any(|selector| selector.tag.is_empty()) {
			return Err(SpliceError::EmptySelector { rule });
		}

		if self.pattern.is_some() && self.scope == Scope::Inner {
			return Err(SpliceError::MutuallyExclusive {
				rule,
				option1: "pattern".to_string(),
				option2: "scope = \"inner\"".to_string(),
			});
		}

		if self.scope == Scope::Inner && self.elements.len() != 1 {
			return Err(SpliceError::InnerScopeRequiresSingleElement {
				rule,
				count: self.elements.len(),
			});
		}

		Ok(())
	}
}

impl Config {
	/// Validate all rules in this config.
	pub fn validate(&self) -> Result<(), SpliceError> {
		for (index, rule) in self.rules.iter().enumerate() {
			rule.validate(index)?;
		}
		Ok(())
	}
}
