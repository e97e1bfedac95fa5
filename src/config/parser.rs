use crate::config::types::Config;
use crate::error::{Result, SpliceError};
use std::path::Path;

/// Parse a rules file from the given path.
pub fn parse_rules_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| SpliceError::RulesReadError {
		path: path.to_path_buf(),
		source,
	})?;

	parse_rules_str(&content, path)
}

/// Parse rules from a string (useful for testing).
pub fn parse_rules_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config = toml::from_str(content).map_err(|source| SpliceError::RulesParseError {
		path: path.to_path_buf(),
		source,
	})?;

	config.validate()?;

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::{Occurrences, Scope};
	use std::path::PathBuf;

	#[test]
	fn test_parse_empty_config() {
		let path = PathBuf::from("test.toml");
		let config = parse_rules_str("", &path).unwrap();

		assert!(config.target.is_none());
		assert!(!config.strict);
		assert!(config.rules.is_empty());
	}

	#[test]
	fn test_parse_top_level_options() {
		let content = r#"
target = "src/App.tsx"
strict = true
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_rules_str(content, &path).unwrap();

		assert_eq!(config.target, Some(PathBuf::from("src/App.tsx")));
		assert!(config.strict);
	}

	#[test]
	fn test_parse_pattern_rule() {
		let content = r#"
[[rules]]
name = "decision-center"
pattern = '<GlassPanel title="DECISION CENTER"[^>]*>.*?</GlassPanel>'
replacement = "<DecisionCenter />"
required = true
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_rules_str(content, &path).unwrap();

		assert_eq!(config.rules.len(), 1);
		let rule = &config.rules[0];
		assert_eq!(rule.label(0), "decision-center");
		assert_eq!(
			rule.pattern.as_deref(),
			Some(r#"<GlassPanel title="DECISION CENTER"[^>]*>.*?</GlassPanel>"#)
		);
		assert_eq!(rule.replacement.as_deref(), Some("<DecisionCenter />"));
		assert!(rule.required);
		assert_eq!(rule.occurrences, Occurrences::First);
	}

	#[test]
	fn test_parse_element_rule() {
		let content = r#"
[[rules]]
elements = [
    { tag = "div", attributes = { className = "grid grid-cols-3 gap-2 sm:gap-3" } },
    { tag = "div", attributes = { className = "flex flex-wrap gap-2 sm:gap-3" } },
]
occurrences = "all"
replacement-file = "dashboard.tsx"
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_rules_str(content, &path).unwrap();

		let rule = &config.rules[0];
		assert_eq!(rule.label(0), "rule-1");
		assert_eq!(rule.elements.len(), 2);
		assert_eq!(rule.elements[0].tag, "div");
		assert_eq!(
			rule.elements[1].attributes.get("className").map(String::as_str),
			Some("flex flex-wrap gap-2 sm:gap-3")
		);
		assert_eq!(rule.scope, Scope::Outer);
		assert_eq!(rule.occurrences, Occurrences::All);
		assert_eq!(rule.replacement_file, Some(PathBuf::from("dashboard.tsx")));
	}

	#[test]
	fn test_parse_inner_scope() {
		let content = r#"
[[rules]]
elements = [{ tag = "GlassPanel", attributes = { title = "DECISION CENTER" } }]
scope = "inner"
replacement = ""
"#;
		let path = PathBuf::from("test.toml");
		let config = parse_rules_str(content, &path).unwrap();
		assert_eq!(config.rules[0].scope, Scope::Inner);
	}

	#[test]
	fn test_pattern_and_elements_are_mutually_exclusive() {
		let content = r#"
[[rules]]
name = "both"
pattern = "x"
elements = [{ tag = "div" }]
replacement = "y"
"#;
		let path = PathBuf::from("test.toml");
		match parse_rules_str(content, &path).unwrap_err() {
			SpliceError::MutuallyExclusive {
				rule,
				option1,
				option2,
			} => {
				assert_eq!(rule, "both");
				assert_eq!(option1, "pattern");
				assert_eq!(option2, "elements");
			}
			other => panic!("Expected MutuallyExclusive error, got {other:?}"),
		}
	}

	#[test]
	fn test_replacement_options_are_mutually_exclusive() {
		let content = r#"
[[rules]]
pattern = "x"
replacement = "y"
replacement-file = "y.tsx"
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_rules_str(content, &path).unwrap_err(),
			SpliceError::MutuallyExclusive { .. }
		));
	}

	#[test]
	fn test_missing_matcher() {
		let content = r#"
[[rules]]
replacement = "y"
"#;
		let path = PathBuf::from("test.toml");
		match parse_rules_str(content, &path).unwrap_err() {
			SpliceError::MissingField { rule, options } => {
				assert_eq!(rule, "rule-1");
				assert_eq!(options, "pattern, elements");
			}
			other => panic!("Expected MissingField error, got {other:?}"),
		}
	}

	#[test]
	fn test_missing_replacement() {
		let content = r#"
[[rules]]
pattern = "x"
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_rules_str(content, &path).unwrap_err(),
			SpliceError::MissingField { .. }
		));
	}

	#[test]
	fn test_empty_selector_tag() {
		let content = r#"
[[rules]]
elements = [{ tag = "" }]
replacement = "y"
"#;
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_rules_str(content, &path).unwrap_err(),
			SpliceError::EmptySelector { .. }
		));
	}

	#[test]
	fn test_inner_scope_requires_single_element() {
		let content = r#"
[[rules]]
elements = [{ tag = "div" }, { tag = "div" }]
scope = "inner"
replacement = "y"
"#;
		let path = PathBuf::from("test.toml");
		match parse_rules_str(content, &path).unwrap_err() {
			SpliceError::InnerScopeRequiresSingleElement { count, .. } => assert_eq!(count, 2),
			other => panic!("Expected InnerScopeRequiresSingleElement error, got {other:?}"),
		}
	}

	#[test]
	fn test_inner_scope_rejected_for_pattern() {
		let content = r#"
[[rules]]
name = "panel"
pattern = "<p>.*?</p>"
scope = "inner"
replacement = "y"
"#;
		let path = PathBuf::from("test.toml");
		match parse_rules_str(content, &path).unwrap_err() {
			SpliceError::MutuallyExclusive {
				rule,
				option1,
				option2,
			} => {
				assert_eq!(rule, "panel");
				assert_eq!(option1, "pattern");
				assert_eq!(option2, r#"scope = "inner""#);
			}
			other => panic!("Expected MutuallyExclusive error, got {other:?}"),
		}
	}

	#[test]
	fn test_invalid_toml() {
		let path = PathBuf::from("test.toml");
		assert!(matches!(
			parse_rules_str("invalid toml [[[", &path).unwrap_err(),
			SpliceError::RulesParseError { .. }
		));
	}

	#[test]
	fn test_unknown_scope_rejected() {
		let content = r#"
[[rules]]
elements = [{ tag = "div" }]
scope = "sideways"
replacement = "y"
"#;
		let path = PathBuf::from("test.toml");
		assert!(parse_rules_str(content, &path).is_err());
	}
}
