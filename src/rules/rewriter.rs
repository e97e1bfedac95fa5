use crate::config::types::{LoadedConfig, Occurrences, Rule};
use crate::error::{Result, SpliceError};
use crate::rules::element::ElementMatcher;
use crate::rules::matcher::{MatchOutcome, Matcher, RegexMatcher, Span};
use std::path::Path;

/// A compiled rule: a matcher paired with its literal replacement block.
///
/// The replacement is inserted as-is. No `$1`-style placeholders are expanded.
#[derive(Debug)]
pub struct RewriteRule {
	/// Name shown in reports.
	pub name: String,

	/// Locates the region to replace.
	pub matcher: Box<dyn Matcher>,

	/// Literal text spliced over the matched region.
	pub replacement: String,

	/// Replace the first match only, or every match.
	pub occurrences: Occurrences,

	/// Whether a miss should abort the run.
	pub required: bool,
}

impl RewriteRule {
	pub fn new(name: &str, matcher: impl Matcher + 'static, replacement: &str) -> Self {
		RewriteRule {
			name: name.to_string(),
			matcher: Box::new(matcher),
			replacement: replacement.to_string(),
			occurrences: Occurrences::First,
			required: false,
		}
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	/// Compile a rules file entry. `replacement-file` is read relative to `base_dir`.
	pub fn from_rule(rule: &Rule, index: usize, base_dir: &Path) -> Result<Self> {
		let name = rule.label(index);

		let matcher: Box<dyn Matcher> = match rule.pattern {
			Some(ref pattern) => Box::new(RegexMatcher::new(pattern)?),
			None => Box::new(ElementMatcher::new(rule.elements.clone(), rule.scope)),
		};

		let replacement = match (&rule.replacement, &rule.replacement_file) {
			(Some(text), _) => text.clone(),
			(None, Some(file)) => {
				let path = base_dir.join(file);
				std::fs::read_to_string(&path)
					.map_err(|source| SpliceError::ReplacementReadError { path, source })?
			}
			(None, None) => {
				return Err(SpliceError::MissingField {
					rule: name,
					options: "replacement, replacement-file".to_string(),
				});
			}
		};

		Ok(RewriteRule {
			name,
			matcher,
			replacement,
			occurrences: rule.occurrences,
			required: rule.required,
		})
	}

	/// Apply this rule to a buffer. Returns the new buffer and the replaced spans.
	pub fn apply(&self, buffer: &str) -> (String, Vec<Span>) {
		match self.occurrences {
			Occurrences::First => {
				let (rewritten, outcome) = replace(buffer, self.matcher.as_ref(), &self.replacement);
				(rewritten, outcome.span().into_iter().collect())
			}
			Occurrences::All => replace_all(buffer, self.matcher.as_ref(), &self.replacement),
		}
	}
}

/// Compile every rule in a loaded rules file.
pub fn compile_rules(loaded: &LoadedConfig) -> Result<Vec<RewriteRule>> {
	let base_dir = loaded.base_dir();
	loaded
		.config
		.rules
		.iter()
		.enumerate()
		.map(|(index, rule)| RewriteRule::from_rule(rule, index, base_dir))
		.collect()
}

/// Replace exactly `span` with `replacement`, keeping every other byte.
pub fn splice(buffer: &str, span: Span, replacement: &str) -> String {
	let mut out = String::with_capacity(buffer.len() - span.len() + replacement.len());
	out.push_str(&buffer[..span.start]);
	out.push_str(replacement);
	out.push_str(&buffer[span.end..]);
	out
}

/// Replace the first match of `matcher`. No match returns the buffer unchanged.
pub fn replace(buffer: &str, matcher: &dyn Matcher, replacement: &str) -> (String, MatchOutcome) {
	match matcher.find(buffer) {
		MatchOutcome::Found(span) => (splice(buffer, span, replacement), MatchOutcome::Found(span)),
		MatchOutcome::NotFound => (buffer.to_string(), MatchOutcome::NotFound),
	}
}

/// Replace every match of `matcher`.
///
/// Each search resumes after the previously inserted replacement, so a
/// replacement that itself matches is not rewritten again. Returned spans are
/// positions in the buffer as it was when each replacement happened.
pub fn replace_all(buffer: &str, matcher: &dyn Matcher, replacement: &str) -> (String, Vec<Span>) {
	let mut out = buffer.to_string();
	let mut spans = Vec::new();
	let mut offset = 0;

	while let MatchOutcome::Found(span) = matcher.find_at(&out, offset) {
		out = splice(&out, span, replacement);
		spans.push(span);
		offset = span.start + replacement.len();

		// An empty match at the same spot would repeat forever.
		if span.is_empty() {
			match out[offset..].chars().next() {
				Some(c) => offset += c.len_utf8(),
				None => break,
			}
		}
	}

	(out, spans)
}

/// What one rule did during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
	pub name: String,

	/// Replaced spans; empty when the rule matched nothing.
	pub spans: Vec<Span>,

	/// Whether the buffer differs after this rule. A rule can match and still
	/// change nothing when the region already holds its replacement.
	pub changed: bool,

	pub required: bool,
}

impl RuleOutcome {
	pub fn is_found(&self) -> bool {
		!self.spans.is_empty()
	}
}

/// Final buffer plus a per-rule record of what matched.
#[derive(Debug, Clone)]
pub struct RewriteReport {
	pub buffer: String,
	pub outcomes: Vec<RuleOutcome>,
}

impl RewriteReport {
	/// Rules that matched nothing.
	pub fn skipped(&self) -> impl Iterator<Item = &RuleOutcome> {
		self.outcomes.iter().filter(|outcome| !outcome.is_found())
	}

	/// Fail on the first rule that matched nothing and was required, or on any
	/// miss when `strict` is set.
	pub fn ensure_complete(&self, strict: bool) -> Result<()> {
		match self
			.skipped()
			.find(|outcome| strict || outcome.required)
		{
			Some(outcome) => Err(SpliceError::RequiredRuleNotFound {
				rule: outcome.name.clone(),
			}),
			None => Ok(()),
		}
	}
}

/// Apply rules in order, each to the previous rule's output.
///
/// Nothing is rolled back: a rule that misses leaves earlier rules' edits in
/// place. Use [`RewriteReport::ensure_complete`] before persisting to make the
/// sequence all-or-nothing.
pub fn apply_rules(buffer: &str, rules: &[RewriteRule]) -> RewriteReport {
	let mut current = buffer.to_string();
	let mut outcomes = Vec::with_capacity(rules.len());

	for rule in rules {
		let (rewritten, spans) = rule.apply(&current);
		let changed = rewritten != current;
		if spans.is_empty() {
			tracing::warn!(rule = %rule.name, matcher = %rule.matcher.describe(), "rule matched nothing, skipped");
		} else {
			for span in &spans {
				tracing::debug!(rule = %rule.name, at = %span, changed, "replaced region");
			}
		}
		current = rewritten;
		outcomes.push(RuleOutcome {
			name: rule.name.clone(),
			spans,
			changed,
			required: rule.required,
		});
	}

	RewriteReport {
		buffer: current,
		outcomes,
	}
}
