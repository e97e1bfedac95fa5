use crate::error::{Result, SpliceError};
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::ops::Range;

/// Half-open byte range `[start, end)` of a match within a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
	pub start: usize,
	pub end: usize,
}

impl Span {
	pub fn new(start: usize, end: usize) -> Self {
		debug_assert!(start <= end, "span start {start} past end {end}");
		Span { start, end }
	}

	pub fn len(&self) -> usize {
		self.end - self.start
	}

	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	pub fn range(&self) -> Range<usize> {
		self.start..self.end
	}
}

impl From<Range<usize>> for Span {
	fn from(range: Range<usize>) -> Self {
		Span::new(range.start, range.end)
	}
}

impl fmt::Display for Span {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}..{}", self.start, self.end)
	}
}

/// Result of looking for a rule's region in a buffer.
///
/// Absence is a normal outcome, not an error; callers decide whether a
/// missing anchor should warn or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
	Found(Span),
	NotFound,
}

impl MatchOutcome {
	pub fn span(&self) -> Option<Span> {
		match self {
			MatchOutcome::Found(span) => Some(*span),
			MatchOutcome::NotFound => None,
		}
	}

	pub fn is_found(&self) -> bool {
		matches!(self, MatchOutcome::Found(_))
	}
}

/// Locates the first region of a buffer that satisfies some expression.
pub trait Matcher: fmt::Debug {
	/// Find the first match that starts at or after byte offset `offset`.
	fn find_at(&self, buffer: &str, offset: usize) -> MatchOutcome;

	/// Find the first match in document order.
	fn find(&self, buffer: &str) -> MatchOutcome {
		self.find_at(buffer, 0)
	}

	/// Short human-readable description for `rules show`.
	fn describe(&self) -> String;
}

/// Textual matcher over a regex compiled with dot-matches-newline.
///
/// The match is purely textual. With a lazy `.*?` the match ends at the first
/// closing marker that lets the rest of the expression succeed, even when that
/// marker belongs to a nested element.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
	regex: Regex,
}

impl RegexMatcher {
	/// Compile a pattern. `.` matches line breaks.
	pub fn new(pattern: &str) -> Result<Self> {
		let regex = RegexBuilder::new(pattern)
			.dot_matches_new_line(true)
			.build()
			.map_err(|source| SpliceError::InvalidRegex {
				pattern: pattern.to_string(),
				source,
			})?;
		Ok(RegexMatcher { regex })
	}
}

impl Matcher for RegexMatcher {
	fn find_at(&self, buffer: &str, offset: usize) -> MatchOutcome {
		if offset > buffer.len() {
			return MatchOutcome::NotFound;
		}
		self.regex
			.find_at(buffer, offset)
			.map_or(MatchOutcome::NotFound, |m| {
				MatchOutcome::Found(m.range().into())
			})
	}

	fn describe(&self) -> String {
		format!("pattern: {}", self.regex.as_str())
	}
}
