use crate::config::types::{ElementSelector, Scope};
use crate::markup::{
	AttrValue, Element, OpenTag, complete_element, open_tags, parse_open_tag, skip_whitespace,
};
use crate::rules::matcher::{MatchOutcome, Matcher, Span};

/// Structural matcher: finds elements by tag name and attribute values and
/// extends each to its balanced closing tag.
///
/// With several selectors, the elements must be adjacent siblings separated
/// only by whitespace.
#[derive(Debug, Clone)]
pub struct ElementMatcher {
	selectors: Vec<ElementSelector>,
	scope: Scope,
}

impl ElementMatcher {
	/// Build a matcher. Callers validate the selector list first (see
	/// [`crate::config::Rule::validate`]): at least one selector, and exactly
	/// one for [`Scope::Inner`].
	pub fn new(selectors: Vec<ElementSelector>, scope: Scope) -> Self {
		ElementMatcher { selectors, scope }
	}

	fn match_from(&self, buffer: &str, first: Element<'_>) -> Option<Span> {
		let mut end = first.end;
		for selector in &self.selectors[1..] {
			let next = skip_whitespace(buffer, end);
			let open = parse_open_tag(buffer, next).filter(|tag| selector_matches(selector, tag))?;
			end = complete_element(buffer, open)?.end;
		}

		Some(match self.scope {
			Scope::Outer => Span::new(first.start(), end),
			Scope::Inner => first.inner.into(),
		})
	}
}

fn selector_matches(selector: &ElementSelector, tag: &OpenTag<'_>) -> bool {
	tag.name == selector.tag
		&& selector.attributes.iter().all(|(name, expected)| {
			matches!(tag.attribute(name), Some(AttrValue::Literal(value)) if value == expected)
		})
}

impl Matcher for ElementMatcher {
	fn find_at(&self, buffer: &str, offset: usize) -> MatchOutcome {
		let Some(first_selector) = self.selectors.first() else {
			return MatchOutcome::NotFound;
		};
		if offset > buffer.len() || !buffer.is_char_boundary(offset) {
			return MatchOutcome::NotFound;
		}

		for tag in open_tags(buffer, offset) {
			if !selector_matches(first_selector, &tag) {
				continue;
			}
			if self.scope == Scope::Inner && tag.self_closing {
				continue;
			}

			let start = tag.start;
			let Some(first) = complete_element(buffer, tag) else {
				tracing::debug!(start, tag = %first_selector.tag, "candidate element has no closing tag");
				continue;
			};
			if let Some(span) = self.match_from(buffer, first) {
				return MatchOutcome::Found(span);
			}
		}

		MatchOutcome::NotFound
	}

	fn describe(&self) -> String {
		let selectors: Vec<String> = self
			.selectors
			.iter()
			.map(|selector| {
				let mut text = format!("<{}", selector.tag);
				for (name, value) in &selector.attributes {
					text.push_str(&format!(" {name}=\"{value}\""));
				}
				text.push('>');
				text
			})
			.collect();
		let scope = match self.scope {
			Scope::Outer => "outer",
			Scope::Inner => "inner",
		};
		format!("elements ({scope}): {}", selectors.join(" + "))
	}
}
