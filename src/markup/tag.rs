use std::ops::Range;

/// Value of an attribute on an opening tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue<'a> {
	/// Quoted string, without its quotes.
	Literal(&'a str),

	/// Braced expression, without the outer braces.
	Expression(&'a str),

	/// Attribute written without a value, e.g. `disabled`.
	Flag,
}

/// A single `name=value` pair on an opening tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
	pub name: &'a str,
	pub value: AttrValue<'a>,
}

/// A parsed opening tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag<'a> {
	/// Tag name, e.g. `div` or `GlassPanel`.
	pub name: &'a str,

	/// Attributes in source order. Spread attributes are skipped.
	pub attributes: Vec<Attribute<'a>>,

	/// Byte offset of the `<`.
	pub start: usize,

	/// Byte offset just past the closing `>`.
	pub end: usize,

	/// Whether the tag ends with `/>`.
	pub self_closing: bool,
}

impl<'a> OpenTag<'a> {
	/// Look up an attribute value by name.
	pub fn attribute(&self, name: &str) -> Option<AttrValue<'a>> {
		self.attributes
			.iter()
			.find(|attr| attr.name == name)
			.map(|attr| attr.value)
	}
}

/// An element from its opening tag through its balanced closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<'a> {
	pub open: OpenTag<'a>,

	/// Byte range of the children. Empty and positioned at `open.end` for
	/// self-closing elements.
	pub inner: Range<usize>,

	/// Byte offset just past the closing tag.
	pub end: usize,
}

impl Element<'_> {
	/// Byte offset of the element's `<`.
	pub fn start(&self) -> usize {
		self.open.start
	}
}

fn is_name_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b':' | b'$')
}

fn scan_name(bytes: &[u8], start: usize) -> usize {
	let mut pos = start;
	while pos < bytes.len() && is_name_byte(bytes[pos]) {
		pos += 1;
	}
	pos
}

/// Advance past ASCII whitespace starting at `pos`.
pub fn skip_whitespace(text: &str, pos: usize) -> usize {
	let bytes = text.as_bytes();
	let mut pos = pos;
	while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
		pos += 1;
	}
	pos
}

/// Skip a quoted string starting at the opening quote. Returns the offset just
/// past the closing quote.
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
	let mut pos = start + 1;
	while pos < bytes.len() {
		match bytes[pos] {
			b'\\' => pos += 2,
			b if b == quote => return Some(pos + 1),
			_ => pos += 1,
		}
	}
	None
}

/// Skip a braced expression starting at `{`. Returns the offset just past the
/// matching `}`. String literals and comments inside the braces are skipped
/// whole.
fn skip_braced(bytes: &[u8], start: usize) -> Option<usize> {
	let mut depth = 0usize;
	let mut pos = start;
	while pos < bytes.len() {
		match bytes[pos] {
			b'{' => depth += 1,
			b'}' => {
				depth -= 1;
				if depth == 0 {
					return Some(pos + 1);
				}
			}
			quote @ (b'"' | b'\'' | b'`') => {
				pos = skip_string(bytes, pos, quote)?;
				continue;
			}
			b'/' if bytes.get(pos + 1) == Some(&b'/') => {
				pos += bytes[pos..].iter().position(|&b| b == b'\n')?;
				continue;
			}
			b'/' if bytes.get(pos + 1) == Some(&b'*') => {
				pos += 2 + bytes[pos + 2..].windows(2).position(|w| w == b"*/")? + 2;
				continue;
			}
			_ => {}
		}
		pos += 1;
	}
	None
}

/// Parse an opening tag whose `<` sits at `start`.
///
/// Returns `None` if the text at `start` is not a well-formed opening tag
/// (closing tags, fragments, comparisons like `a < b`, or a tag cut off by the
/// end of the buffer).
pub fn parse_open_tag(text: &str, start: usize) -> Option<OpenTag<'_>> {
	let bytes = text.as_bytes();
	if bytes.get(start) != Some(&b'<') {
		return None;
	}

	let name_start = start + 1;
	let name_end = scan_name(bytes, name_start);
	if name_end == name_start {
		return None;
	}
	match bytes.get(name_end) {
		Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {}
		_ => return None,
	}

	let mut attributes = Vec::new();
	let mut pos = name_end;

	loop {
		pos = skip_whitespace(text, pos);
		match *bytes.get(pos)? {
			b'>' => {
				return Some(OpenTag {
					name: &text[name_start..name_end],
					attributes,
					start,
					end: pos + 1,
					self_closing: false,
				});
			}
			b'/' => {
				if bytes.get(pos + 1) != Some(&b'>') {
					return None;
				}
				return Some(OpenTag {
					name: &text[name_start..name_end],
					attributes,
					start,
					end: pos + 2,
					self_closing: true,
				});
			}
			// Spread attribute: {...props}
			b'{' => pos = skip_braced(bytes, pos)?,
			_ => {
				let attr_end = scan_name(bytes, pos);
				if attr_end == pos {
					return None;
				}
				let name = &text[pos..attr_end];

				pos = skip_whitespace(text, attr_end);
				if bytes.get(pos) != Some(&b'=') {
					attributes.push(Attribute {
						name,
						value: AttrValue::Flag,
					});
					continue;
				}

				pos = skip_whitespace(text, pos + 1);
				let value = match *bytes.get(pos)? {
					quote @ (b'"' | b'\'') => {
						let close = pos + 1 + bytes[pos + 1..].iter().position(|&b| b == quote)?;
						let value = AttrValue::Literal(&text[pos + 1..close]);
						pos = close + 1;
						value
					}
					b'{' => {
						let end = skip_braced(bytes, pos)?;
						let value = AttrValue::Expression(&text[pos + 1..end - 1]);
						pos = end;
						value
					}
					_ => return None,
				};
				attributes.push(Attribute { name, value });
			}
		}
	}
}

/// Parse a closing tag whose `<` sits at `start`.
///
/// Returns the tag name (empty for a fragment `</>`) and the offset just past
/// the `>`.
pub fn parse_close_tag(text: &str, start: usize) -> Option<(&str, usize)> {
	let bytes = text.as_bytes();
	if bytes.get(start) != Some(&b'<') || bytes.get(start + 1) != Some(&b'/') {
		return None;
	}

	let name_start = skip_whitespace(text, start + 2);
	let name_end = scan_name(bytes, name_start);
	let pos = skip_whitespace(text, name_end);
	if bytes.get(pos) != Some(&b'>') {
		return None;
	}
	Some((&text[name_start..name_end], pos + 1))
}

/// Walk forward from an opening tag to its balanced closing tag.
///
/// Nested opening tags with the same name raise the depth, matching closing
/// tags lower it. Returns `None` when the buffer ends before the depth returns
/// to zero.
pub fn complete_element<'a>(text: &'a str, open: OpenTag<'a>) -> Option<Element<'a>> {
	if open.self_closing {
		let at = open.end;
		return Some(Element {
			inner: at..at,
			end: at,
			open,
		});
	}

	let mut depth = 1usize;
	let mut pos = open.end;

	while let Some(offset) = text[pos..].find('<') {
		let lt = pos + offset;
		if let Some((name, end)) = parse_close_tag(text, lt) {
			if name == open.name {
				depth -= 1;
				if depth == 0 {
					return Some(Element {
						inner: open.end..lt,
						end,
						open,
					});
				}
			}
			pos = end;
		} else if let Some(nested) = parse_open_tag(text, lt) {
			if nested.name == open.name && !nested.self_closing {
				depth += 1;
			}
			pos = nested.end;
		} else {
			pos = lt + 1;
		}
	}

	None
}

/// Iterate over opening tags in document order, starting at byte offset `from`.
pub fn open_tags(text: &str, from: usize) -> impl Iterator<Item = OpenTag<'_>> {
	let mut pos = from;
	std::iter::from_fn(move || {
		while pos < text.len() {
			let lt = pos + text[pos..].find('<')?;
			match parse_open_tag(text, lt) {
				Some(tag) => {
					pos = tag.end;
					return Some(tag);
				}
				None => pos = lt + 1,
			}
		}
		None
	})
}
