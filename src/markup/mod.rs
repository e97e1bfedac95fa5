//! Balanced-delimiter scanning for JSX/HTML-like markup.
//!
//! This module handles:
//! - Parsing opening tags, including multi-line tags and braced attribute values
//! - Walking forward to an element's balanced closing tag
//!
//! It is a tokenizer, not a parser: text between tags is never interpreted.

pub mod tag;

pub use tag::{
	AttrValue, Attribute, Element, OpenTag, complete_element, open_tags, parse_close_tag,
	parse_open_tag, skip_whitespace,
};
