//! Region matching and splicing for splice.
//!
//! This module handles:
//! - Locating a region by regex (dot matches newline) or by element structure
//! - Splicing literal replacement text over the first (or every) match
//! - Running rules in sequence and reporting which ones matched

pub mod builtin;
pub mod element;
pub mod matcher;
pub mod rewriter;

pub use builtin::builtin_rules;
pub use element::ElementMatcher;
pub use matcher::{MatchOutcome, Matcher, RegexMatcher, Span};
pub use rewriter::{
	RewriteReport, RewriteRule, RuleOutcome, apply_rules, compile_rules, replace, replace_all,
	splice,
};
