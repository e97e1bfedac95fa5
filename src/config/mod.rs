//! Rules file loading and parsing for splice.
//!
//! This module handles:
//! - TOML rules file parsing and validation
//! - Discovery of `.splice.toml` up the directory tree
//! - The `--init` template

pub mod discovery;
pub mod parser;
pub mod template;
pub mod types;

pub use discovery::{RULES_FILE_NAME, discover_rules_file, load_rules};
pub use parser::{parse_rules_file, parse_rules_str};
pub use template::generate_init_template;
pub use types::{Config, ElementSelector, LoadedConfig, Occurrences, Rule, Scope};
