use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use splice_cli::SpliceError;
use splice_cli::config::{
	LoadedConfig, Occurrences, RULES_FILE_NAME, generate_init_template, load_rules,
};
use splice_cli::file::{FileRewrite, rewrite_file};
use splice_cli::rules::{RewriteRule, builtin_rules, compile_rules};

#[derive(Parser)]
#[command(name = "splice")]
#[command(
	author,
	version,
	about = "CLI tool for splicing pre-authored blocks into markup source files"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// File to rewrite (defaults to `target` from the rules file)
	#[arg(value_name = "TARGET")]
	target: Option<PathBuf>,

	/// Load rules from this file instead of discovering .splice.toml
	#[arg(long, value_name = "FILE", global = true, conflicts_with = "builtin")]
	rules: Option<PathBuf>,

	/// Use the built-in rules even if a .splice.toml is found
	#[arg(long, global = true)]
	builtin: bool,

	/// Print the rewritten file to stdout instead of writing it
	#[arg(long)]
	dry_run: bool,

	/// Fail without writing anything if any rule matches nothing
	#[arg(long)]
	strict: bool,

	/// Increase log verbosity (-v info, -vv debug). SPLICE_LOG overrides.
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	/// Create a template .splice.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .splice.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Rules file commands
	Rules {
		#[command(subcommand)]
		action: RulesAction,
	},
}

#[derive(Subcommand)]
enum RulesAction {
	/// Display the rules that would run, in order
	Show,
	/// Check the rules file for errors without touching any target
	Validate,
}

/// Where the rules for this run come from.
enum RuleSource {
	Builtin,
	File(LoadedConfig),
}

impl RuleSource {
	fn load(explicit: Option<&Path>, builtin: bool) -> Result<Self> {
		if builtin {
			return Ok(RuleSource::Builtin);
		}

		let cwd = std::env::current_dir().context("Failed to get current directory")?;
		let loaded = load_rules(explicit, &cwd).context("Failed to load rules")?;
		Ok(loaded.map_or(RuleSource::Builtin, RuleSource::File))
	}

	fn compile(&self) -> Result<Vec<RewriteRule>> {
		match self {
			RuleSource::Builtin => Ok(builtin_rules()),
			RuleSource::File(loaded) => compile_rules(loaded)
				.with_context(|| format!("Failed to compile rules from {}", loaded.path.display())),
		}
	}

	fn target(&self) -> Option<PathBuf> {
		match self {
			RuleSource::Builtin => None,
			RuleSource::File(loaded) => loaded.target(),
		}
	}

	fn strict(&self) -> bool {
		match self {
			RuleSource::Builtin => false,
			RuleSource::File(loaded) => loaded.config.strict,
		}
	}

	fn describe(&self) -> String {
		match self {
			RuleSource::Builtin => "built-in rules".to_string(),
			RuleSource::File(loaded) => loaded.path.display().to_string(),
		}
	}
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	// Handle subcommands
	if let Some(ref command) = cli.command {
		return match command {
			Commands::Rules { action } => match action {
				RulesAction::Show => handle_rules_show(&cli),
				RulesAction::Validate => handle_rules_validate(&cli),
			},
		};
	}

	handle_rewrite(&cli)
}

fn init_tracing(verbose: u8) {
	let default_level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	let filter =
		EnvFilter::try_from_env("SPLICE_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(RULES_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{RULES_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {RULES_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_rewrite(cli: &Cli) -> Result<ExitCode> {
	let source = RuleSource::load(cli.rules.as_deref(), cli.builtin)?;
	let rules = source.compile()?;

	let target = cli
		.target
		.clone()
		.or_else(|| source.target())
		.ok_or(SpliceError::NoTarget)?;
	let strict = cli.strict || source.strict();

	tracing::info!(path = %target.display(), rules = %source.describe(), strict, "rewriting");

	let result = rewrite_file(&target, &rules, strict, !cli.dry_run)
		.with_context(|| format!("Failed to rewrite {}", target.display()))?;

	let summary = summarize(&target, &result);
	if cli.dry_run {
		print!("{}", result.report.buffer);
		for line in summary {
			eprintln!("{line}");
		}
	} else {
		for line in summary {
			println!("{line}");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn summarize(target: &Path, result: &FileRewrite) -> Vec<String> {
	let mut lines: Vec<String> = result
		.report
		.outcomes
		.iter()
		.map(|outcome| {
			let spans: Vec<String> = outcome.spans.iter().map(ToString::to_string).collect();
			if !outcome.is_found() {
				format!("{}: not found, skipped", outcome.name)
			} else if outcome.changed {
				format!("{}: replaced {}", outcome.name, spans.join(", "))
			} else {
				format!("{}: matched {}, already up to date", outcome.name, spans.join(", "))
			}
		})
		.collect();

	lines.push(if result.written {
		format!("Wrote {}", target.display())
	} else if !result.changed {
		format!("{} unchanged", target.display())
	} else {
		format!("Dry run, {} not written", target.display())
	});

	lines
}

fn handle_rules_show(cli: &Cli) -> Result<ExitCode> {
	let source = RuleSource::load(cli.rules.as_deref(), cli.builtin)?;
	let rules = source.compile()?;

	println!("# Source: {}", source.describe());
	if let Some(target) = source.target() {
		println!("# target: {}", target.display());
	}
	println!("# strict: {}", source.strict());
	println!("# rules: {}", rules.len());
	println!();

	for (i, rule) in rules.iter().enumerate() {
		println!("  Rule {}: {}", i + 1, rule.name);
		println!("    {}", rule.matcher.describe());
		let occurrences = match rule.occurrences {
			Occurrences::First => "first",
			Occurrences::All => "all",
		};
		println!("    occurrences: {occurrences}");
		if rule.required {
			println!("    required: true");
		}
		println!(
			"    replacement: {} lines, {} bytes",
			rule.replacement.lines().count(),
			rule.replacement.len()
		);
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_rules_validate(cli: &Cli) -> Result<ExitCode> {
	let checked = RuleSource::load(cli.rules.as_deref(), cli.builtin)
		.and_then(|source| source.compile().map(|rules| (source, rules)));

	match checked {
		Ok((source, rules)) => {
			println!("All rules are valid:");
			println!("  {} ({} rules)", source.describe(), rules.len());
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Rules error: {e:?}");
			Ok(ExitCode::FAILURE)
		}
	}
}
