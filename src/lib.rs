//! charter: compile a project vision into a PR constitution.
//!
//! **charter turns a semi-structured vision document into a deterministic rules
//! file that pull-request review tooling gates merges against.**
//!
//! The vision stays the source of truth. The constitution is derived output:
//! regenerate it whenever the vision changes and commit the diff.
//!
//! # Pipeline
//!
//! - **Section extraction**: find "Guiding Principles" and "Constraints"
//!   sections by heading synonyms
//! - **Principle parsing**: ordered, named principles (list order is priority)
//! - **Constraint classification**: explicit keyword table mapping to
//!   device / performance / storage / other requirements
//! - **Assembly**: principles + requirements + fixed quality, security and
//!   architecture blocks + metadata
//! - **Writing**: atomic whole-file replacement, or dry-run rendering
//!
//! # Guarantees
//!
//! - **Deterministic**: same vision bytes, same constitution (except
//!   `metadata.generated_at`)
//! - **Absence is data**: missing sections give empty lists, never errors
//! - **No partial writes**: a failed write leaves the previous file intact
//!
//! # Examples
//!
//! ```bash
//! # Preview without writing
//! charter --dry-run
//!
//! # Write to a custom location from another checkout
//! charter generate --repo-root ../app -o .github/agents/constitution.yaml
//!
//! # See what was extracted
//! charter inspect --format json
//! ```
//!
//! # Crate Structure
//!
//! - [`vision`]: reading side (sections, principles, constraints, domain)
//! - [`constitution`]: output schema, rule catalog, assembly, writer
//! - [`generator`]: the end-to-end pipeline
//! - [`core`]: config, errors, output and time helpers

pub mod constitution;
pub mod core;
pub mod generator;
pub mod vision;

use crate::constitution::{Emitted, Format};
use crate::core::{error, output, output::Channel};
use crate::generator::{GenerateOptions, Generator};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const CHARTER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter (e.g. `CHARTER_LOG=debug`).
pub const LOG_ENV: &str = "CHARTER_LOG";

#[derive(Parser, Debug)]
#[clap(
    name = "charter",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compile a project vision into a PR merge constitution",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Debug logging on stderr (overrides CHARTER_LOG).
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Option<Command>,

    #[clap(flatten)]
    generate: GenerateCli,
}

#[derive(clap::Args, Debug, Default)]
struct GenerateCli {
    /// Repository root (defaults to current working directory).
    #[clap(long)]
    repo_root: Option<PathBuf>,
    /// Vision document; relative paths resolve against the repo root.
    /// Defaults to discovery: docs/product/vision.md, docs/vision.md, VISION.md, README.md.
    #[clap(long)]
    vision: Option<PathBuf>,
    /// Output path (default: .github/agents/pr-merge-constitution.yaml).
    /// An existing file is REPLACED, never merged.
    #[clap(short, long)]
    output: Option<PathBuf>,
    /// Serialization format.
    #[clap(long, value_enum, default_value = "yaml")]
    format: Format,
    /// Render to stdout without writing anything.
    #[clap(long)]
    dry_run: bool,
}

#[derive(clap::Args, Debug)]
struct InspectCli {
    /// Repository root (defaults to current working directory).
    #[clap(long)]
    repo_root: Option<PathBuf>,
    /// Vision document; relative paths resolve against the repo root.
    #[clap(long)]
    vision: Option<PathBuf>,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text", value_parser = ["text", "json"])]
    format: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the constitution (default when no subcommand is given)
    #[clap(name = "generate", visible_alias = "g")]
    Generate(GenerateCli),

    /// Show what the vision yields without assembling or writing
    #[clap(name = "inspect", visible_alias = "i")]
    Inspect(InspectCli),

    /// Show version information
    #[clap(name = "version")]
    Version,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("charter=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_repo_root(repo_root: Option<PathBuf>) -> Result<PathBuf, error::CharterError> {
    let raw = match repo_root {
        Some(d) => d,
        None => std::env::current_dir()?,
    };
    Ok(std::fs::canonicalize(&raw).unwrap_or(raw))
}

pub fn run() -> Result<(), error::CharterError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Command::Generate(args)) => run_generate(args),
        Some(Command::Inspect(args)) => run_inspect(args),
        Some(Command::Version) => {
            // Version command - simple output for scripts/parsing
            println!("v{}", CHARTER_VERSION);
            Ok(())
        }
        None => run_generate(cli.generate),
    }
}

fn run_generate(args: GenerateCli) -> Result<(), error::CharterError> {
    use colored::Colorize;

    let repo_root = resolve_repo_root(args.repo_root)?;
    let generator = Generator::from_repo(&repo_root)?;
    let opts = GenerateOptions {
        vision: args.vision,
        output: args.output,
        format: args.format,
        dry_run: args.dry_run,
    };
    // stdout carries the rendered document in dry-run mode
    let ch = if opts.dry_run {
        Channel::Stderr
    } else {
        Channel::Stdout
    };

    output::step(ch, "Interpreting project vision...");
    let target = generator.output_path(opts.output.as_deref());
    if !opts.dry_run && target.exists() {
        output::warn(
            ch,
            &format!(
                "Existing constitution at {} will be replaced (regeneration does not merge edits)",
                target.display()
            ),
        );
    }

    let report = generator.run(&opts)?;
    let findings = &report.generation.findings;
    let constitution = &report.generation.constitution;

    output::ok(ch, &format!("Vision: {}", report.vision_path.display()));
    output::ok(ch, &format!("Domain: {}", constitution.metadata.domain));

    if findings.principles_section.is_none() {
        output::info(ch, "No principles section found; core_principles is empty");
    }
    let names: Vec<String> = constitution
        .core_principles
        .iter()
        .map(|p| p.name.clone())
        .collect();
    output::ok(
        ch,
        &format!(
            "Principles: {} {}",
            names.len(),
            output::preview_messages(&names, 5, 32).bright_black()
        ),
    );
    for dup in &findings.principles.duplicates {
        output::warn(ch, &format!("Duplicate principle dropped: {}", dup));
    }

    if findings.constraints_section.is_none() {
        output::info(ch, "No constraints section found; technical_requirements is empty");
    }
    let categories: Vec<String> = constitution
        .technical_requirements
        .iter()
        .map(|r| format!("{} ({})", r.category.as_str(), r.trigger_keyword))
        .collect();
    output::ok(
        ch,
        &format!(
            "Technical requirements: {} {}",
            categories.len(),
            output::preview_messages(&categories, 4, 40).bright_black()
        ),
    );
    if findings.privacy_emphasized {
        output::ok(ch, "Privacy rule included in security_requirements");
    }

    match &report.emitted {
        Emitted::Rendered(rendered) => {
            output::info(
                ch,
                &format!(
                    "dry-run: nothing written (would write {} to {})",
                    opts.format.as_str(),
                    report.output_path.display()
                ),
            );
            print!("{}", rendered);
        }
        Emitted::Written(outcome) => {
            println!();
            println!(
                "{} Constitution saved to: {} ({} bytes)",
                "✓".bright_green(),
                outcome.path.display().to_string().bright_white().bold(),
                outcome.bytes
            );
            println!();
            println!("{}", "Next steps:".bright_white());
            println!("  1. Review the generated constitution");
            println!("  2. Change the vision, not this file, then regenerate");
            println!("  3. Run the PR validation workflow");
        }
    }
    Ok(())
}

fn run_inspect(args: InspectCli) -> Result<(), error::CharterError> {
    use colored::Colorize;

    let repo_root = resolve_repo_root(args.repo_root)?;
    let generator = Generator::from_repo(&repo_root)?;
    let doc = generator.load_vision(args.vision.as_deref())?;
    let findings = vision::analyze(&doc.content, generator.trigger_table());

    if args.format == "json" {
        let json = serde_json::json!({
            "vision": vision::discover::display_path(generator.repo_root(), &doc.path),
            "findings": findings,
        });
        let rendered = serde_json::to_string_pretty(&json)
            .map_err(|e| error::CharterError::Render(e.to_string()))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("{} {}", "Vision:".bright_white(), doc.path.display());
    println!("{} {}", "Domain:".bright_white(), findings.domain.bright_cyan());
    println!();

    for (label, section) in [
        ("Principles", &findings.principles_section),
        ("Constraints", &findings.constraints_section),
    ] {
        match section {
            Some(s) => {
                println!(
                    "{} {} {}",
                    format!("{} section:", label).bright_white(),
                    s.heading.bright_green(),
                    format!("(line {}, matched \"{}\")", s.line, s.heading_synonyms_matched)
                        .bright_black()
                );
                for line in &s.ignored_matches {
                    println!(
                        "  {} later matching heading ignored at line {}",
                        "⚠".bright_yellow(),
                        line
                    );
                }
            }
            None => println!(
                "{} {}",
                format!("{} section:", label).bright_white(),
                "not found".bright_black()
            ),
        }
    }
    println!();

    println!("{}", "Principles:".bright_white());
    for p in &findings.principles.principles {
        println!(
            "  {}. {} {}",
            p.order,
            p.name.bright_green(),
            output::compact_line(&p.description, 72).bright_black()
        );
    }
    for dup in &findings.principles.duplicates {
        println!("  {} duplicate dropped: {}", "⚠".bright_yellow(), dup);
    }

    println!("{}", "Technical requirements:".bright_white());
    for r in &findings.requirements {
        println!(
            "  {} {} {}",
            r.category.as_str().bright_cyan(),
            format!("[{}]", r.matched_keywords.join(", ")).bright_black(),
            r.derived_rule
        );
    }

    println!(
        "{} {}",
        "Privacy rule:".bright_white(),
        if findings.privacy_emphasized {
            "yes".bright_green()
        } else {
            "no".bright_black()
        }
    );
    Ok(())
}
