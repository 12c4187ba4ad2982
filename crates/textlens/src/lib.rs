//! Library interface for the `textlens` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//!
//! # Documentation Generation
//!
//! The [`command()`] function returns the clap `Command` for generating man pages
//! and shell completions.

pub mod commands;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, textlens=trace)
    TEXTLENS_LOG_PATH      Explicit log file path
    TEXTLENS_LOG_DIR       Log directory
    TEXTLENS_<KEY>         Override any config key (nested: TEXTLENS_KEYWORDS__TOP_N=20)
";

/// Command-line interface definition for textlens.
#[derive(Parser)]
#[command(name = "textlens")]
#[command(
    about = "Text statistics, readability scoring, and keyword frequency analysis",
    long_about = None
)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Run statistics, readability, and keyword analysis
    Analyze(commands::analyze::AnalyzeArgs),

    /// Count words, characters, sentences, and paragraphs
    Stats(commands::stats::StatsArgs),

    /// Score readability (Flesch, Flesch-Kincaid, Fog, SMOG, Coleman-Liau, ARI)
    Readability(commands::readability::ReadabilityArgs),

    /// Rank keywords and recurring phrases
    Keywords(commands::keywords::KeywordsArgs),

    /// Print the JSON Schema of the analysis output
    Schema(commands::schema::SchemaArgs),

    /// Show package information
    Info(commands::info::InfoArgs),
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn analyze_accepts_multiple_inputs() {
        let cli = Cli::try_parse_from(["textlens", "analyze", "a.txt", "-", "--top", "3"]).unwrap();
        let Some(Commands::Analyze(args)) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.inputs.len(), 2);
        assert_eq!(args.keywords.top, Some(3));
    }

    #[test]
    fn keywords_parses_stop_word_list() {
        let cli = Cli::try_parse_from([
            "textlens",
            "keywords",
            "notes.txt",
            "--stop-words",
            "lorem,ipsum",
            "--granularity",
            "bigram",
        ])
        .unwrap();
        let Some(Commands::Keywords(args)) = cli.command else {
            panic!("expected keywords");
        };
        assert_eq!(args.keywords.stop_words, vec!["lorem", "ipsum"]);
        assert_eq!(
            args.keywords.granularity,
            Some(textlens_core::Granularity::Bigram)
        );
    }

    #[test]
    fn keyword_flags_accept_negative_length_and_case_override() {
        let cli = Cli::try_parse_from([
            "textlens",
            "keywords",
            "notes.txt",
            "--min-length",
            "-2",
            "--case-sensitive",
            "--no-case-sensitive",
        ])
        .unwrap();
        let Some(Commands::Keywords(args)) = cli.command else {
            panic!("expected keywords");
        };
        assert_eq!(args.keywords.min_length, Some(-2));
        assert!(!args.keywords.case_sensitive);
        assert!(args.keywords.no_case_sensitive);
    }
}
