//! Keywords command: ranked unigrams, bigrams, and trigrams.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::Style;
use tracing::{debug, instrument};

use textlens_core::config::KeywordConfig;
use textlens_core::keywords::{self, KeywordFrequencyEntry, KeywordFrequencyTable};

use super::{KeywordArgs, display_name, label, paint, read_input_file};

/// Arguments for the `keywords` subcommand.
#[derive(Args, Debug)]
pub struct KeywordsArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Keyword options.
    #[command(flatten)]
    pub keywords: KeywordArgs,
}

/// Print keyword frequency tables for a file.
#[instrument(name = "cmd_keywords", skip_all, fields(file = %args.file))]
pub fn cmd_keywords(
    args: KeywordsArgs,
    global_json: bool,
    config: &KeywordConfig,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, flags = ?args.keywords, "executing keywords command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let options = args.keywords.resolve(config);
    let table = keywords::compute(&content, &options);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("{}", paint(display_name(&args.file), Style::new().bold()));
    print_table(&table, "  ");
    Ok(())
}

/// Print each non-empty table; shared with `analyze`.
pub fn print_table(table: &KeywordFrequencyTable, indent: &str) {
    println!(
        "{indent}{}: {} counted, {} distinct",
        label("Words"),
        table.total_words,
        table.unique_words,
    );
    print_entries("Keywords", &table.unigrams, indent);
    print_entries("Two-word phrases", &table.bigrams, indent);
    print_entries("Three-word phrases", &table.trigrams, indent);
}

fn print_entries(title: &str, entries: &[KeywordFrequencyEntry], indent: &str) {
    if entries.is_empty() {
        return;
    }
    println!("{indent}{}", paint(title, Style::new().cyan()));
    let width = entries
        .iter()
        .map(|e| e.term.chars().count())
        .max()
        .unwrap_or(0);
    for entry in entries {
        println!(
            "{indent}  {:<width$}  {:>4}  {:>6.2}%",
            entry.term, entry.count, entry.density_percent,
        );
    }
}
