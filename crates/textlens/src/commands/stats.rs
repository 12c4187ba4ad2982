//! Stats command: word, character, sentence, and paragraph counts.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::Style;
use tracing::{debug, instrument};

use textlens_core::statistics;

use super::{display_name, label, paint, read_input_file};

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,
}

/// Print basic statistics for a file.
#[instrument(name = "cmd_stats", skip_all, fields(file = %args.file))]
pub fn cmd_stats(
    args: StatsArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing stats command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let stats = statistics::compute(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", paint(display_name(&args.file), Style::new().bold()));
    println!("  {}: {}", label("Words"), stats.word_count);
    println!("  {}: {}", label("Unique words"), stats.unique_word_count);
    println!(
        "  {}: {} ({} without spaces)",
        label("Characters"),
        stats.character_count,
        stats.character_count_no_spaces,
    );
    println!("  {}: {}", label("Sentences"), stats.sentence_count);
    println!("  {}: {}", label("Paragraphs"), stats.paragraph_count);
    println!(
        "  {}: {:.1}",
        label("Average word length"),
        stats.average_word_length
    );
    if stats.word_count > 0 {
        println!(
            "  {}: {} / {}",
            label("Longest / shortest"),
            paint(&stats.longest_word, Style::new().cyan()),
            paint(&stats.shortest_word, Style::new().cyan()),
        );
    }

    Ok(())
}
