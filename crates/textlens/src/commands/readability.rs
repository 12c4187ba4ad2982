//! Readability command: all six indices plus reading time.

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::Style;
use tracing::{debug, instrument};

use textlens_core::readability::{self, ReadabilityMetrics, ReadingLevel};

use super::{display_name, label, paint, read_input_file};

/// Arguments for the `readability` subcommand.
#[derive(Args, Debug)]
pub struct ReadabilityArgs {
    /// File to analyze (`-` for stdin).
    pub file: Utf8PathBuf,

    /// Fail when the Flesch-Kincaid grade exceeds this level.
    #[arg(long)]
    pub max_grade: Option<f64>,
}

/// Score readability of a file.
#[instrument(name = "cmd_readability", skip_all, fields(file = %args.file))]
pub fn cmd_readability(
    args: ReadabilityArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, max_grade = ?args.max_grade, "executing readability command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let metrics = readability::compute(&content);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        println!("{}", paint(display_name(&args.file), Style::new().bold()));
        print_metrics(&metrics, "  ");
    }

    if let Some(max) = args.max_grade
        && metrics.flesch_kincaid_grade > max
    {
        bail!(
            "{} scores grade {:.1} (max: {:.1}). Simplify sentences or reduce jargon.",
            display_name(&args.file),
            metrics.flesch_kincaid_grade,
            max,
        );
    }

    Ok(())
}

/// Print metrics as indented lines; shared with `analyze`.
pub fn print_metrics(metrics: &ReadabilityMetrics, indent: &str) {
    let level_style = match metrics.level {
        ReadingLevel::VeryEasy | ReadingLevel::Easy | ReadingLevel::FairlyEasy => {
            Style::new().green()
        }
        ReadingLevel::Standard | ReadingLevel::FairlyDifficult => Style::new().yellow(),
        ReadingLevel::Difficult | ReadingLevel::VeryDifficult => Style::new().red(),
        ReadingLevel::Unknown => Style::new().dimmed(),
    };
    let level = paint(metrics.level.label(), level_style);
    println!(
        "{indent}{}: {:.1} ({level})",
        label("Flesch reading ease"),
        metrics.flesch_reading_ease,
    );
    println!(
        "{indent}{}: {:.1}",
        label("Flesch-Kincaid grade"),
        metrics.flesch_kincaid_grade
    );
    println!("{indent}{}: {:.1}", label("Gunning fog"), metrics.gunning_fog);
    match metrics.smog_index {
        Some(smog) => println!("{indent}{}: {smog:.1}", label("SMOG")),
        None => println!(
            "{indent}{}: {}",
            label("SMOG"),
            paint(
                format!("(needs {} sentences)", readability::SMOG_MIN_SENTENCES),
                Style::new().dimmed()
            )
        ),
    }
    println!("{indent}{}: {:.1}", label("Coleman-Liau"), metrics.coleman_liau);
    println!(
        "{indent}{}: {:.1}",
        label("Automated readability"),
        metrics.automated_readability_index
    );
    println!(
        "{indent}{}: {} min reading, {} min speaking",
        label("Time"),
        metrics.reading_time_minutes,
        metrics.speaking_time_minutes,
    );
}
