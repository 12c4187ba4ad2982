//! Analyze command: statistics, readability, and keywords in one pass.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::Style;
use serde::Serialize;
use tracing::{debug, instrument};

use textlens_core::config::Config;
use textlens_core::{AnalysisCache, AnalysisResult};

use super::keywords::print_table;
use super::readability::print_metrics;
use super::{KeywordArgs, display_name, paint, read_input_file};

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Files to analyze (`-` for stdin). Identical contents are analyzed once.
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<Utf8PathBuf>,

    /// Keyword options.
    #[command(flatten)]
    pub keywords: KeywordArgs,
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    analysis: &'a AnalysisResult,
}

/// Run full analysis on one or more inputs.
///
/// JSON output is a single [`AnalysisResult`] for one input and an array of
/// `{ "file": ..., <result fields> }` objects for several.
#[instrument(name = "cmd_analyze", skip_all, fields(inputs = args.inputs.len()))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(inputs = ?args.inputs, flags = ?args.keywords, "executing analyze command");

    let options = args.keywords.resolve(&config.keywords);
    let mut cache: AnalysisCache = config.cache.build(options);

    let mut results = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let content = read_input_file(input, max_input_bytes)?;
        results.push((input, cache.get_or_compute(&content)));
    }
    let stats = cache.stats();
    debug!(
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        "analysis cache"
    );

    if global_json {
        if let [(_, only)] = results.as_slice() {
            println!("{}", serde_json::to_string_pretty(&only.analysis)?);
        } else {
            let reports: Vec<_> = results
                .iter()
                .map(|(input, cached)| FileReport {
                    file: display_name(input),
                    analysis: &cached.analysis,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        return Ok(());
    }

    for (i, (input, cached)) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_report(display_name(input), &cached.analysis);
    }

    Ok(())
}

fn print_report(name: &str, analysis: &AnalysisResult) {
    let stats = &analysis.statistics;
    println!("{}", paint(name, Style::new().bold()));
    println!(
        "\n  {} {} words, {} sentences, {} paragraphs, {} characters",
        paint("Statistics:", Style::new().cyan()),
        stats.word_count,
        stats.sentence_count,
        stats.paragraph_count,
        stats.character_count,
    );

    println!("\n  {}", paint("Readability:", Style::new().cyan()));
    print_metrics(&analysis.readability, "    ");

    println!("\n  {}", paint("Keywords:", Style::new().cyan()));
    print_table(&analysis.keywords, "    ");
}
