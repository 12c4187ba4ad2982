//! Command implementations.

use std::fmt::Display;
use std::io::Read;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::{OwoColorize, Stream, Style};
use textlens_core::config::{KeywordConfig, clamp_word_length};
use textlens_core::{Granularity, KeywordOptions};

pub mod analyze;
pub mod info;
pub mod keywords;
pub mod readability;
pub mod schema;
pub mod stats;

/// Path that means "read from stdin".
pub const STDIN_PATH: &str = "-";

/// Keyword options shared by `analyze` and `keywords`.
///
/// Each flag overrides the matching `[keywords]` config value.
#[derive(Args, Debug, Default, Clone)]
pub struct KeywordArgs {
    /// Entries to keep per table.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Treat differently-cased words as different terms.
    #[arg(long, overrides_with = "no_case_sensitive")]
    pub case_sensitive: bool,

    /// Fold case even when the config enables case sensitivity.
    #[arg(long, overrides_with = "case_sensitive")]
    pub no_case_sensitive: bool,

    /// Ignore words shorter than N characters (negative means 0).
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub min_length: Option<i64>,

    /// Extra stop words (comma-separated).
    #[arg(long, value_delimiter = ',', value_name = "WORDS")]
    pub stop_words: Vec<String>,

    /// Which phrase tables to build.
    #[arg(long, value_enum)]
    pub granularity: Option<Granularity>,
}

impl KeywordArgs {
    /// Merge these flags over the configured defaults.
    pub fn resolve(&self, config: &KeywordConfig) -> KeywordOptions {
        let mut merged = config.clone();
        if self.case_sensitive {
            merged.case_sensitive = true;
        } else if self.no_case_sensitive {
            merged.case_sensitive = false;
        }
        if let Some(min) = self.min_length {
            merged.min_word_length = clamp_word_length(min);
        }
        if let Some(granularity) = self.granularity {
            merged.granularity = granularity;
        }
        if let Some(top) = self.top {
            merged.top_n = top;
        }
        merged.stop_words.extend(self.stop_words.iter().cloned());
        merged.to_options()
    }
}

/// Read a file (or stdin for `-`) and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    if path.as_str() == STDIN_PATH {
        return read_stdin(max_bytes);
    }

    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    let mut stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            // One byte past the limit is enough to know it was exceeded.
            let cap = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            stdin
                .take(cap)
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            if content.len() > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            stdin
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
        }
    }
    Ok(content)
}

/// Render `text` with `style` when stdout takes color.
///
/// Honors `--color` through the `owo_colors` override; without one, color
/// follows terminal detection.
pub fn paint(text: impl Display, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.style(style)).to_string()
}

/// Dimmed field label.
pub fn label(text: &str) -> String {
    paint(text, Style::new().dimmed())
}

/// Display name for an input path.
pub fn display_name(path: &Utf8Path) -> &str {
    if path.as_str() == STDIN_PATH {
        "<stdin>"
    } else {
        path.as_str()
    }
}
