//! Core library for textlens.
//!
//! Text statistics, readability scoring, and keyword frequency analysis for
//! plain English text, plus the configuration layer shared with the
//! `textlens` CLI.
//!
//! # Modules
//!
//! - [`tokenizer`] - Word, sentence, and paragraph segmentation
//! - [`syllables`] - Heuristic syllable estimation
//! - [`statistics`] - Counts and word-level summaries
//! - [`readability`] - Flesch, Flesch-Kincaid, Fog, SMOG, Coleman-Liau, ARI
//! - [`keywords`] - Unigram, bigram, and trigram frequency tables
//! - [`engine`] - All of the above in one call
//! - [`cache`] - Time- and size-bounded memo of recent analyses
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use textlens_core::{KeywordOptions, analyze};
//!
//! let result = analyze(
//!     "The quick brown fox jumps over the lazy dog.",
//!     &KeywordOptions::default(),
//! );
//! assert_eq!(result.statistics.word_count, 9);
//! assert_eq!(result.keywords.unigrams[0].term, "quick");
//! ```
#![deny(unsafe_code)]

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod keywords;
pub mod readability;
pub mod statistics;
pub mod syllables;
pub mod tokenizer;
pub mod word_lists;

pub use cache::{AnalysisCache, CacheStats, CachedAnalysis, Clock, EvictionPolicy, ManualClock};
pub use config::{CacheConfig, Config, ConfigLoader, ConfigSources, KeywordConfig, LogLevel};
pub use engine::{AnalysisResult, analyze};
pub use error::{ConfigError, ConfigResult};
pub use keywords::{
    Granularity, KeywordFrequencyEntry, KeywordFrequencyTable, KeywordOptions, StopWords,
};
pub use readability::{ReadabilityMetrics, ReadingLevel};
pub use statistics::TextStatistics;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
