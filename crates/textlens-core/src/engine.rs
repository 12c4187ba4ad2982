//! Full analysis of one text: statistics, readability, and keywords.
//!
//! Each calculator tokenizes the text on its own. Use
//! [`AnalysisCache`](crate::cache::AnalysisCache) to avoid recomputing when
//! the same text arrives repeatedly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::keywords::{self, KeywordFrequencyTable, KeywordOptions};
use crate::readability::{self, ReadabilityMetrics};
use crate::statistics::{self, TextStatistics};

/// Combined output of every calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    /// Counts and word-level summaries.
    pub statistics: TextStatistics,
    /// Readability indices.
    pub readability: ReadabilityMetrics,
    /// Keyword and phrase frequency tables.
    pub keywords: KeywordFrequencyTable,
}

/// Run every calculator over `text` without caching.
#[tracing::instrument(skip(text, options), fields(text_len = text.len()))]
pub fn analyze(text: &str, options: &KeywordOptions) -> AnalysisResult {
    AnalysisResult {
        statistics: statistics::compute(text),
        readability: readability::compute(text),
        keywords: keywords::compute(text, options),
    }
}
