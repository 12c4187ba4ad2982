//! Keyword and phrase frequency (unigrams, bigrams, trigrams).
//!
//! Unlike [`tokenizer`](crate::tokenizer), this pass throws punctuation
//! away: every run of characters that are not letters, digits, or
//! whitespace becomes a single space before splitting. Filtering by length
//! and stop words happens before phrases are built, so stop words never
//! appear inside a bigram or trigram either.
//!
//! Ranking is a stable sort on count, so equal counts keep the order in
//! which the terms first appeared in the text.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::word_lists::STOP_WORDS;

/// Default number of entries kept per table.
pub const DEFAULT_TOP_N: usize = 10;

/// Anything that is not a letter, digit, or whitespace.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s]+").expect("valid regex"));

/// Which n-gram tables to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Granularity {
    /// Single words only.
    Unigram,
    /// Two-word phrases only.
    Bigram,
    /// Three-word phrases only.
    Trigram,
    /// All three tables.
    #[default]
    All,
}

impl Granularity {
    /// Returns the granularity as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unigram => "unigram",
            Self::Bigram => "bigram",
            Self::Trigram => "trigram",
            Self::All => "all",
        }
    }

    const fn includes(self, n: usize) -> bool {
        match self {
            Self::Unigram => n == 1,
            Self::Bigram => n == 2,
            Self::Trigram => n == 3,
            Self::All => true,
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of words excluded from keyword analysis.
///
/// Entries are stored lowercased and trimmed, so adding `"The"` and
/// `" the "` yields one entry. Lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    /// The built-in English stop-word list.
    pub fn english() -> Self {
        Self(STOP_WORDS.iter().map(|w| (*w).to_string()).collect())
    }

    /// An empty list (nothing is filtered).
    pub fn none() -> Self {
        Self(HashSet::new())
    }

    /// Add words to the list.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() {
                self.0.insert(word);
            }
        }
    }

    /// Whether `word` is a stop word, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        if self.0.contains(word) {
            return true;
        }
        word.chars().any(char::is_uppercase) && self.0.contains(&word.to_lowercase())
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut words = Self::none();
        words.extend(iter);
        words
    }
}

/// Options for [`compute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordOptions {
    /// Treat `Rust` and `rust` as different terms. Default: `false`.
    pub case_sensitive: bool,
    /// Drop words shorter than this many characters. Default: 1.
    pub min_word_length: usize,
    /// Words excluded before counting. Default: [`StopWords::english`].
    pub stop_words: StopWords,
    /// Which tables to build. Default: [`Granularity::All`].
    pub granularity: Granularity,
    /// Entries kept per table. Default: [`DEFAULT_TOP_N`].
    pub top_n: usize,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            min_word_length: 1,
            stop_words: StopWords::english(),
            granularity: Granularity::All,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl KeywordOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set case sensitivity.
    pub const fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set the minimum word length in characters.
    pub const fn with_min_word_length(mut self, min: usize) -> Self {
        self.min_word_length = min;
        self
    }

    /// Add stop words on top of the current list.
    pub fn with_extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words.extend(words);
        self
    }

    /// Replace the stop-word list.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Set which tables to build.
    pub const fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set how many entries each table keeps.
    pub const fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// One ranked term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordFrequencyEntry {
    /// One to three words joined by single spaces.
    pub term: String,
    /// Occurrences in the filtered word stream.
    pub count: usize,
    /// Share of all positions of this n-gram size, as a percentage (2 decimals).
    pub density_percent: f64,
}

/// Ranked unigram, bigram, and trigram tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordFrequencyTable {
    /// Most frequent single words.
    pub unigrams: Vec<KeywordFrequencyEntry>,
    /// Most frequent two-word phrases (each seen at least twice).
    pub bigrams: Vec<KeywordFrequencyEntry>,
    /// Most frequent three-word phrases (each seen at least twice).
    pub trigrams: Vec<KeywordFrequencyEntry>,
    /// Words remaining after filtering; the unigram density denominator.
    pub total_words: usize,
    /// Distinct words remaining after filtering.
    pub unique_words: usize,
}

/// Untruncated term counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NgramFrequencies {
    /// Every filtered word with its count.
    pub unigrams: Vec<(String, usize)>,
    /// Every adjacent word pair with its count.
    pub bigrams: Vec<(String, usize)>,
    /// Every adjacent word triple with its count.
    pub trigrams: Vec<(String, usize)>,
    /// Length of the filtered word stream.
    pub total_words: usize,
    /// Distinct words in the filtered word stream.
    pub unique_words: usize,
}

/// Count terms while remembering first-seen order.
#[derive(Debug, Default)]
struct TermCounter {
    index: HashMap<String, usize>,
    terms: Vec<(String, usize)>,
}

impl TermCounter {
    fn add(&mut self, term: String) {
        if let Some(&i) = self.index.get(&term) {
            self.terms[i].1 += 1;
        } else {
            self.index.insert(term.clone(), self.terms.len());
            self.terms.push((term, 1));
        }
    }

    fn into_terms(self) -> Vec<(String, usize)> {
        self.terms
    }
}

/// Build ranked keyword tables for `text`.
#[tracing::instrument(skip(text, options), fields(text_len = text.len(), granularity = %options.granularity))]
pub fn compute(text: &str, options: &KeywordOptions) -> KeywordFrequencyTable {
    let freq = frequencies(text, options);
    let total = freq.total_words;
    if total == 0 {
        return KeywordFrequencyTable::default();
    }

    let unique_words = freq.unique_words;
    let top_n = options.top_n;

    KeywordFrequencyTable {
        unigrams: rank(freq.unigrams, total, 1, top_n),
        bigrams: rank(freq.bigrams, total.saturating_sub(1), 2, top_n),
        trigrams: rank(freq.trigrams, total.saturating_sub(2), 2, top_n),
        total_words: total,
        unique_words,
    }
}

/// Count every unigram, bigram, and trigram in one pass, without ranking
/// or truncation.
///
/// Tables excluded by `options.granularity` are left empty.
pub fn frequencies(text: &str, options: &KeywordOptions) -> NgramFrequencies {
    let words = filtered_words(text, options);
    let granularity = options.granularity;

    let mut unigrams = TermCounter::default();
    let mut bigrams = TermCounter::default();
    let mut trigrams = TermCounter::default();

    for (i, word) in words.iter().enumerate() {
        if granularity.includes(1) {
            unigrams.add(word.clone());
        }
        if granularity.includes(2) && i + 1 < words.len() {
            bigrams.add(words[i..i + 2].join(" "));
        }
        if granularity.includes(3) && i + 2 < words.len() {
            trigrams.add(words[i..i + 3].join(" "));
        }
    }

    NgramFrequencies {
        unigrams: unigrams.into_terms(),
        bigrams: bigrams.into_terms(),
        trigrams: trigrams.into_terms(),
        total_words: words.len(),
        unique_words: words.iter().collect::<HashSet<_>>().len(),
    }
}

/// Normalize case, strip punctuation, and apply length and stop-word filters.
fn filtered_words(text: &str, options: &KeywordOptions) -> Vec<String> {
    let cased = if options.case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    };
    let cleaned = NON_WORD.replace_all(&cased, " ");

    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() >= options.min_word_length)
        .filter(|w| !options.stop_words.contains(w))
        .map(str::to_string)
        .collect()
}

fn rank(
    terms: Vec<(String, usize)>,
    positions: usize,
    min_count: usize,
    top_n: usize,
) -> Vec<KeywordFrequencyEntry> {
    if positions == 0 {
        return Vec::new();
    }

    let mut entries: Vec<KeywordFrequencyEntry> = terms
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(term, count)| KeywordFrequencyEntry {
            term,
            count,
            density_percent: round2(count as f64 / positions as f64 * 100.0),
        })
        .collect();

    // Stable: equal counts stay in first-seen order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(top_n);
    entries
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog. The quick brown fox!";

    fn terms(entries: &[KeywordFrequencyEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.term.as_str()).collect()
    }

    #[test]
    fn unigrams_ranked_with_first_seen_ties() {
        let table = compute(FOX, &KeywordOptions::default());
        assert_eq!(table.total_words, 9);
        assert_eq!(table.unique_words, 6);
        assert_eq!(
            terms(&table.unigrams),
            vec!["quick", "brown", "fox", "jumps", "lazy", "dog"]
        );
        assert_eq!(table.unigrams[0].count, 2);
        assert!((table.unigrams[0].density_percent - 22.22).abs() < 1e-9);
    }

    #[test]
    fn phrases_drop_singletons() {
        let table = compute(FOX, &KeywordOptions::default());
        assert_eq!(terms(&table.bigrams), vec!["quick brown", "brown fox"]);
        assert!((table.bigrams[0].density_percent - 25.0).abs() < 1e-9);
        assert_eq!(terms(&table.trigrams), vec!["quick brown fox"]);
        assert!((table.trigrams[0].density_percent - 28.57).abs() < 1e-9);
    }

    #[test]
    fn stop_words_excluded_from_phrases() {
        let table = compute(FOX, &KeywordOptions::default());
        let all = table
            .unigrams
            .iter()
            .chain(&table.bigrams)
            .chain(&table.trigrams);
        for entry in all {
            assert!(!entry.term.split(' ').any(|w| w == "the" || w == "over"));
        }
    }

    #[test]
    fn case_insensitive_by_default() {
        let options = KeywordOptions::default().with_stop_words(StopWords::none());
        let table = compute("Apple apple APPLE", &options);
        assert_eq!(table.unigrams.len(), 1);
        assert_eq!(table.unigrams[0].term, "apple");
        assert_eq!(table.unigrams[0].count, 3);
    }

    #[test]
    fn case_sensitive_keeps_variants_apart() {
        let options = KeywordOptions::default()
            .with_stop_words(StopWords::none())
            .with_case_sensitive(true);
        let table = compute("Apple apple APPLE", &options);
        assert_eq!(terms(&table.unigrams), vec!["Apple", "apple", "APPLE"]);
    }

    #[test]
    fn stop_words_apply_regardless_of_case() {
        let options = KeywordOptions::default().with_case_sensitive(true);
        let table = compute("The cat and THE hat", &options);
        assert_eq!(terms(&table.unigrams), vec!["cat", "hat"]);
    }

    #[test]
    fn min_word_length_filters_short_words() {
        let options = KeywordOptions::default().with_min_word_length(4);
        let table = compute(FOX, &options);
        assert_eq!(terms(&table.unigrams), vec!["quick", "brown", "jumps", "lazy"]);
    }

    #[test]
    fn extra_stop_words_extend_defaults() {
        let options = KeywordOptions::default().with_extra_stop_words(["Quick", " fox "]);
        let table = compute(FOX, &options);
        assert_eq!(terms(&table.unigrams), vec!["brown", "jumps", "lazy", "dog"]);
    }

    #[test]
    fn stop_words_dedupe() {
        let words: StopWords = ["the", "The", " THE", "a"].into_iter().collect();
        assert_eq!(words.len(), 2);
        assert!(words.contains("The"));
    }

    #[test]
    fn unicode_letters_and_digits_kept() {
        let options = KeywordOptions::default().with_stop_words(StopWords::none());
        let table = compute("naïve café, naïve! 2024 report: 2024.", &options);
        assert_eq!(table.unigrams[0].term, "naïve");
        assert_eq!(table.unigrams[0].count, 2);
        assert_eq!(table.unigrams[1].term, "2024");
        assert_eq!(table.unigrams[1].count, 2);
    }

    #[test]
    fn punctuation_splits_words() {
        let options = KeywordOptions::default().with_stop_words(StopWords::none());
        let freq = frequencies("state-of-the-art", &options);
        assert_eq!(freq.total_words, 4);
    }

    #[test]
    fn top_n_truncates() {
        let text = (0..20).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        let table = compute(&text, &KeywordOptions::default().with_top_n(5));
        assert_eq!(table.unigrams.len(), 5);
        assert_eq!(table.unique_words, 20);
        assert_eq!(table.unigrams[0].term, "word0");

        let table = compute(&text, &KeywordOptions::default().with_top_n(0));
        assert!(table.unigrams.is_empty());
    }

    #[test]
    fn granularity_limits_tables() {
        let options = KeywordOptions::default().with_granularity(Granularity::Bigram);
        let table = compute(FOX, &options);
        assert!(table.unigrams.is_empty());
        assert!(!table.bigrams.is_empty());
        assert!(table.trigrams.is_empty());
        assert_eq!(table.total_words, 9);
        assert_eq!(table.unique_words, 6);
    }

    #[test]
    fn empty_and_fully_filtered_inputs() {
        assert_eq!(
            compute("", &KeywordOptions::default()),
            KeywordFrequencyTable::default()
        );
        assert_eq!(
            compute("the and of, to!", &KeywordOptions::default()),
            KeywordFrequencyTable::default()
        );
        assert_eq!(
            compute("!!! ???", &KeywordOptions::default()),
            KeywordFrequencyTable::default()
        );
    }

    #[test]
    fn unigram_counts_sum_to_total() {
        let text = "Rust makes systems programming safe. Safe systems, fast systems, \
                    and programming that stays fun. Rust rust RUST.";
        let options = KeywordOptions::default().with_top_n(2);
        let freq = frequencies(text, &options);
        let sum: usize = freq.unigrams.iter().map(|(_, c)| c).sum();
        assert_eq!(sum, freq.total_words);
        assert_eq!(compute(text, &options).total_words, freq.total_words);
    }

    #[test]
    fn single_word_has_no_phrases() {
        let table = compute("solitude", &KeywordOptions::default());
        assert_eq!(table.unigrams.len(), 1);
        assert!((table.unigrams[0].density_percent - 100.0).abs() < 1e-9);
        assert!(table.bigrams.is_empty());
        assert!(table.trigrams.is_empty());
    }
}
