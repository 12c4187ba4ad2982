//! Heuristic syllable estimation.
//!
//! This is not dictionary-backed. It strips silent endings and counts vowel
//! groups, which is consistent and fast but wrong for plenty of irregular
//! English words ("boxes" counts as one syllable, "complicated" as three).
//! Readability formulas only need a stable approximation, so those misses
//! are expected behavior.
//!
//! Results are memoized per normalized word. The shared memo behind
//! [`estimate`] lives for the whole process and only grows; hosts that
//! analyze unbounded vocabularies can hold their own [`SyllableEstimator`]
//! instead and drop it at the end of a session.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

use regex::Regex;

/// Silent trailing patterns: consonant + "es", "ed", or consonant + "e".
static SILENT_ENDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").expect("valid regex"));

/// Vowel groups; each maximal run counts as one syllable.
static VOWEL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[aeiouy]+").expect("valid regex"));

/// Process-wide memo used by [`estimate`].
static SHARED: LazyLock<SyllableEstimator> = LazyLock::new(SyllableEstimator::new);

/// Estimate the syllables in `word` using the process-wide memo.
///
/// Always returns at least 1.
pub fn estimate(word: &str) -> usize {
    SHARED.estimate(word)
}

/// Sum of estimated syllables over every whitespace-separated token in `text`.
pub fn count_syllables(text: &str) -> usize {
    text.split_whitespace().map(estimate).sum()
}

/// Syllable estimator with its own memo table.
#[derive(Debug, Default)]
pub struct SyllableEstimator {
    memo: Mutex<HashMap<String, usize>>,
}

impl SyllableEstimator {
    /// Create an estimator with an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate the syllables in `word`, consulting the memo first.
    pub fn estimate(&self, word: &str) -> usize {
        let key = normalize(word);

        let mut memo = self.memo.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(&count) = memo.get(&key) {
            return count;
        }

        let count = estimate_uncached(&key);
        memo.insert(key, count);
        count
    }

    /// Number of distinct normalized words in the memo.
    pub fn cached_words(&self) -> usize {
        self.memo.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Lowercase and drop everything that is not a letter.
fn normalize(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Estimate syllables for an already-normalized word.
fn estimate_uncached(word: &str) -> usize {
    if word.chars().count() <= 3 {
        return 1;
    }

    let without_ending = SILENT_ENDING.replace(word, "");
    let stem = without_ending
        .strip_prefix('y')
        .unwrap_or(without_ending.as_ref());

    VOWEL_RUN.find_iter(stem).count().max(1)
}
