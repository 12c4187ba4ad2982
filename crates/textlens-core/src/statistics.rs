//! Basic text statistics: counts, average word length, extreme words.
//!
//! Character counts are in Unicode scalar values, not bytes. Word lengths
//! are measured on the raw token, so trailing punctuation counts toward
//! `"world."` being six characters long.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tokenizer;

/// Counts and word-level summaries for a text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextStatistics {
    /// Number of word tokens.
    pub word_count: usize,
    /// Number of characters, whitespace included.
    pub character_count: usize,
    /// Number of characters excluding whitespace.
    pub character_count_no_spaces: usize,
    /// Number of sentences (estimated when the text has no terminators).
    pub sentence_count: usize,
    /// Number of paragraphs.
    pub paragraph_count: usize,
    /// Case-insensitive distinct words, surrounding punctuation ignored.
    pub unique_word_count: usize,
    /// Mean token length in characters, rounded to one decimal.
    pub average_word_length: f64,
    /// Longest token (first one wins on ties).
    pub longest_word: String,
    /// Shortest token (first one wins on ties).
    pub shortest_word: String,
}

/// Compute basic statistics for `text`.
///
/// Empty or whitespace-only text yields [`TextStatistics::default()`].
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn compute(text: &str) -> TextStatistics {
    let tokens = tokenizer::tokenize(text);
    if tokens.words.is_empty() {
        return TextStatistics::default();
    }

    let character_count = text.chars().count();
    let whitespace = text.chars().filter(|c| c.is_whitespace()).count();

    let (longest, shortest, total_len) = extreme_words(&tokens.words);
    let average_word_length = round1(total_len as f64 / tokens.words.len() as f64);

    TextStatistics {
        word_count: tokens.words.len(),
        character_count,
        character_count_no_spaces: character_count - whitespace,
        sentence_count: tokens.sentence_count,
        paragraph_count: tokens.paragraph_count,
        unique_word_count: unique_words(&tokens.words),
        average_word_length,
        longest_word: longest.to_string(),
        shortest_word: shortest.to_string(),
    }
}

/// Single pass over `words` returning (longest, shortest, total length).
///
/// `words` must be non-empty.
fn extreme_words<'a>(words: &[&'a str]) -> (&'a str, &'a str, usize) {
    let first = words[0];
    let first_len = first.chars().count();

    let mut longest = (first, first_len);
    let mut shortest = (first, first_len);
    let mut total = first_len;

    for &word in &words[1..] {
        let len = word.chars().count();
        total += len;
        if len > longest.1 {
            longest = (word, len);
        }
        if len < shortest.1 {
            shortest = (word, len);
        }
    }

    (longest.0, shortest.0, total)
}

fn unique_words(words: &[&str]) -> usize {
    words
        .iter()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<HashSet<_>>()
        .len()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_scenario() {
        let stats = compute("Hello world. This is great!");
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.character_count, 27);
        assert_eq!(stats.character_count_no_spaces, 23);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.paragraph_count, 1);
        // 5 + 6 + 4 + 2 + 6 = 23 / 5
        assert!((stats.average_word_length - 4.6).abs() < f64::EPSILON);
        assert_eq!(stats.longest_word, "world.");
        assert_eq!(stats.shortest_word, "is");
    }

    #[test]
    fn empty_is_all_zero() {
        assert_eq!(compute(""), TextStatistics::default());
        assert_eq!(compute("  \n\n \t "), TextStatistics::default());
    }

    #[test]
    fn ties_keep_first_seen() {
        let stats = compute("cat dog emu fox");
        assert_eq!(stats.longest_word, "cat");
        assert_eq!(stats.shortest_word, "cat");

        let stats = compute("a bb cc d");
        assert_eq!(stats.longest_word, "bb");
        assert_eq!(stats.shortest_word, "a");
    }

    #[test]
    fn single_character() {
        let stats = compute("x");
        assert_eq!(stats.word_count, 1);
        assert_eq!(stats.character_count, 1);
        assert_eq!(stats.sentence_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.longest_word, "x");
        assert_eq!(stats.shortest_word, "x");
    }

    #[test]
    fn characters_not_bytes() {
        let stats = compute("café naïve");
        assert_eq!(stats.character_count, 10);
        assert_eq!(stats.character_count_no_spaces, 9);
        assert_eq!(stats.longest_word, "naïve");
        assert_eq!(stats.shortest_word, "café");
    }

    #[test]
    fn unique_words_ignore_case_and_punctuation() {
        let stats = compute("The cat saw the cat. THE END!");
        assert_eq!(stats.unique_word_count, 4);
    }

    #[test]
    fn word_count_zero_iff_blank() {
        for text in ["", " ", "\n\n", "a", " a ", "...", "hello\tworld"] {
            let stats = compute(text);
            assert_eq!(stats.word_count == 0, text.trim().is_empty(), "{text:?}");
        }
    }

    #[test]
    fn paragraphs_counted() {
        let stats = compute("One para here.\n\nAnother one.\n\nAnd a third.");
        assert_eq!(stats.paragraph_count, 3);
        assert_eq!(stats.sentence_count, 3);
    }
}
