//! Whitespace and punctuation tokenization.
//!
//! Splits raw text into word tokens, and counts sentences and paragraphs.
//! Word tokens keep any attached punctuation (`"world."` is one token).
//!
//! Sentence detection is deliberately naive: any run of `.`, `!` or `?`
//! ends a sentence. Text with no terminators at all (pasted lists, notes)
//! gets an estimated count of one sentence per [`WORDS_PER_ESTIMATED_SENTENCE`]
//! words so that sentence-based formulas stay defined.

use regex::Regex;
use std::sync::LazyLock;

/// Words per sentence assumed when the text has no terminators.
pub const WORDS_PER_ESTIMATED_SENTENCE: usize = 15;

/// Runs of sentence terminators.
static TERMINATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Two or more line breaks, optionally with whitespace between them.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

/// Tokenizer output for one pass over a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedText<'a> {
    /// Word tokens in order of appearance.
    pub words: Vec<&'a str>,
    /// Detected (or estimated) sentence count.
    pub sentence_count: usize,
    /// Paragraph count.
    pub paragraph_count: usize,
}

/// Tokenize `text` into words, sentences, and paragraphs.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn tokenize(text: &str) -> TokenizedText<'_> {
    let words = words(text);
    let sentence_count = count_sentences(text, words.len());
    let paragraph_count = paragraph_count(text);

    TokenizedText {
        words,
        sentence_count,
        paragraph_count,
    }
}

/// Split text into word tokens (maximal runs of non-whitespace).
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Count sentences in `text`.
///
/// Returns 0 for empty or whitespace-only text.
pub fn sentence_count(text: &str) -> usize {
    count_sentences(text, text.split_whitespace().count())
}

/// Count paragraphs (blocks separated by blank lines).
///
/// Non-blank text always has at least one paragraph.
pub fn paragraph_count(text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }

    PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count()
        .max(1)
}

fn count_sentences(text: &str, word_count: usize) -> usize {
    if word_count == 0 {
        return 0;
    }

    if has_terminator(text) {
        TERMINATOR_RUN
            .split(text)
            .filter(|s| !s.trim().is_empty())
            .count()
    } else {
        estimate_sentences(word_count)
    }
}

/// Sentence estimate for terminator-free text: `max(ceil(words / 15), 1)`.
pub const fn estimate_sentences(word_count: usize) -> usize {
    let estimate = word_count.div_ceil(WORDS_PER_ESTIMATED_SENTENCE);
    if estimate == 0 { 1 } else { estimate }
}

fn has_terminator(text: &str) -> bool {
    text.contains(['.', '!', '?'])
}
