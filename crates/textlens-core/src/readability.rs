//! Readability scoring across several standard indices.
//!
//! All indices are derived from the same handful of counts: words,
//! sentences, syllables (via [`syllables::estimate`]), complex words
//! (three or more syllables), letters, and alphanumeric characters.
//!
//! | Index | Formula |
//! |---|---|
//! | Flesch Reading Ease | `206.835 - 1.015 * (W/S) - 84.6 * (Y/W)`, clamped to 0–100 |
//! | Flesch-Kincaid Grade | `0.39 * (W/S) + 11.8 * (Y/W) - 15.59`, floored at 0 |
//! | Gunning Fog | `0.4 * ((W/S) + 100 * (C/W))`, floored at 0 |
//! | SMOG | `1.0430 * sqrt(C * 30/S) + 3.1291`, only for S >= 30 |
//! | Coleman-Liau | `0.0588 * L - 0.296 * S100 - 15.8` (per 100 words) |
//! | ARI | `4.71 * (chars/W) + 0.5 * (W/S) - 21.43`, floored at 0 |
//!
//! Index values are rounded to one decimal place.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::syllables;
use crate::tokenizer;

/// Minimum sentence count for a meaningful SMOG index.
pub const SMOG_MIN_SENTENCES: usize = 30;

/// Silent reading speed, words per minute.
pub const READING_WPM: usize = 200;

/// Speaking speed, words per minute.
pub const SPEAKING_WPM: usize = 130;

/// Syllable count at which a word is considered complex.
const COMPLEX_WORD_SYLLABLES: usize = 3;

/// Difficulty band derived from the Flesch Reading Ease score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ReadingLevel {
    /// Score 90 and above.
    #[serde(rename = "Very Easy")]
    VeryEasy,
    /// Score 80–89.
    #[serde(rename = "Easy")]
    Easy,
    /// Score 70–79.
    #[serde(rename = "Fairly Easy")]
    FairlyEasy,
    /// Score 60–69.
    #[serde(rename = "Standard")]
    Standard,
    /// Score 50–59.
    #[serde(rename = "Fairly Difficult")]
    FairlyDifficult,
    /// Score 30–49.
    #[serde(rename = "Difficult")]
    Difficult,
    /// Score below 30.
    #[serde(rename = "Very Difficult")]
    VeryDifficult,
    /// No words to score.
    #[default]
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ReadingLevel {
    /// Band a Flesch Reading Ease score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Self::VeryEasy,
            s if s >= 80.0 => Self::Easy,
            s if s >= 70.0 => Self::FairlyEasy,
            s if s >= 60.0 => Self::Standard,
            s if s >= 50.0 => Self::FairlyDifficult,
            s if s >= 30.0 => Self::Difficult,
            _ => Self::VeryDifficult,
        }
    }

    /// Human-readable label, e.g. "Fairly Difficult".
    pub const fn label(&self) -> &'static str {
        match self {
            Self::VeryEasy => "Very Easy",
            Self::Easy => "Easy",
            Self::FairlyEasy => "Fairly Easy",
            Self::Standard => "Standard",
            Self::FairlyDifficult => "Fairly Difficult",
            Self::Difficult => "Difficult",
            Self::VeryDifficult => "Very Difficult",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Readability indices for a text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityMetrics {
    /// Flesch Reading Ease, clamped to 0–100. Higher is easier.
    pub flesch_reading_ease: f64,
    /// Difficulty band for `flesch_reading_ease`.
    pub level: ReadingLevel,
    /// Flesch-Kincaid Grade Level.
    pub flesch_kincaid_grade: f64,
    /// Gunning Fog index.
    pub gunning_fog: f64,
    /// SMOG index. Absent when there are fewer than 30 sentences.
    pub smog_index: Option<f64>,
    /// Coleman-Liau index. May be negative for very simple text.
    pub coleman_liau: f64,
    /// Automated Readability Index.
    pub automated_readability_index: f64,
    /// Estimated silent reading time in whole minutes.
    pub reading_time_minutes: usize,
    /// Estimated speaking time in whole minutes.
    pub speaking_time_minutes: usize,
    /// Word count used by the formulas.
    pub words: usize,
    /// Sentence count used by the formulas.
    pub sentences: usize,
    /// Total estimated syllables.
    pub syllables: usize,
    /// Words with three or more syllables.
    pub complex_words: usize,
    /// Mean syllables per word, rounded to two decimals.
    pub average_syllables_per_word: f64,
}

/// Raw counts the formulas are built from.
#[derive(Debug, Clone, Copy)]
struct Counts {
    words: usize,
    sentences: usize,
    syllables: usize,
    complex_words: usize,
    letters: usize,
    characters: usize,
}

impl Counts {
    fn words_per_sentence(&self) -> f64 {
        self.words as f64 / self.sentences as f64
    }

    fn syllables_per_word(&self) -> f64 {
        self.syllables as f64 / self.words as f64
    }
}

/// Compute readability metrics for `text`.
///
/// Text without words returns [`ReadabilityMetrics::default()`]: score 0,
/// level [`ReadingLevel::Unknown`], zero reading times.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn compute(text: &str) -> ReadabilityMetrics {
    let tokens = tokenizer::tokenize(text);
    if tokens.words.is_empty() {
        return ReadabilityMetrics::default();
    }

    let mut syllable_total = 0;
    let mut complex_words = 0;
    for word in &tokens.words {
        let count = syllables::estimate(word);
        syllable_total += count;
        if count >= COMPLEX_WORD_SYLLABLES {
            complex_words += 1;
        }
    }

    let counts = Counts {
        words: tokens.words.len(),
        // Text made only of terminators ("...") splits into zero sentences.
        sentences: tokens.sentence_count.max(1),
        syllables: syllable_total,
        complex_words,
        letters: text.chars().filter(|c| c.is_alphabetic()).count(),
        characters: text.chars().filter(|c| c.is_alphanumeric()).count(),
    };

    let metrics = from_counts(&counts);
    tracing::debug!(
        words = counts.words,
        sentences = counts.sentences,
        syllables = counts.syllables,
        score = metrics.flesch_reading_ease,
        "readability computed"
    );
    metrics
}

fn from_counts(c: &Counts) -> ReadabilityMetrics {
    let wps = c.words_per_sentence();
    let spw = c.syllables_per_word();
    let words = c.words as f64;

    let reading_ease = round1(flesch_reading_ease(wps, spw).clamp(0.0, 100.0));
    let grade = 0.39f64.mul_add(wps, 11.8 * spw) - 15.59;
    let fog = 0.4 * (100.0f64.mul_add(c.complex_words as f64 / words, wps));
    let smog = (c.sentences >= SMOG_MIN_SENTENCES).then(|| {
        let scaled = c.complex_words as f64 * (30.0 / c.sentences as f64);
        round1(1.0430f64.mul_add(scaled.sqrt(), 3.1291))
    });
    let letters_per_100 = c.letters as f64 / words * 100.0;
    let sentences_per_100 = c.sentences as f64 / words * 100.0;
    let coleman_liau = 0.0588f64.mul_add(letters_per_100, -0.296 * sentences_per_100) - 15.8;
    let ari = 4.71f64.mul_add(c.characters as f64 / words, 0.5 * wps) - 21.43;

    ReadabilityMetrics {
        flesch_reading_ease: reading_ease,
        level: ReadingLevel::from_score(reading_ease),
        flesch_kincaid_grade: round1(grade.max(0.0)),
        gunning_fog: round1(fog.max(0.0)),
        smog_index: smog,
        coleman_liau: round1(coleman_liau),
        automated_readability_index: round1(ari.max(0.0)),
        reading_time_minutes: c.words.div_ceil(READING_WPM),
        speaking_time_minutes: c.words.div_ceil(SPEAKING_WPM),
        words: c.words,
        sentences: c.sentences,
        syllables: c.syllables,
        complex_words: c.complex_words,
        average_syllables_per_word: round2(spw),
    }
}

/// Unclamped Flesch Reading Ease.
fn flesch_reading_ease(words_per_sentence: f64, syllables_per_word: f64) -> f64 {
    84.6f64.mul_add(-syllables_per_word, 1.015f64.mul_add(-words_per_sentence, 206.835))
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
