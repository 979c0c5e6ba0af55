//! Flesch Reading-Ease scoring.
//!
//! This module combines the tokenizers and syllable rules from [`crate::text`]
//! into the readability formula:
//!
//! ```text
//! 206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seoaudit_core::{check_readability, text_metrics};
//!
//! let text = "The cat sat on the mat. The dog ran off.";
//! let score = check_readability(text, "en_US").unwrap();
//! assert!(score > 90.0);
//!
//! let metrics = text_metrics(text, "en_US").unwrap();
//! assert_eq!(metrics.words, 10);
//! assert_eq!(metrics.sentences, 2);
//! ```

use std::fmt;

use serde::Serialize;

use crate::text::{RuleRegistry, builtin_registry, count_sentences, tokenize_words};
use crate::{AuditError, Result};

/// Language code used when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "en_US";

/// Word, sentence and syllable totals for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextMetrics {
    pub words: usize,
    pub sentences: usize,
    pub syllables: usize,
}

impl TextMetrics {
    /// Flesch Reading-Ease score. Higher is easier.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::EmptyInput`] when there are no words or no sentences.
    pub fn reading_ease(&self) -> Result<f64> {
        let (words, sentences, syllables) = self.ratios_input()?;
        Ok(206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words))
    }

    /// Flesch-Kincaid grade level, the U.S. school grade needed to follow the text.
    pub fn grade_level(&self) -> Result<f64> {
        let (words, sentences, syllables) = self.ratios_input()?;
        Ok(0.39 * (words / sentences) + 11.8 * (syllables / words) - 15.59)
    }

    /// Interpretation band of [`Self::reading_ease`].
    pub fn band(&self) -> Result<ReadingEase> {
        self.reading_ease().map(ReadingEase::from_score)
    }

    fn ratios_input(&self) -> Result<(f64, f64, f64)> {
        if self.words == 0 || self.sentences == 0 {
            return Err(AuditError::EmptyInput);
        }
        Ok((self.words as f64, self.sentences as f64, self.syllables as f64))
    }
}

/// Conventional interpretation bands for a Reading-Ease score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingEase {
    VeryEasy,
    Easy,
    FairlyEasy,
    Standard,
    FairlyDifficult,
    Difficult,
    VeryDifficult,
}

impl ReadingEase {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ReadingEase::VeryEasy,
            s if s >= 80.0 => ReadingEase::Easy,
            s if s >= 70.0 => ReadingEase::FairlyEasy,
            s if s >= 60.0 => ReadingEase::Standard,
            s if s >= 50.0 => ReadingEase::FairlyDifficult,
            s if s >= 30.0 => ReadingEase::Difficult,
            _ => ReadingEase::VeryDifficult,
        }
    }
}

impl fmt::Display for ReadingEase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReadingEase::VeryEasy => "very easy",
            ReadingEase::Easy => "easy",
            ReadingEase::FairlyEasy => "fairly easy",
            ReadingEase::Standard => "standard",
            ReadingEase::FairlyDifficult => "fairly difficult",
            ReadingEase::Difficult => "difficult",
            ReadingEase::VeryDifficult => "very difficult",
        };
        write!(f, "{}", label)
    }
}

/// Computes word, sentence and syllable totals with the built-in rule tables.
///
/// Every word is counted with `language`, whatever language it is actually in.
pub fn text_metrics(text: &str, language: &str) -> Result<TextMetrics> {
    text_metrics_with(text, language, builtin_registry())
}

/// Computes text metrics with a caller-supplied rule registry.
///
/// # Errors
///
/// Returns [`AuditError::UnsupportedLanguage`] if `language` is not registered.
pub fn text_metrics_with(text: &str, language: &str, registry: &RuleRegistry) -> Result<TextMetrics> {
    let rules = registry.resolve(language)?;

    let tokens = tokenize_words(text);
    let mut syllables = 0;
    for word in &tokens {
        syllables += rules.syllables(&word.to_lowercase())?;
    }

    let metrics = TextMetrics { words: tokens.len(), sentences: count_sentences(text), syllables };
    tracing::debug!(
        words = metrics.words,
        sentences = metrics.sentences,
        syllables = metrics.syllables,
        language,
        "computed text metrics"
    );

    Ok(metrics)
}

/// Scores `text` with the Flesch Reading-Ease formula.
///
/// # Errors
///
/// - [`AuditError::UnsupportedLanguage`] if `language` has no rule table.
/// - [`AuditError::EmptyInput`] if the text has no words or no sentences.
pub fn check_readability(text: &str, language: &str) -> Result<f64> {
    text_metrics(text, language)?.reading_ease()
}

/// Scores `text` using a caller-supplied rule registry.
pub fn check_readability_with(text: &str, language: &str, registry: &RuleRegistry) -> Result<f64> {
    text_metrics_with(text, language, registry)?.reading_ease()
}
