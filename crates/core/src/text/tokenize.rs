//! Word and sentence tokenization.
//!
//! Words are runs of ASCII letters and underscores; everything else is a
//! separator. Sentences come from Unicode (UAX #29) sentence segmentation,
//! with a second pass that re-joins segments split right after a known
//! abbreviation or a single-letter initial. A segment is only re-joined when
//! it opens with a lowercase word, or a capitalised word that does not
//! commonly start a sentence.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z_]+").unwrap());

/// Abbreviations that end in a period without ending the sentence.
///
/// Stored lowercase, without the trailing period.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e", "cf", "al", "inc", "ltd",
    "co", "corp", "fig", "vol", "approx", "dept", "jan", "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
    "nov", "dec", "u.s", "u.k", "a.m", "p.m", "gen", "col", "lt", "sgt", "capt", "rev", "gov", "sen", "rep",
];

/// Capitalised words that usually open a new sentence rather than continue a
/// name or an abbreviation. Stored lowercase.
const SENTENCE_STARTERS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "for", "he", "her", "his", "how", "i", "if", "in", "it", "its", "my",
    "no", "on", "our", "she", "so", "that", "the", "their", "then", "there", "these", "they", "this", "those",
    "to", "we", "what", "when", "where", "which", "while", "who", "why", "yes", "you", "your",
];

/// Splits text into word tokens.
///
/// # Example
///
/// ```rust
/// use seoaudit_core::text::tokenize_words;
///
/// assert_eq!(tokenize_words("It's 9 o'clock!"), vec!["It", "s", "o", "clock"]);
/// ```
pub fn tokenize_words(text: &str) -> Vec<&str> {
    WORD_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Counts the word tokens in `text`.
pub fn count_words(text: &str) -> usize {
    WORD_PATTERN.find_iter(text).count()
}

/// Splits text into trimmed sentences.
///
/// # Example
///
/// ```rust
/// use seoaudit_core::text::tokenize_sentences;
///
/// let sentences = tokenize_sentences("Dr. Jones arrived. She left at noon.");
/// assert_eq!(sentences, vec!["Dr. Jones arrived.", "She left at noon."]);
/// ```
pub fn tokenize_sentences(text: &str) -> Vec<String> {
    let mut sentences: Vec<String> = Vec::new();

    for segment in text.unicode_sentences() {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        match sentences.last_mut() {
            Some(previous) if continues_sentence(previous, segment) => {
                previous.push(' ');
                previous.push_str(segment);
            }
            _ => sentences.push(segment.to_string()),
        }
    }

    sentences
}

/// Counts the sentences in `text`.
pub fn count_sentences(text: &str) -> usize {
    tokenize_sentences(text).len()
}

/// Whether `segment` was split off `previous` at a period that does not end
/// the sentence.
fn continues_sentence(previous: &str, segment: &str) -> bool {
    ends_with_abbreviation(previous) && !opens_sentence(segment)
}

fn ends_with_abbreviation(sentence: &str) -> bool {
    let Some(last) = sentence.split_whitespace().last() else {
        return false;
    };
    let Some(token) = last.strip_suffix('.') else {
        return false;
    };

    let token = token.trim_start_matches(|c: char| !c.is_alphanumeric());
    if token == "I" {
        return false;
    }

    let token = token.to_lowercase();
    let mut chars = token.chars();

    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_alphabetic(),
        _ => ABBREVIATIONS.contains(&token.as_str()),
    }
}

/// `true` when the first word of `segment` is capitalised and is a usual
/// sentence opener, or when there is no word to judge by.
fn opens_sentence(segment: &str) -> bool {
    let word: String = segment
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect();

    match word.chars().next() {
        Some(first) if first.is_uppercase() => SENTENCE_STARTERS.contains(&word.to_lowercase().as_str()),
        Some(_) => false,
        None => !segment.starts_with(|c: char| c.is_numeric()),
    }
}
