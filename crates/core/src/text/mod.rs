//! Text metrics: tokenization and syllable counting.

pub mod syllables;
pub mod tokenize;

pub use syllables::{
    PatternRules, RuleRegistry, SyllableRules, builtin_registry, count_syllables, count_syllables_with,
};
pub use tokenize::{count_sentences, count_words, tokenize_sentences, tokenize_words};
