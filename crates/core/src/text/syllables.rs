//! Language-aware syllable counting.
//!
//! A word's syllable count is the number of segments produced by inserting
//! hyphens at every permitted break point. Break points come from a rule
//! table looked up by language code in a [`RuleRegistry`]. The built-in
//! tables are Knuth-Liang hyphenation patterns embedded by the `hyphenation`
//! crate and are loaded on first use.
//!
//! # Example
//!
//! ```rust
//! use seoaudit_core::text::{RuleRegistry, SyllableRules, count_syllables, count_syllables_with};
//! use seoaudit_core::Result;
//!
//! assert_eq!(count_syllables("menyapu", "id_ID").unwrap(), 3);
//!
//! struct Vowels;
//!
//! impl SyllableRules for Vowels {
//!     fn syllables(&self, word: &str) -> Result<usize> {
//!         Ok(word.chars().filter(|c| "aeiou".contains(*c)).count().max(1))
//!     }
//! }
//!
//! let mut registry = RuleRegistry::with_builtin();
//! registry.register("xx_XX", Vowels);
//! assert_eq!(count_syllables_with("banana", "xx_XX", &registry).unwrap(), 3);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, OnceLock};

use hyphenation::{Hyphenator, Language, Load, Standard};

use crate::{AuditError, Result};

/// Built-in language codes and the pattern sets behind them.
///
/// The first code listed for a primary language becomes its bare alias
/// (`en` resolves to `en_US`).
const BUILTIN: &[(&str, Language)] = &[
    ("en_US", Language::EnglishUS),
    ("en_GB", Language::EnglishGB),
    ("id_ID", Language::Indonesian),
    ("de_DE", Language::German1996),
    ("fr_FR", Language::French),
    ("es_ES", Language::Spanish),
    ("it_IT", Language::Italian),
    ("nl_NL", Language::Dutch),
    ("pt_PT", Language::Portuguese),
    ("pt_BR", Language::Portuguese),
    ("sv_SE", Language::Swedish),
    ("da_DK", Language::Danish),
    ("pl_PL", Language::Polish),
    ("ru_RU", Language::Russian),
    ("cs_CZ", Language::Czech),
    ("hu_HU", Language::Hungarian),
    ("fi_FI", Language::Finnish),
    ("tr_TR", Language::Turkish),
    ("nb_NO", Language::NorwegianBokmal),
    ("uk_UA", Language::Ukrainian),
];

/// Letters kept together at the start and end of a word.
const WORD_EDGE_MINIMA: (usize, usize) = (2, 2);

static BUILTIN_REGISTRY: LazyLock<RuleRegistry> = LazyLock::new(RuleRegistry::with_builtin);

/// A per-language strategy for counting syllables in one lowercase word.
pub trait SyllableRules: Send + Sync {
    fn syllables(&self, word: &str) -> Result<usize>;
}

/// Syllable rules backed by embedded hyphenation patterns.
pub struct PatternRules {
    language: Language,
    dictionary: OnceLock<std::result::Result<Standard, String>>,
}

impl PatternRules {
    pub fn new(language: Language) -> Self {
        Self { language, dictionary: OnceLock::new() }
    }

    /// Loads the pattern table, allowing a break two letters from either end
    /// of a word for every language.
    fn dictionary(&self) -> Result<&Standard> {
        self.dictionary
            .get_or_init(|| {
                Standard::from_embedded(self.language)
                    .map(|mut dictionary| {
                        dictionary.minima = WORD_EDGE_MINIMA;
                        dictionary
                    })
                    .map_err(|e| e.to_string())
            })
            .as_ref()
            .map_err(|message| AuditError::RuleTable {
                language: format!("{:?}", self.language),
                message: message.clone(),
            })
    }
}

impl SyllableRules for PatternRules {
    fn syllables(&self, word: &str) -> Result<usize> {
        let hyphenated = self.dictionary()?.hyphenate(word);
        Ok(hyphenated.breaks.len() + 1)
    }
}

/// Lookup from language code to syllable rule table.
///
/// Codes are normalized before lookup: `-` becomes `_`, the language part is
/// lowercased and the region part uppercased, so `en-us` finds `en_US`.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    tables: HashMap<String, Arc<dyn SyllableRules>>,
    aliases: HashMap<String, String>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in pattern table.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();

        for (code, language) in BUILTIN {
            registry.register(code, PatternRules::new(*language));

            if let Some((primary, _)) = code.split_once('_') {
                registry
                    .aliases
                    .entry(primary.to_string())
                    .or_insert_with(|| code.to_string());
            }
        }

        registry
    }

    /// Registers (or replaces) the rule table for `code`.
    pub fn register(&mut self, code: &str, rules: impl SyllableRules + 'static) -> &mut Self {
        self.tables.insert(normalize_code(code), Arc::new(rules));
        self
    }

    /// Makes `alias` resolve to the table registered for `code`.
    pub fn register_alias(&mut self, alias: &str, code: &str) -> &mut Self {
        self.aliases.insert(normalize_code(alias), normalize_code(code));
        self
    }

    /// Finds the rule table for a language code.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::UnsupportedLanguage`] when neither the code nor an
    /// alias of it is registered.
    pub fn resolve(&self, code: &str) -> Result<&dyn SyllableRules> {
        let normalized = normalize_code(code);

        let table = self.tables.get(&normalized).or_else(|| {
            self.aliases
                .get(&normalized)
                .and_then(|target| self.tables.get(target))
        });

        table
            .map(|rules| &**rules)
            .ok_or_else(|| AuditError::UnsupportedLanguage(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.resolve(code).is_ok()
    }

    /// Registered language codes, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

/// The shared registry of built-in tables used by [`count_syllables`].
pub fn builtin_registry() -> &'static RuleRegistry {
    &BUILTIN_REGISTRY
}

/// Counts syllables in `word` using the built-in rule table for `language`.
///
/// # Errors
///
/// Returns [`AuditError::UnsupportedLanguage`] for unknown language codes.
pub fn count_syllables(word: &str, language: &str) -> Result<usize> {
    count_syllables_with(word, language, builtin_registry())
}

/// Counts syllables in `word` using a caller-supplied registry.
pub fn count_syllables_with(word: &str, language: &str, registry: &RuleRegistry) -> Result<usize> {
    let rules = registry.resolve(language)?;
    rules.syllables(&word.to_lowercase())
}

fn normalize_code(code: &str) -> String {
    let code = code.trim().replace('-', "_");

    match code.split_once('_') {
        Some((language, region)) => format!("{}_{}", language.to_lowercase(), region.to_uppercase()),
        None => code.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Fixed(usize);

    impl SyllableRules for Fixed {
        fn syllables(&self, _word: &str) -> Result<usize> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_indonesian_syllables() {
        assert_eq!(count_syllables("menyapu", "id_ID").unwrap(), 3);
    }

    #[test]
    fn test_single_syllable_english() {
        assert_eq!(count_syllables("the", "en_US").unwrap(), 1);
        assert_eq!(count_syllables("I", "en_US").unwrap(), 1);
    }

    #[rstest]
    #[case("also", 2)]
    #[case("readability", 4)]
    #[case("the", 1)]
    fn test_english_syllable_counts(#[case] word: &str, #[case] expected: usize) {
        assert_eq!(count_syllables(word, "en_US").unwrap(), expected);
    }

    #[test]
    fn test_short_word_edges_can_break() {
        let rules = PatternRules::new(Language::EnglishUS);
        assert_eq!(rules.dictionary().unwrap().minima, (2, 2));
    }

    #[test]
    fn test_word_is_lowercased() {
        let lower = count_syllables("readability", "en_US").unwrap();
        let upper = count_syllables("READABILITY", "en_US").unwrap();
        assert_eq!(lower, upper);
        assert!(lower > 1);
    }

    #[test]
    fn test_unsupported_language() {
        let result = count_syllables("hello", "xx_XX");
        assert!(matches!(result, Err(AuditError::UnsupportedLanguage(code)) if code == "xx_XX"));
    }

    #[test]
    fn test_code_normalization() {
        assert_eq!(normalize_code("en-us"), "en_US");
        assert_eq!(normalize_code(" id_id "), "id_ID");
        assert_eq!(normalize_code("EN"), "en");
        assert!(builtin_registry().contains("en-US"));
    }

    #[test]
    fn test_bare_language_alias() {
        let registry = builtin_registry();
        assert!(registry.contains("en"));
        assert!(registry.contains("id"));
        assert_eq!(
            count_syllables_with("menyapu", "id", registry).unwrap(),
            count_syllables_with("menyapu", "id_ID", registry).unwrap()
        );
    }

    #[test]
    fn test_custom_table_and_alias() {
        let mut registry = RuleRegistry::new();
        registry.register("xx_XX", Fixed(4)).register_alias("xx", "xx_XX");

        assert_eq!(count_syllables_with("anything", "xx", &registry).unwrap(), 4);
        assert!(!registry.contains("en_US"));
        assert_eq!(registry.languages(), vec!["xx_XX"]);
    }

    #[test]
    fn test_builtin_languages_listed() {
        let languages = builtin_registry().languages();
        assert!(languages.contains(&"en_US"));
        assert!(languages.contains(&"id_ID"));
        assert!(!languages.contains(&"en"));
    }
}
